use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    common_models::{did::DidValue, PublicKeyJwk},
    did_url::split_did_url,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context", default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    pub id: DidValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controller: Vec<DidValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_method: Vec<VerificationMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_invocation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_delegation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_agreement: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<Service>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_known_as: Vec<String>,
}

impl DidDocument {
    /// A document without key material or relationships.
    pub fn new(id: DidValue) -> Self {
        Self {
            context: vec![],
            id,
            controller: vec![],
            verification_method: vec![],
            authentication: vec![],
            assertion_method: vec![],
            capability_invocation: vec![],
            capability_delegation: vec![],
            key_agreement: vec![],
            service: vec![],
            also_known_as: vec![],
        }
    }

    /// Controllers with the self default applied.
    pub fn controllers(&self) -> Vec<DidValue> {
        if self.controller.is_empty() {
            vec![self.id.clone()]
        } else {
            self.controller.clone()
        }
    }

    pub fn find_verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Own verification methods referenced by `authentication`.
    ///
    /// References to methods of other documents are not resolved.
    pub fn authentication_methods(&self) -> Vec<VerificationMethod> {
        self.verification_method
            .iter()
            .filter(|vm| self.authentication.iter().any(|auth| *auth == vm.id))
            .cloned()
            .collect()
    }

    /// All verification relationship entries, in declaration order.
    pub fn verification_relationships(&self) -> impl Iterator<Item = &String> {
        self.authentication
            .iter()
            .chain(&self.assertion_method)
            .chain(&self.capability_invocation)
            .chain(&self.capability_delegation)
            .chain(&self.key_agreement)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    pub r#type: String,
    pub controller: DidValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<PublicKeyJwk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
}

impl VerificationMethod {
    /// Structural equality, an absent multibase equals an empty one.
    pub fn same_as(&self, other: &VerificationMethod) -> bool {
        self.id == other.id
            && self.r#type == other.r#type
            && self.controller == other.controller
            && self.public_key_jwk == other.public_key_jwk
            && self.public_key_multibase.as_deref().unwrap_or_default()
                == other.public_key_multibase.as_deref().unwrap_or_default()
    }

    /// The DID part of the method id.
    pub fn did(&self) -> &str {
        split_did_url(&self.id).did
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub r#type: String,
    pub service_endpoint: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated: OffsetDateTime,
    #[serde(default)]
    pub deactivated: bool,
    pub version_id: String,
}

impl Metadata {
    /// Metadata of a freshly created document.
    pub fn new(block_time: OffsetDateTime, version_id: String) -> Self {
        Self {
            created: block_time,
            updated: block_time,
            deactivated: false,
            version_id,
        }
    }

    /// Metadata after a mutation. `created` is kept.
    pub fn updated(&self, block_time: OffsetDateTime, version_id: String) -> Self {
        Self {
            created: self.created,
            updated: block_time,
            deactivated: self.deactivated,
            version_id,
        }
    }
}

/// A document together with its metadata, as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDid {
    pub did: DidDocument,
    pub metadata: Metadata,
}
