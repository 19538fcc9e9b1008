//! Required-signer computation for document writes.
//!
//! Every write names the principals that must co-sign it. For the document's
//! own id the usable keys are restricted to the authentication keys of the
//! new document version, which makes one-step key rotation possible. Other
//! principals sign with the authentication keys of their stored documents.

use std::collections::BTreeMap;

use crate::{common_models::did::DidValue, did::model::VerificationMethod};

pub mod resolver;


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerRequirement {
    pub principal: DidValue,
    /// `None` means the principal's stored authentication keys apply.
    pub allowed_verification_methods: Option<Vec<VerificationMethod>>,
}

/// Required signers keyed by principal, iterated in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredSigners {
    document_id: DidValue,
    self_methods: Vec<VerificationMethod>,
    signers: BTreeMap<DidValue, SignerRequirement>,
}

impl RequiredSigners {
    pub fn new(document_id: DidValue, self_methods: Vec<VerificationMethod>) -> Self {
        Self {
            document_id,
            self_methods,
            signers: BTreeMap::new(),
        }
    }

    /// Adds `principal` unless already present. The document's own id always
    /// carries the self restriction.
    pub fn add(&mut self, principal: &DidValue) {
        if self.signers.contains_key(principal) {
            return;
        }

        let allowed_verification_methods =
            (*principal == self.document_id).then(|| self.self_methods.clone());

        self.signers.insert(
            principal.clone(),
            SignerRequirement {
                principal: principal.clone(),
                allowed_verification_methods,
            },
        );
    }

    pub fn get(&self, principal: &DidValue) -> Option<&SignerRequirement> {
        self.signers.get(principal)
    }

    pub fn principals(&self) -> impl Iterator<Item = &DidValue> {
        self.signers.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignerRequirement> {
        self.signers.values()
    }
}
