//! Signature verification of write requests.
//!
//! Each required signer is resolved to the keys it may sign with, then every
//! signature attributed to it is checked over the signing payload.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    common_models::did::DidValue,
    did::model::VerificationMethod,
    did_url::split_did_url,
    key_algorithm::provider::KeyAlgorithmProvider,
    signers::{RequiredSigners, SignerRequirement},
    storage::{DidStorage, StorageError},
};

#[cfg(test)]
mod test;

/// A signature of the write payload made with one verification method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInfo {
    pub verification_method_id: String,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("signer: {0}: signature is required but not found")]
    MissingSignature(DidValue),
    #[error("{0}: verification method not found")]
    UnknownVerificationMethod(String),
    #[error("method id: {0}: invalid signature detected")]
    InvalidSignature(String),
    #[error("{0}: DID Doc not found")]
    DocumentNotFound(DidValue),
    #[error("{id}: unsupported public key encoding: {reason}")]
    UnsupportedKeyEncoding { id: String, reason: String },
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SignatureVerification: Send + Sync {
    /// Checks every required signer in ascending principal order. The first
    /// failure is returned.
    fn verify(
        &self,
        signers: &RequiredSigners,
        payload: &[u8],
        signatures: &[SignInfo],
    ) -> Result<(), VerificationError>;
}

#[derive(Clone)]
pub struct SignatureVerifier {
    pub key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    pub storage: Arc<dyn DidStorage>,
}

impl SignatureVerifier {
    pub fn new(
        key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
        storage: Arc<dyn DidStorage>,
    ) -> Self {
        Self {
            key_algorithm_provider,
            storage,
        }
    }

    fn key_set(
        &self,
        requirement: &SignerRequirement,
    ) -> Result<Vec<VerificationMethod>, VerificationError> {
        if let Some(methods) = &requirement.allowed_verification_methods {
            return Ok(methods.clone());
        }

        let stored = self
            .storage
            .get(&requirement.principal)?
            .ok_or_else(|| VerificationError::DocumentNotFound(requirement.principal.clone()))?;

        Ok(stored.did.authentication_methods())
    }

    fn verify_signature(
        &self,
        method: &VerificationMethod,
        payload: &[u8],
        signature: &[u8],
    ) -> Result<(), VerificationError> {
        let unsupported = |reason: String| VerificationError::UnsupportedKeyEncoding {
            id: method.id.to_owned(),
            reason,
        };

        let key = self
            .key_algorithm_provider
            .parse_verification_method(method)
            .map_err(|e| unsupported(e.to_string()))?;

        let signer = self
            .key_algorithm_provider
            .get_signer(&key.key_algorithm)
            .map_err(|e| unsupported(e.to_string()))?;

        signer
            .verify(payload, signature, &key.public_key_bytes)
            .map_err(|_| VerificationError::InvalidSignature(method.id.to_owned()))
    }
}

impl SignatureVerification for SignatureVerifier {
    fn verify(
        &self,
        signers: &RequiredSigners,
        payload: &[u8],
        signatures: &[SignInfo],
    ) -> Result<(), VerificationError> {
        for requirement in signers.iter() {
            let key_set = self.key_set(requirement)?;

            let mut attributed = signatures
                .iter()
                .filter(|info| {
                    split_did_url(&info.verification_method_id).did
                        == requirement.principal.as_str()
                })
                .peekable();

            if attributed.peek().is_none() {
                return Err(VerificationError::MissingSignature(
                    requirement.principal.clone(),
                ));
            }

            for info in attributed {
                let method = key_set
                    .iter()
                    .find(|method| method.id == info.verification_method_id)
                    .ok_or_else(|| {
                        VerificationError::UnknownVerificationMethod(
                            info.verification_method_id.to_owned(),
                        )
                    })?;

                self.verify_signature(method, payload, &info.signature)?;
            }

            tracing::debug!(principal = %requirement.principal, "required signer verified");
        }

        Ok(())
    }
}
