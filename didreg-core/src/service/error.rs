use thiserror::Error;

use didreg_crypto::{CryptoProviderError, HasherError, SignerError};
use didreg_providers::{
    common_models::did::DidValue, did::error::DidValidationError, did_url::DidUrlError,
    storage::StorageError, verification::VerificationError,
};

#[derive(Debug, Error)]
pub enum DidServiceError {
    #[error("{value}: malformed identifier: {source}")]
    MalformedIdentifier { value: String, source: DidUrlError },
    #[error("invalid DID Doc: {0}")]
    InvalidDocument(String),
    #[error("{0}: DID Doc exists")]
    DuplicateDocument(DidValue),
    #[error("{0}: DID Doc not found")]
    DocumentNotFound(DidValue),
    #[error("{0}: DID Doc is deactivated")]
    Deactivated(DidValue),
    #[error("Expected {id} with version {stored}. Got version {requested}")]
    VersionConflict {
        id: DidValue,
        stored: String,
        requested: String,
    },
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
    #[error("Hasher error: `{0}`")]
    Hasher(#[from] HasherError),
    #[error("Serialization error: `{0}`")]
    Serialization(#[from] serde_json::Error),
}

impl From<DidValidationError> for DidServiceError {
    fn from(error: DidValidationError) -> Self {
        match error {
            DidValidationError::MalformedIdentifier { value, source } => {
                Self::MalformedIdentifier { value, source }
            }
            DidValidationError::InvalidDocument(reason) => Self::InvalidDocument(reason),
        }
    }
}

#[derive(Debug, Error)]
pub enum SignatureServiceError {
    #[error("Missing algorithm `{0}`")]
    MissingAlgorithm(String),
    #[error("Could not encode key: `{0}`")]
    CouldNotEncodeKey(String),
    #[error("Crypto provider error: `{0}`")]
    CryptoProviderError(#[from] CryptoProviderError),
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
    #[error("Serialization error: `{0}`")]
    Serialization(#[from] serde_json::Error),
}
