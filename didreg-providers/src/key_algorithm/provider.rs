//! Key algorithm provider.

use std::sync::Arc;

use didreg_crypto::Signer;

use super::{error::KeyAlgorithmProviderError, model::ParsedPublicKey, KeyAlgorithm};
use crate::{common_models::PublicKeyJwk, did::model::VerificationMethod};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithmProvider: Send + Sync {
    fn get_key_algorithm(&self, algorithm: &str) -> Option<Arc<dyn KeyAlgorithm>>;

    fn get_signer(&self, algorithm: &str) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError>;

    fn parse_jwk(&self, key: &PublicKeyJwk) -> Result<ParsedPublicKey, KeyAlgorithmProviderError>;

    /// Extracts the public key of a verification method, using the algorithm
    /// its `type` maps to.
    fn parse_verification_method(
        &self,
        method: &VerificationMethod,
    ) -> Result<ParsedPublicKey, KeyAlgorithmProviderError>;
}
