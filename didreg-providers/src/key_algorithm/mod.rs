//! Key algorithm representations and signer lookup.
//!
//! A key algorithm knows how public keys of its curve are written in a
//! verification method (`publicKeyMultibase` or `publicKeyJwk`) and which
//! crypto signer checks signatures made with them.

use error::KeyAlgorithmError;
use model::GeneratedKey;

use crate::common_models::PublicKeyJwk;

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

/// Find signer IDs and convert key representations.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithm: Send + Sync {
    /// Finds related crypto signer ID.
    fn get_signer_algorithm_id(&self) -> String;

    /// Returns the multicodec-prefixed base58-btc representation of a public key.
    fn get_multibase(&self, public_key: &[u8]) -> Result<String, KeyAlgorithmError>;

    /// Decodes `publicKeyMultibase` in any multibase base. The multicodec
    /// prefix is stripped when present.
    fn multibase_to_bytes(&self, multibase: &str) -> Result<Vec<u8>, KeyAlgorithmError>;

    /// Generates a new in-memory key-pair.
    fn generate_key_pair(&self) -> GeneratedKey;

    /// Converts public key bytes to JWK.
    fn bytes_to_jwk(
        &self,
        bytes: &[u8],
        r#use: Option<String>,
    ) -> Result<PublicKeyJwk, KeyAlgorithmError>;

    /// Converts JWK to key bytes.
    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError>;
}

/// Decodes a multibase string and strips `codec` when the payload starts with
/// it and the remainder has one of `key_lengths`. Anything else is a raw key.
pub(crate) fn decode_multibase(
    multibase: &str,
    codec: &[u8],
    key_lengths: &[usize],
) -> Result<Vec<u8>, KeyAlgorithmError> {
    let (_, data) =
        multibase::decode(multibase).map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;

    let prefixed = data
        .len()
        .checked_sub(codec.len())
        .is_some_and(|len| key_lengths.contains(&len));

    if prefixed && data.starts_with(codec) {
        Ok(data[codec.len()..].to_vec())
    } else {
        Ok(data)
    }
}
