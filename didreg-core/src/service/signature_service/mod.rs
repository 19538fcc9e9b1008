//! Key generation and signing for registry clients.

use std::sync::Arc;

use didreg_crypto::CryptoProvider;
use didreg_providers::{
    common_models::did::DidValue,
    did::model::VerificationMethod,
    key_algorithm::{model::GeneratedKey, provider::KeyAlgorithmProvider, KeyAlgorithm},
    verification::SignInfo,
};
use zeroize::Zeroizing;

use super::error::SignatureServiceError;
use crate::model::{KeyAlgorithmType, VerificationMethodType, WriteRequestPayload};


pub struct SignatureService {
    pub crypto: Arc<dyn CryptoProvider>,
    pub key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
}

impl SignatureService {
    pub fn new(
        crypto: Arc<dyn CryptoProvider>,
        key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    ) -> Self {
        Self {
            crypto,
            key_algorithm_provider,
        }
    }

    fn key_algorithm(
        &self,
        algorithm: &KeyAlgorithmType,
    ) -> Result<Arc<dyn KeyAlgorithm>, SignatureServiceError> {
        self.key_algorithm_provider
            .get_key_algorithm(&algorithm.to_string())
            .ok_or(SignatureServiceError::MissingAlgorithm(
                algorithm.to_string(),
            ))
    }

    pub fn get_key_pair(
        &self,
        algorithm: &KeyAlgorithmType,
    ) -> Result<GeneratedKey, SignatureServiceError> {
        Ok(self.key_algorithm(algorithm)?.generate_key_pair())
    }

    pub fn get_multibase(
        &self,
        algorithm: &KeyAlgorithmType,
        public_key: &[u8],
    ) -> Result<String, SignatureServiceError> {
        self.key_algorithm(algorithm)?
            .get_multibase(public_key)
            .map_err(|e| SignatureServiceError::CouldNotEncodeKey(e.to_string()))
    }

    /// Builds a verification method for `public_key`. Ed25519 keys are
    /// written as multibase, P-256 keys as JWK.
    pub fn verification_method(
        &self,
        algorithm: &KeyAlgorithmType,
        id: &str,
        controller: &DidValue,
        public_key: &[u8],
    ) -> Result<VerificationMethod, SignatureServiceError> {
        let key_algorithm = self.key_algorithm(algorithm)?;

        let (r#type, public_key_jwk, public_key_multibase) = match algorithm {
            KeyAlgorithmType::Eddsa => (
                VerificationMethodType::Ed25519VerificationKey2020,
                None,
                Some(self.get_multibase(algorithm, public_key)?),
            ),
            KeyAlgorithmType::Es256 => (
                VerificationMethodType::JsonWebKey2020,
                Some(
                    key_algorithm
                        .bytes_to_jwk(public_key, None)
                        .map_err(|e| SignatureServiceError::CouldNotEncodeKey(e.to_string()))?,
                ),
                None,
            ),
        };

        Ok(VerificationMethod {
            id: id.to_owned(),
            r#type: r#type.to_string(),
            controller: controller.to_owned(),
            public_key_jwk,
            public_key_multibase,
        })
    }

    pub fn sign(
        &self,
        algorithm: &KeyAlgorithmType,
        public_key: &[u8],
        private_key: Zeroizing<Vec<u8>>,
        data: &[u8],
    ) -> Result<Vec<u8>, SignatureServiceError> {
        let signer_algorithm_id = self.key_algorithm(algorithm)?.get_signer_algorithm_id();

        let signer = self.crypto.get_signer(&signer_algorithm_id)?;

        Ok(signer.sign(data, public_key, private_key.as_slice())?)
    }

    pub fn verify(
        &self,
        algorithm: &KeyAlgorithmType,
        public_key: &[u8],
        signature: &[u8],
        data: &[u8],
    ) -> Result<(), SignatureServiceError> {
        let signer_algorithm_id = self.key_algorithm(algorithm)?.get_signer_algorithm_id();

        let signer = self.crypto.get_signer(&signer_algorithm_id)?;

        Ok(signer.verify(data, signature, public_key)?)
    }

    /// Signs the payload of a write request with one verification method.
    pub fn sign_payload(
        &self,
        algorithm: &KeyAlgorithmType,
        verification_method_id: &str,
        public_key: &[u8],
        private_key: Zeroizing<Vec<u8>>,
        payload: &WriteRequestPayload,
    ) -> Result<SignInfo, SignatureServiceError> {
        let data = payload.signing_bytes()?;

        Ok(SignInfo {
            verification_method_id: verification_method_id.to_owned(),
            signature: self.sign(algorithm, public_key, private_key, &data)?,
        })
    }
}
