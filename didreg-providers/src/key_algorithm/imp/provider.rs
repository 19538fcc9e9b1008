use std::{collections::HashMap, sync::Arc};

use didreg_crypto::{CryptoProvider, Signer};

use crate::{
    common_models::PublicKeyJwk,
    did::model::VerificationMethod,
    key_algorithm::{
        error::KeyAlgorithmProviderError,
        model::{MethodKeyAlgorithm, ParsedPublicKey},
        provider::KeyAlgorithmProvider,
        KeyAlgorithm,
    },
};

pub struct KeyAlgorithmProviderImpl {
    algorithms: HashMap<String, Arc<dyn KeyAlgorithm>>,
    method_types: HashMap<String, MethodKeyAlgorithm>,
    crypto: Arc<dyn CryptoProvider>,
}

impl KeyAlgorithmProviderImpl {
    pub fn new(
        algorithms: HashMap<String, Arc<dyn KeyAlgorithm>>,
        method_types: HashMap<String, MethodKeyAlgorithm>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self {
            algorithms,
            method_types,
            crypto,
        }
    }
}

impl KeyAlgorithmProvider for KeyAlgorithmProviderImpl {
    fn get_key_algorithm(&self, algorithm: &str) -> Option<Arc<dyn KeyAlgorithm>> {
        self.algorithms.get(algorithm).cloned()
    }

    fn get_signer(&self, algorithm: &str) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError> {
        let key_algorithm = self.get_key_algorithm(algorithm).ok_or(
            KeyAlgorithmProviderError::MissingAlgorithmImplementation(algorithm.to_owned()),
        )?;
        let signer_algorithm = key_algorithm.get_signer_algorithm_id();
        self.crypto
            .get_signer(&signer_algorithm)
            .map_err(|e| KeyAlgorithmProviderError::MissingSignerImplementation(e.to_string()))
    }

    fn parse_jwk(&self, key: &PublicKeyJwk) -> Result<ParsedPublicKey, KeyAlgorithmProviderError> {
        for (name, algorithm) in &self.algorithms {
            if let Ok(public_key_bytes) = algorithm.jwk_to_bytes(key) {
                return Ok(ParsedPublicKey {
                    public_key_bytes,
                    key_algorithm: name.to_owned(),
                    signer_algorithm_id: algorithm.get_signer_algorithm_id(),
                });
            }
        }

        Err(KeyAlgorithmProviderError::MissingAlgorithmImplementation(
            "None of the algorithms supports given key".to_string(),
        ))
    }

    fn parse_verification_method(
        &self,
        method: &VerificationMethod,
    ) -> Result<ParsedPublicKey, KeyAlgorithmProviderError> {
        let algorithm = match self.method_types.get(&method.r#type) {
            Some(MethodKeyAlgorithm::Fixed(algorithm)) => algorithm,
            Some(MethodKeyAlgorithm::FromJwk) => {
                let jwk = method.public_key_jwk.as_ref().ok_or(
                    KeyAlgorithmProviderError::MissingPublicKey(method.id.to_owned()),
                )?;
                return self.parse_jwk(jwk);
            }
            None => {
                return Err(KeyAlgorithmProviderError::UnsupportedVerificationMethodType(
                    method.r#type.to_owned(),
                ))
            }
        };

        let key_algorithm = self.get_key_algorithm(algorithm).ok_or(
            KeyAlgorithmProviderError::MissingAlgorithmImplementation(algorithm.to_owned()),
        )?;

        let public_key_bytes = match (&method.public_key_jwk, &method.public_key_multibase) {
            (Some(jwk), _) => key_algorithm.jwk_to_bytes(jwk)?,
            (None, Some(multibase)) if !multibase.is_empty() => {
                key_algorithm.multibase_to_bytes(multibase)?
            }
            _ => {
                return Err(KeyAlgorithmProviderError::MissingPublicKey(
                    method.id.to_owned(),
                ))
            }
        };

        Ok(ParsedPublicKey {
            public_key_bytes,
            key_algorithm: algorithm.to_owned(),
            signer_algorithm_id: key_algorithm.get_signer_algorithm_id(),
        })
    }
}
