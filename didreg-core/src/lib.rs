//! Service layer of the DID registry.
//!
//! The registry keeps DID Documents in ledger state and decides who may
//! create or change them. Every write names a set of required signers,
//! computed from the controllers and verification methods of the old and new
//! document versions, and is applied only if all of them signed it.
//!
//! ## Repository structure
//!
//! * **Crypto**: raw signing, verification and hashing
//! * **Providers**
//!   * DID and DID URL grammar
//!   * Document model and structural validation
//!   * Key algorithm provider
//!   * Required-signer resolver and signature verifier
//!   * Document storage
//! * **Core**
//!   * Services
//!
//! ## Getting started
//!
//! ```ignore rust
//! /// `None` initializes the registry with the default configuration
//! let registry = DidRegistry::new(None, Arc::new(InMemoryDidStorage::default()));
//! ```
//!
//! Then use the services, e.g.:
//! ```ignore rust
//! let key_pair = registry
//!     .signature_service
//!     .get_key_pair(&KeyAlgorithmType::Eddsa)?;
//! ```

use std::{collections::HashMap, sync::Arc};

use didreg_crypto::imp::{
    hasher::sha256::SHA256,
    signer::{eddsa::EDDSASigner, es256::ES256Signer},
    CryptoProviderImpl,
};
use didreg_providers::{
    key_algorithm::{
        imp::{
            eddsa::{self, Eddsa, EddsaParams},
            es256::{self, Es256, Es256Params},
            provider::KeyAlgorithmProviderImpl,
        },
        KeyAlgorithm,
    },
    storage::{in_memory::InMemoryDidStorage, DidStorage},
    verification::SignatureVerifier,
};
use strum::IntoEnumIterator;

use config::RegistryConfig;
use model::{KeyAlgorithmType, VerificationMethodType};
use service::{did_service::DidService, signature_service::SignatureService};

pub mod config;
pub mod model;
pub mod service;

pub struct DidRegistry {
    pub signature_service: SignatureService,
    pub did_service: DidService,
}

impl Default for DidRegistry {
    fn default() -> Self {
        Self::new(None, Arc::new(InMemoryDidStorage::default()))
    }
}

impl DidRegistry {
    pub fn new(config: Option<RegistryConfig>, storage: Arc<dyn DidStorage>) -> Self {
        let config = config.unwrap_or_default();

        // initialize crypto provider
        let crypto_provider = Arc::new(CryptoProviderImpl::new(
            HashMap::from_iter(vec![("sha-256".to_string(), Arc::new(SHA256 {}) as _)]),
            HashMap::from_iter(vec![
                ("Ed25519".to_string(), Arc::new(EDDSASigner {}) as _),
                ("ES256".to_string(), Arc::new(ES256Signer {}) as _),
            ]),
        ));

        // initialize key algorithm provider
        let key_algorithms: HashMap<String, Arc<dyn KeyAlgorithm>> = HashMap::from_iter(vec![
            (
                KeyAlgorithmType::Eddsa.to_string(),
                Arc::new(Eddsa::new(EddsaParams {
                    algorithm: eddsa::Algorithm::Ed25519,
                })) as _,
            ),
            (
                KeyAlgorithmType::Es256.to_string(),
                Arc::new(Es256::new(Es256Params {
                    algorithm: es256::Algorithm::Es256,
                })) as _,
            ),
        ]);
        let method_types = VerificationMethodType::iter()
            .map(|method_type| (method_type.to_string(), method_type.key_algorithm()))
            .collect();
        let key_algorithm_provider = Arc::new(KeyAlgorithmProviderImpl::new(
            key_algorithms,
            method_types,
            crypto_provider.clone(),
        ));

        let verifier = Arc::new(SignatureVerifier::new(
            key_algorithm_provider.clone(),
            storage.clone(),
        ));

        let signature_service =
            SignatureService::new(crypto_provider.clone(), key_algorithm_provider);

        let did_service = DidService::new(storage, verifier, crypto_provider, config);

        Self {
            signature_service,
            did_service,
        }
    }
}
