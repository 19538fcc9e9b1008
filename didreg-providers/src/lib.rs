//! Building blocks of the DID registry: identifier grammar, document model,
//! key algorithms, the required-signer resolver, signature verification and
//! document storage.

pub mod common_models;
pub mod did;
pub mod did_url;
pub mod key_algorithm;
pub mod signers;
pub mod storage;
pub mod verification;
