//! Document storage.

use thiserror::Error;

use crate::{
    common_models::did::DidValue,
    did::model::{DidDocument, Metadata, StoredDid},
};

pub mod in_memory;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Get by key error: `{0}`")]
    GetByKey(String),
    #[error("Insert error: `{0}`")]
    Insert(String),
    #[error("Delete error: `{0}`")]
    Delete(String),
}

/// Keyed document store of the ledger state.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DidStorage: Send + Sync {
    fn has(&self, id: &DidValue) -> Result<bool, StorageError>;

    fn get(&self, id: &DidValue) -> Result<Option<StoredDid>, StorageError>;

    /// Inserts or replaces the document and its metadata together.
    fn put(&self, id: &DidValue, did: DidDocument, metadata: Metadata)
        -> Result<(), StorageError>;

    fn delete(&self, id: &DidValue) -> Result<(), StorageError>;
}
