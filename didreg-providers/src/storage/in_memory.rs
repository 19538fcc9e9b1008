use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use super::{DidStorage, StorageError};
use crate::{
    common_models::did::DidValue,
    did::model::{DidDocument, Metadata, StoredDid},
};

#[derive(Default)]
pub struct InMemoryDidStorage {
    pub(super) storage: Mutex<BTreeMap<DidValue, StoredDid>>,
}

impl InMemoryDidStorage {
    pub fn new(storage: BTreeMap<DidValue, StoredDid>) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    fn lock(
        &self,
        error: fn(String) -> StorageError,
    ) -> Result<MutexGuard<'_, BTreeMap<DidValue, StoredDid>>, StorageError> {
        self.storage.lock().map_err(|e| error(e.to_string()))
    }
}

impl DidStorage for InMemoryDidStorage {
    fn has(&self, id: &DidValue) -> Result<bool, StorageError> {
        Ok(self.lock(StorageError::GetByKey)?.contains_key(id))
    }

    fn get(&self, id: &DidValue) -> Result<Option<StoredDid>, StorageError> {
        Ok(self.lock(StorageError::GetByKey)?.get(id).cloned())
    }

    fn put(
        &self,
        id: &DidValue,
        did: DidDocument,
        metadata: Metadata,
    ) -> Result<(), StorageError> {
        self.lock(StorageError::Insert)?
            .insert(id.clone(), StoredDid { did, metadata });
        Ok(())
    }

    fn delete(&self, id: &DidValue) -> Result<(), StorageError> {
        self.lock(StorageError::Delete)?.remove(id);
        Ok(())
    }
}
