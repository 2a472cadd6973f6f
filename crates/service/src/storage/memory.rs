use std::collections::HashMap;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::CollectionStore;
use crate::errors::ServiceError;

/// In-memory collection store keeping each collection as serialized JSON
/// text, mirroring the key-value layout of the file store. Used as the test
/// double and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text for a collection, if any. Lets tests assert on the
    /// persisted layout directly.
    pub fn raw(&self, collection: &str) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(|p| p.into_inner());
        map.get(collection).cloned()
    }

    /// Overwrite the stored text for a collection, bypassing serialization.
    /// Lets tests plant corrupt data.
    pub fn set_raw(&self, collection: &str, text: impl Into<String>) {
        let mut map = self.inner.write().unwrap_or_else(|p| p.into_inner());
        map.insert(collection.to_string(), text.into());
    }
}

impl CollectionStore for MemoryStore {
    fn read<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, ServiceError> {
        let map = self.inner.read().unwrap_or_else(|p| p.into_inner());
        match map.get(collection) {
            Some(text) => {
                serde_json::from_str(text).map_err(|e| ServiceError::Storage(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn write<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), ServiceError> {
        let text =
            serde_json::to_string(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let mut map = self.inner.write().unwrap_or_else(|p| p.into_inner());
        map.insert(collection.to_string(), text);
        Ok(())
    }
}
