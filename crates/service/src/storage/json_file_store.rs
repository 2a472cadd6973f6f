use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::CollectionStore;
use crate::errors::ServiceError;

/// File-backed collection store: each collection is `<key>.json` under the
/// data directory, holding one JSON array of records.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Initialize the store, creating the data directory if missing.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Self, ServiceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Self { data_dir })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

impl CollectionStore for JsonFileStore {
    fn read<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, ServiceError> {
        match fs::read(self.collection_path(collection)) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(ServiceError::Storage(err.to_string())),
        }
    }

    fn write<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), ServiceError> {
        let data =
            serde_json::to_vec(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(self.collection_path(collection), data)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
