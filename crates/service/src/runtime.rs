//! Session wiring: build both services over one file-backed store.

use std::sync::Arc;

use configs::AppConfig;

use crate::directory::EmployeeDirectoryService;
use crate::errors::ServiceError;
use crate::leave::LeaveService;
use crate::storage::JsonFileStore;

/// The two services a session works with, sharing a single store.
pub struct Services {
    pub directory: Arc<EmployeeDirectoryService<JsonFileStore>>,
    pub leave: LeaveService<EmployeeDirectoryService<JsonFileStore>, JsonFileStore>,
}

/// Construct both services from configuration. The directory is also handed
/// to the leave service as its employee-resolution capability.
pub fn build(cfg: &AppConfig) -> Result<Services, ServiceError> {
    let store = Arc::new(JsonFileStore::new(cfg.storage.data_dir.clone())?);
    let directory = Arc::new(EmployeeDirectoryService::new(
        store.clone(),
        cfg.storage.employees_key.clone(),
    ));
    let leave = LeaveService::new(directory.clone(), store, cfg.storage.requests_key.clone());
    Ok(Services { directory, leave })
}
