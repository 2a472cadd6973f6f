use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the two persisted collections live on disk.
///
/// Each collection is a flat JSON array stored as `<key>.json` under
/// `data_dir`. The default keys match the original storage layout.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_employees_key")]
    pub employees_key: String,
    #[serde(default = "default_requests_key")]
    pub requests_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            employees_key: default_employees_key(),
            requests_key: default_requests_key(),
        }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_employees_key() -> String { "lms_employees".into() }
fn default_requests_key() -> String { "lms_leave_requests".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (or `config.toml`), falling back to defaults
    /// when no config file exists at all.
    pub fn load_or_default() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize()?;
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        if self.employees_key.trim().is_empty() {
            self.employees_key = default_employees_key();
        }
        if self.requests_key.trim().is_empty() {
            self.requests_key = default_requests_key();
        }
        if self.employees_key == self.requests_key {
            return Err(anyhow!(
                "storage.employees_key and storage.requests_key must be distinct"
            ));
        }
        Ok(())
    }
}
