use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::config::EngineConfig;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "FreightQuoter";
const APP_NAME: &str = "FreightQuoter";

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.json"))
}

/// Loads the persisted engine configuration, if any. A missing or unreadable
/// file yields `None`; callers fall back to `EngineConfig::default()`.
pub fn load_engine_config() -> Option<EngineConfig> {
    let path = config_file()?;
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn save_engine_config(config: &EngineConfig) -> Result<(), ConfigSaveError> {
    let path = config_file().ok_or(ConfigSaveError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
