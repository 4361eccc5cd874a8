use std::fs;
use std::path::Path;

use crate::io::project_io::{ProjectError, atomic_write};
use crate::model::config::ProjectConfig;

/// Config file inside the data directory
pub const CONFIG_FILE: &str = "project.toml";

/// Read and parse project.toml from the data directory
pub fn read_config(data_dir: &Path) -> Result<ProjectConfig, ProjectError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&config_text)?)
}

/// Serialize the config and write it back to disk
pub fn write_config(data_dir: &Path, config: &ProjectConfig) -> Result<(), ProjectError> {
    let text = toml::to_string_pretty(config)?;
    atomic_write(&data_dir.join(CONFIG_FILE), text.as_bytes())?;
    Ok(())
}
