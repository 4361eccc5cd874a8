use std::path::PathBuf;

use super::config::ProjectConfig;
use super::store::RecordStore;

/// A fully loaded project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of `wellboard/`)
    pub root: PathBuf,
    /// Path to the `wellboard/` directory
    pub data_dir: PathBuf,
    /// Parsed project.toml
    pub config: ProjectConfig,
    /// Records loaded from wells.json
    pub store: RecordStore,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.config.project.name
    }
}
