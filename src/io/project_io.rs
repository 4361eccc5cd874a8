use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::io::config_io::{read_config, write_config};
use crate::model::config::ProjectConfig;
use crate::model::project::Project;
use crate::model::store::{RecordStore, StoreEvent, StoreListener};
use crate::model::well::Well;

/// Name of the project data directory under the project root
pub const DATA_DIR: &str = "wellboard";
/// Record file inside the data directory
pub const WELLS_FILE: &str = "wells.json";

/// Error type for project I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a wellboard project: no wellboard/ directory found")]
    NotAProject,
    #[error("project already initialized at {0}")]
    AlreadyInitialized(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse project.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize project.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("could not parse {path}: {source}")]
    RecordParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize records: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct WellsFile {
    #[serde(default)]
    wells: Vec<Well>,
}

#[derive(Serialize)]
struct WellsFileRef<'a> {
    wells: &'a [Well],
}

/// Discover the project by walking up from the given directory, looking for
/// a `wellboard/` subdirectory holding a project.toml.
pub fn discover_project(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        let data_dir = current.join(DATA_DIR);
        if data_dir.is_dir() && data_dir.join(crate::io::config_io::CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::NotAProject);
        }
    }
}

/// Load a complete project from the given root directory.
pub fn load_project(root: &Path) -> Result<Project, ProjectError> {
    let data_dir = root.join(DATA_DIR);
    if !data_dir.is_dir() {
        return Err(ProjectError::NotAProject);
    }
    let config = read_config(&data_dir)?;
    let wells = read_wells(&data_dir)?;
    info!(project = %config.project.name, wells = wells.len(), "loaded project");

    Ok(Project {
        root: root.to_path_buf(),
        data_dir,
        config,
        store: RecordStore::from_wells(wells),
    })
}

/// Read wells.json; a missing file means no records yet.
pub fn read_wells(data_dir: &Path) -> Result<Vec<Well>, ProjectError> {
    let path = data_dir.join(WELLS_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path).map_err(|e| ProjectError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let file: WellsFile =
        serde_json::from_str(&text).map_err(|e| ProjectError::RecordParseError { path, source: e })?;
    Ok(file.wells)
}

/// Write wells.json atomically.
pub fn save_wells(data_dir: &Path, wells: &[Well]) -> Result<(), ProjectError> {
    let content = serde_json::to_string_pretty(&WellsFileRef { wells })?;
    atomic_write(&data_dir.join(WELLS_FILE), content.as_bytes())?;
    Ok(())
}

/// Create `wellboard/` with a config and an empty record file.
/// Returns the data directory.
pub fn init_project(root: &Path, name: &str) -> Result<PathBuf, ProjectError> {
    let data_dir = root.join(DATA_DIR);
    if data_dir.join(crate::io::config_io::CONFIG_FILE).exists() {
        return Err(ProjectError::AlreadyInitialized(data_dir));
    }
    fs::create_dir_all(&data_dir)?;
    write_config(&data_dir, &ProjectConfig::new(name))?;
    save_wells(&data_dir, &[])?;
    info!(project = name, path = %data_dir.display(), "initialized project");
    Ok(data_dir)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Save hook
// ---------------------------------------------------------------------------

/// Store listener that writes the record file after every mutation.
///
/// A failed write never undoes the mutation; the error is logged and kept
/// in `last_error` for the UI until the next successful save.
#[derive(Debug, Clone)]
pub struct ProjectSaver {
    data_dir: PathBuf,
    last_error: Rc<RefCell<Option<String>>>,
}

impl ProjectSaver {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ProjectSaver {
            data_dir: data_dir.into(),
            last_error: Rc::default(),
        }
    }

    /// Shared slot holding the most recent save error, if any
    pub fn last_error(&self) -> Rc<RefCell<Option<String>>> {
        self.last_error.clone()
    }

    pub fn on_change(&self, event: &StoreEvent, store: &RecordStore) {
        match save_wells(&self.data_dir, store.wells()) {
            Ok(()) => {
                debug!(?event, wells = store.len(), "saved project");
                self.last_error.borrow_mut().take();
            }
            Err(e) => {
                error!(?event, error = %e, "failed to save project");
                *self.last_error.borrow_mut() = Some(e.to_string());
            }
        }
    }

    pub fn into_listener(self) -> StoreListener {
        Box::new(move |event, store| self.on_change(event, store))
    }
}
