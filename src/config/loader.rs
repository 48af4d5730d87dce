//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RecordsError, RecordsResult};
use crate::query::QueryComposer;
use crate::storage::{DatasetLoader, SqliteStore};

use super::types::Settings;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// fixtures/acme/
/// ├── settings.yaml   # Organization name and matching policy
/// └── data/           # Table files, see DatasetLoader
/// ```
///
/// # Example
///
/// ```no_run
/// use personnel_records::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./fixtures/acme")?;
/// println!("Organization: {}", loader.settings().organization);
/// let store = loader.open_store()?;
/// # Ok::<(), personnel_records::error::RecordsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    settings: Settings,
}

impl ConfigLoader {
    /// Loads `settings.yaml` from the specified directory.
    ///
    /// Returns `ConfigNotFound` if the file is missing and
    /// `ConfigParseError` if it contains invalid YAML or fields.
    pub fn load<P: AsRef<Path>>(path: P) -> RecordsResult<Self> {
        let root = path.as_ref().to_path_buf();
        let settings = load_yaml::<Settings>(&root.join("settings.yaml"))?;
        Ok(Self { root, settings })
    }

    /// The loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The directory holding the table files.
    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.settings.data_dir)
    }

    /// A query composer honoring the configured name-matching policy.
    pub fn composer(&self) -> QueryComposer {
        QueryComposer::new(self.settings.name_matching)
    }

    /// Loads the configured tables into an embedded SQLite store.
    pub fn open_store(&self) -> RecordsResult<SqliteStore> {
        let dataset = DatasetLoader::load(self.data_path())?;
        SqliteStore::from_dataset(&dataset)
    }
}

/// Loads and parses a YAML file.
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> RecordsResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| RecordsError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| RecordsError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
