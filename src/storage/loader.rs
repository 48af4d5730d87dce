//! Dataset loading functionality.
//!
//! This module provides the [`DatasetLoader`] type for loading personnel
//! tables from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::load_yaml;
use crate::error::{RecordsError, RecordsResult};

use super::tables::Dataset;

/// Loads the personnel tables from a directory of YAML files.
///
/// Every `*.yaml` file in the directory may carry any subset of the tables;
/// files are read in name order and their rows appended.
///
/// ```text
/// fixtures/acme/data/
/// ├── organization.yaml   # division, job_titles, cities, states
/// ├── employees.yaml      # employees, addresses, link tables
/// └── payroll.yaml        # payroll
/// ```
///
/// # Example
///
/// ```no_run
/// use personnel_records::storage::{DatasetLoader, SqliteStore};
///
/// let dataset = DatasetLoader::load("./fixtures/acme/data")?;
/// let store = SqliteStore::from_dataset(&dataset)?;
/// # Ok::<(), personnel_records::error::RecordsError>(())
/// ```
#[derive(Debug)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads and merges every YAML table file under `dir`.
    ///
    /// Returns `ConfigNotFound` if the directory is missing or holds no YAML
    /// files, and `ConfigParseError` if any file is malformed.
    pub fn load<P: AsRef<Path>>(dir: P) -> RecordsResult<Dataset> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(RecordsError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| RecordsError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| RecordsError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(RecordsError::ConfigNotFound {
                path: format!("{} (no table files found)", dir_str),
            });
        }
        files.sort();

        let mut dataset = Dataset::default();
        for file in &files {
            dataset.merge(load_yaml::<Dataset>(file)?);
        }

        info!(
            path = %dir_str,
            files = files.len(),
            employees = dataset.employees.len(),
            payroll_lines = dataset.payroll.len(),
            "Loaded personnel dataset"
        );
        Ok(dataset)
    }
}
