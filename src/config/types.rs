//! Configuration types for the personnel records engine.
//!
//! This module contains the strongly-typed structures deserialized from
//! `settings.yaml`.

use serde::Deserialize;

use crate::query::NameMatching;

fn default_data_dir() -> String {
    "data".to_string()
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Name of the organization the records belong to.
    pub organization: String,
    /// How first and last names are compared during searches.
    #[serde(default)]
    pub name_matching: NameMatching,
    /// Directory holding the table files, relative to the settings file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: String::new(),
            name_matching: NameMatching::default(),
            data_dir: default_data_dir(),
        }
    }
}
