//! Configuration loading for the personnel records engine.
//!
//! This module loads engine settings from YAML and opens the configured
//! table store.
//!
//! # Example
//!
//! ```no_run
//! use personnel_records::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./fixtures/acme").unwrap();
//! println!("Loaded settings for: {}", config.settings().organization);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub(crate) use loader::load_yaml;
pub use types::Settings;
