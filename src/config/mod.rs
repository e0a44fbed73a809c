//! Configuration loading.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use companion::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "app_name: studio\ncheck_script: deps_check.py").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! assert_eq!(config.check_script, "deps_check.py");
//! ```
//!
//! # Configuration File Locations
//!
//! Later layers override earlier ones, field by field:
//! 1. Built-in defaults
//! 2. User config (`<config_dir>/companion/config.yml`)
//! 3. `--config <PATH>`
//! 4. Command-line flags

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{load_config, load_config_value, load_from_paths, ConfigPaths};
pub use merger::{deep_merge, merge_configs};
pub use schema::{CompanionConfig, PolicyKind, ProvisionSettings};
