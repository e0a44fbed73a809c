//! Configuration file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::CompanionConfig;
use crate::error::{CompanionError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration files in merge order (later overrides earlier).
///
/// 1. User config (`<config_dir>/companion/config.yml`)
/// 2. Explicit file (`--config`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User config, when it exists.
    pub user_global: Option<PathBuf>,

    /// File named on the command line. Must exist.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover the user config and attach an explicit file, if any.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Find the user config under the platform config directory.
    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::config_dir()?
            .join(env!("CARGO_PKG_NAME"))
            .join("config.yml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// All config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.explicit.iter()).collect()
    }
}

/// Load a config file as a raw YAML value, for merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CompanionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CompanionError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| CompanionError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge the given config files over the built-in defaults.
pub fn load_from_paths(paths: &ConfigPaths) -> Result<CompanionConfig> {
    let mut layers = Vec::new();
    for path in paths.all() {
        tracing::debug!(path = %path.display(), "loading config layer");
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);

    // Errors point at the highest-priority file, which is usually the one edited.
    let blame = paths.all().last().map(|p| p.to_path_buf()).unwrap_or_default();
    serde_yaml::from_value(merged).map_err(|e| CompanionError::ConfigParseError {
        path: blame,
        message: e.to_string(),
    })
}

/// Load configuration: defaults, then the user config, then `explicit`.
pub fn load_config(explicit: Option<&Path>) -> Result<CompanionConfig> {
    load_from_paths(&ConfigPaths::discover(explicit))
}
