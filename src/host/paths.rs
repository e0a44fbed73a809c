//! Host directory providers.

use std::path::{Path, PathBuf};

use crate::error::{CompanionError, Result};

/// Directories owned by the host application.
pub trait HostPaths {
    /// Per-user writable data directory.
    fn user_data_dir(&self) -> Result<PathBuf>;

    /// Root of the (possibly read-only) application bundle.
    fn bundle_base_dir(&self) -> Result<PathBuf>;
}

/// Explicit directories, from configuration, flags or tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHostPaths {
    user_data: PathBuf,
    bundle: PathBuf,
}

impl FixedHostPaths {
    pub fn new(user_data: impl Into<PathBuf>, bundle: impl Into<PathBuf>) -> Self {
        Self {
            user_data: user_data.into(),
            bundle: bundle.into(),
        }
    }
}

impl HostPaths for FixedHostPaths {
    fn user_data_dir(&self) -> Result<PathBuf> {
        Ok(self.user_data.clone())
    }

    fn bundle_base_dir(&self) -> Result<PathBuf> {
        Ok(self.bundle.clone())
    }
}

/// Platform defaults for an installed desktop application.
///
/// User data lives under the OS data directory (`~/.local/share/<app>`,
/// `~/Library/Application Support/<app>`, `%APPDATA%\<app>`), and the bundle
/// is the directory holding the running executable. Either can be pinned.
#[derive(Debug, Clone, Default)]
pub struct DesktopHostPaths {
    app_name: String,
    user_data_override: Option<PathBuf>,
    bundle_override: Option<PathBuf>,
}

impl DesktopHostPaths {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn with_user_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_data_override = dir;
        self
    }

    pub fn with_bundle_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.bundle_override = dir;
        self
    }
}

impl HostPaths for DesktopHostPaths {
    fn user_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.user_data_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(&self.app_name))
            .ok_or(CompanionError::HostPathUnavailable { what: "user data" })
    }

    fn bundle_base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.bundle_override {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or(CompanionError::HostPathUnavailable { what: "bundle" })
    }
}
