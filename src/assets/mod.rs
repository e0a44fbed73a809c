//! Companion asset locations and provisioning.
//!
//! Scripts ship inside the application bundle. Where the bundle cannot be
//! executed from directly (Windows), they are copied once into the user data
//! directory; everywhere else the bundled directory is used as-is.
//!
//! - [`provisioner`] - One-time extraction with a join barrier
//! - [`stamp`] - Optional version marker for refreshing stale copies

pub mod provisioner;
pub mod stamp;

pub use provisioner::{AssetProvisioner, ProvisionPolicy, ProvisionReport, ProvisionStatus};
pub use stamp::ProvisionStamp;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::HostPaths;
use crate::platform::Platform;

/// A family of bundled assets sharing a directory and file extension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Companion interpreter scripts (`python/*.py`).
    #[default]
    Scripts,
    /// Static pages rendered by the host (`html/*.html`).
    Html,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Scripts, AssetKind::Html];

    /// Directory name under both the bundle and the user data directory.
    pub fn subdir(&self) -> &'static str {
        match self {
            AssetKind::Scripts => "python",
            AssetKind::Html => "html",
        }
    }

    /// Extension (without dot) of files that belong to this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Scripts => "py",
            AssetKind::Html => "html",
        }
    }

    /// Whether `file_name` belongs to this kind.
    ///
    /// Only the second `.`-separated segment is compared, so `check.py`
    /// matches and so does `check.py.orig`, while `archive.tar.py` does not.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.split('.').nth(1) == Some(self.extension())
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// Where an asset kind is shipped and where it must be run from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetLocation {
    pub bundled_source_dir: PathBuf,
    pub writable_target_dir: PathBuf,
}

impl AssetLocation {
    /// Derive the location of `kind` on `platform` from the host directories.
    ///
    /// The user data directory is only consulted on platforms that need
    /// provisioning.
    pub fn resolve(platform: Platform, kind: AssetKind, paths: &dyn HostPaths) -> Result<Self> {
        let bundled_source_dir = paths.bundle_base_dir()?.join(kind.subdir());
        let writable_target_dir = if platform.requires_provisioning() {
            paths.user_data_dir()?.join(kind.subdir())
        } else {
            bundled_source_dir.clone()
        };
        Ok(Self {
            bundled_source_dir,
            writable_target_dir,
        })
    }

    /// Directory scripts are run from.
    pub fn run_dir(&self) -> &Path {
        &self.writable_target_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedHostPaths;

    #[test]
    fn matches_second_segment_only() {
        assert!(AssetKind::Scripts.matches("foo.py"));
        assert!(AssetKind::Scripts.matches("check_depends.py"));
        assert!(AssetKind::Scripts.matches("foo.py.orig"));
        assert!(!AssetKind::Scripts.matches("bar.txt"));
        assert!(!AssetKind::Scripts.matches("archive.tar.py"));
        assert!(!AssetKind::Scripts.matches("py"));
        assert!(AssetKind::Html.matches("index.html"));
    }

    #[test]
    fn windows_targets_user_data() {
        let paths = FixedHostPaths::new("/data", "/bundle");
        let loc = AssetLocation::resolve(Platform::Windows, AssetKind::Scripts, &paths).unwrap();
        assert_eq!(loc.bundled_source_dir, PathBuf::from("/bundle/python"));
        assert_eq!(loc.writable_target_dir, PathBuf::from("/data/python"));
    }

    #[test]
    fn posix_runs_from_bundle() {
        let paths = FixedHostPaths::new("/data", "/bundle");
        for platform in [Platform::MacOS, Platform::Linux] {
            let loc = AssetLocation::resolve(platform, AssetKind::Html, &paths).unwrap();
            assert_eq!(loc.writable_target_dir, PathBuf::from("/bundle/html"));
            assert_eq!(loc.run_dir(), loc.bundled_source_dir.as_path());
        }
    }

    #[test]
    fn kinds_display_as_directory_names() {
        assert_eq!(AssetKind::Scripts.to_string(), "python");
        assert_eq!(AssetKind::Html.to_string(), "html");
    }
}
