//! Host operating system selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system the companion interpreter is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[value(name = "macos")]
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Separator between entries of a `PATH` list.
    pub fn path_delimiter(&self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::MacOS | Platform::Linux => ':',
        }
    }

    /// Whether bundled assets must be copied out before they can run.
    ///
    /// On Windows the application bundle is an archive the interpreter
    /// cannot read from, so scripts are extracted to the user data directory.
    pub fn requires_provisioning(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
