//! Companion interpreter discovery.
//!
//! This module finds an installed Python 3 interpreter the host can shell
//! out to. Each operating system has its own lookup sequence, expressed as a
//! [`PlatformStrategy`]; the [`PathResolver`] runs the selected strategy
//! through a [`CommandRunner`] so lookups can be scripted in tests.
//!
//! # Modules
//!
//! - [`runner`] - Blocking command execution for lookup and version queries
//! - [`strategy`] - Per-platform lookup sequences and verification policy
//! - [`version`] - Version string parsing
//! - [`resolver`] - The resolver tying strategies and runner together
//!
//! # Example
//!
//! ```no_run
//! use companion::interpreter::PathResolver;
//! use companion::Platform;
//!
//! match PathResolver::system().resolve(Platform::current()) {
//!     Ok(found) => println!("python at {}", found.binary_path.display()),
//!     Err(reason) => println!("companion features unavailable: {}", reason),
//! }
//! ```

pub mod resolver;
pub mod runner;
pub mod strategy;
pub mod version;

pub use resolver::PathResolver;
pub use runner::{CommandRunner, Invocation, RunError, SystemRunner};
pub use strategy::{strategy_for, LinuxStrategy, MacOsStrategy, PlatformStrategy, WindowsStrategy};
pub use version::parse_major_version;

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Major version the companion scripts are written for.
pub const REQUIRED_MAJOR: u32 = 3;

/// An interpreter that passed the platform's lookup policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInterpreter {
    /// Absolute path to the executable.
    pub binary_path: PathBuf,
    /// Parent directory of the executable, prepended to `PATH` for children.
    pub binary_directory: PathBuf,
    /// The platform's `PATH` list separator.
    pub path_delimiter: char,
}

impl ResolvedInterpreter {
    /// Build a resolution result from the trimmed lookup output.
    ///
    /// A `;` delimiter means a Windows target, whose paths are split on `\`
    /// or `/` whatever the host is.
    pub fn from_binary(binary_path: PathBuf, path_delimiter: char) -> Self {
        let binary_directory = if path_delimiter == ';' {
            windows_parent(&binary_path.to_string_lossy())
        } else {
            binary_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default()
        };
        Self {
            binary_path,
            binary_directory,
            path_delimiter,
        }
    }

    /// `PATH` for child processes: the interpreter directory first, then
    /// whatever the caller inherited.
    pub fn child_path(&self, inherited: Option<&OsString>) -> OsString {
        let mut path = OsString::from(self.binary_directory.as_os_str());
        path.push(self.path_delimiter.to_string());
        if let Some(inherited) = inherited {
            path.push(inherited);
        }
        path
    }
}

/// Parent of a Windows path. A drive or root directory keeps its separator.
fn windows_parent(path: &str) -> PathBuf {
    let Some(idx) = path.rfind(['\\', '/']) else {
        return PathBuf::new();
    };
    let dir = &path[..idx];
    if dir.is_empty() || dir.ends_with(':') {
        PathBuf::from(&path[..=idx])
    } else {
        PathBuf::from(dir)
    }
}

/// Why no interpreter could be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No lookup produced a path.
    #[error("No companion interpreter found (tried: {})", .attempted.join(", "))]
    NotFound { attempted: Vec<String> },

    /// An interpreter was found but it is the wrong major version.
    #[error("{path} is Python {found}, but Python {required} is required")]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        required: u32,
    },

    /// The version query failed or its output could not be parsed.
    #[error("Could not determine the version of {path}: {output}")]
    VersionUnreadable { path: PathBuf, output: String },
}
