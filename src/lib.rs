//! Companion - locate, provision and supervise a Python companion interpreter
//! for a desktop host application.
//!
//! The host lends two capabilities: [`host::HostPaths`] for its bundle and
//! user-data directories, and [`host::HostDialog`] for showing messages.
//! Everything else happens here:
//!
//! 1. [`assets`] copies bundled scripts to a writable directory on Windows
//! 2. [`interpreter`] finds a Python 3 executable per platform
//! 3. [`check`] runs the dependency-check script and turns its stderr into
//!    message boxes
//!
//! [`session::Session`] wires the three together.
//!
//! # Modules
//!
//! - [`assets`] - Bundled asset locations and provisioning
//! - [`check`] - Dependency-check subprocess supervision
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`decode`] - UTF-8 decoding of child process output
//! - [`error`] - Error types and result aliases
//! - [`host`] - Host capability traits
//! - [`interpreter`] - Interpreter discovery and version verification
//! - [`platform`] - Target operating system
//! - [`session`] - End-to-end flow
//! - [`ui`] - Terminal output and test doubles
//!
//! # Example
//!
//! ```
//! use companion::interpreter::runner::ScriptedRunner;
//! use companion::interpreter::PathResolver;
//! use companion::Platform;
//!
//! let runner = ScriptedRunner::new()
//!     .succeed("which python3", "/usr/local/bin/python3\n")
//!     .succeed("/usr/local/bin/python3 -V", "Python 3.12.2");
//!
//! let resolved = PathResolver::new(runner).resolve(Platform::MacOS).unwrap();
//! assert_eq!(resolved.binary_directory.to_str(), Some("/usr/local/bin"));
//! ```

pub mod assets;
pub mod check;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod host;
pub mod interpreter;
pub mod platform;
pub mod session;
pub mod ui;

pub use error::{CompanionError, Result};
pub use platform::Platform;
