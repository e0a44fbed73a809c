//! Error types for companion operations.
//!
//! This module defines [`CompanionError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Interpreter lookup failures are
//!   [`ResolveError`](crate::interpreter::ResolveError)s and are reported
//!   as "feature unavailable" rather than fatal
//! - Provisioning and spawn failures are surfaced as `CompanionError`
//! - Use `anyhow::Error` (via `CompanionError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for companion operations.
#[derive(Debug, Error)]
pub enum CompanionError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A host directory could not be determined.
    #[error("Cannot determine {what} directory")]
    HostPathUnavailable { what: &'static str },

    /// Bundled assets could not be copied to the writable location.
    #[error("Failed to provision assets into {target}: {}", .failures.join("; "))]
    Provisioning {
        target: PathBuf,
        failures: Vec<String>,
    },

    /// The interpreter could not be started for the dependency check.
    #[error("Failed to start {program}: {source}")]
    CheckSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CompanionError.
pub type Result<T> = std::result::Result<T, CompanionError>;
