//! Command-line interface for the companion runtime.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, LocateArgs, ProvisionArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
