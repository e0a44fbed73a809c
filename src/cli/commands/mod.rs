//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and runs against the
//! [`Session`](crate::session::Session) that [`CommandDispatcher`] builds from
//! the global flags and configuration.

pub mod check;
pub mod dispatcher;
pub mod locate;
pub mod paths;
pub mod provision;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
