//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, CompanionConfig};
use crate::error::Result;
use crate::host::DesktopHostPaths;
use crate::platform::Platform;
use crate::session::Session;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for status output and diagnostic dialogs
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result carrying a child's exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }

    /// Status byte for the process exit.
    ///
    /// Codes outside `0..=255`, such as negative Windows crash statuses,
    /// become 1 so they never read as success.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    session: Session,
}

impl CommandDispatcher {
    /// Create a dispatcher around an existing session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load configuration and build the session the global flags describe.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = apply_overrides(load_config(cli.config.as_deref())?, cli);
        let platform = cli.platform.unwrap_or_else(Platform::current);

        let paths = DesktopHostPaths::new(config.app_name.as_str())
            .with_user_data_dir(config.user_data_dir.clone())
            .with_bundle_dir(config.bundle_dir.clone());

        tracing::debug!("Session for {} with config {:?}", platform, config);
        Ok(Self::new(Session::new(config, Box::new(paths), platform)))
    }

    /// Get the session commands run against.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Locate(args) => {
                super::locate::LocateCommand::new(&self.session, args.clone()).execute(ui)
            }
            Commands::Provision(args) => {
                super::provision::ProvisionCommand::new(&self.session, args.clone()).execute(ui)
            }
            Commands::Paths => super::paths::PathsCommand::new(&self.session).execute(ui),
            Commands::Check(args) => {
                super::check::CheckCommand::new(&self.session, args.clone()).execute(ui)
            }
        }
    }
}

/// Command-line flags win over every config file.
fn apply_overrides(mut config: CompanionConfig, cli: &Cli) -> CompanionConfig {
    if let Some(dir) = &cli.bundle_dir {
        config.bundle_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.user_data_dir {
        config.user_data_dir = Some(dir.clone());
    }
    config
}
