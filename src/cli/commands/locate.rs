//! Locate command implementation.
//!
//! The `companion locate` command resolves the interpreter and prints it.

use crate::cli::args::LocateArgs;
use crate::error::{CompanionError, Result};
use crate::interpreter::{CommandRunner, SystemRunner};
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The locate command implementation.
pub struct LocateCommand<'a, R = SystemRunner> {
    session: &'a Session<R>,
    args: LocateArgs,
}

impl<'a, R: CommandRunner> LocateCommand<'a, R> {
    /// Create a new locate command.
    pub fn new(session: &'a Session<R>, args: LocateArgs) -> Self {
        Self { session, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LocateArgs {
        &self.args
    }
}

impl<R: CommandRunner> Command for LocateCommand<'_, R> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = match self.session.locate() {
            Ok(resolved) => resolved,
            Err(e) => {
                ui.error(&format!("No compatible interpreter: {}", e));
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&resolved)
                .map_err(|e| CompanionError::Other(e.into()))?;
            ui.write_document(&json);
            return Ok(CommandResult::success());
        }

        ui.success(&format!(
            "Found {} for {}",
            resolved.binary_path.display(),
            self.session.platform()
        ));
        ui.detail("directory", &resolved.binary_directory.display().to_string());
        ui.detail("delimiter", &resolved.path_delimiter.to_string());
        Ok(CommandResult::success())
    }
}
