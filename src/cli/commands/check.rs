//! Check command implementation.
//!
//! The `companion check` command provisions scripts, resolves the interpreter
//! and runs the dependency-check script. Diagnostics appear as message boxes;
//! the process exits with the script's own exit code.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::interpreter::{CommandRunner, SystemRunner};
use crate::session::{Session, SessionOutcome};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a, R = SystemRunner> {
    session: &'a Session<R>,
    args: CheckArgs,
}

impl<'a, R: CommandRunner> CheckCommand<'a, R> {
    /// Create a new check command.
    pub fn new(session: &'a Session<R>, args: CheckArgs) -> Self {
        Self { session, args }
    }
}

impl<R: CommandRunner> Command for CheckCommand<'_, R> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = match &self.args.script_dir {
            Some(dir) => self.session.run_check_in(dir, &mut *ui)?,
            None => self.session.run_check(&mut *ui)?,
        };

        match &outcome {
            SessionOutcome::Unavailable(e) => {
                ui.error(&format!("Dependency check skipped: {}", e));
            }
            SessionOutcome::Checked(check) if check.is_clean() => {
                ui.success("All companion modules available");
            }
            SessionOutcome::Checked(check) => {
                ui.warning(&format!(
                    "Dependency check reported {} message(s), exit code {}",
                    check.diagnostics.len(),
                    check
                        .exit_code
                        .map_or_else(|| "none".to_string(), |c| c.to_string())
                ));
            }
        }

        Ok(CommandResult::from_exit_code(outcome.exit_code()))
    }
}
