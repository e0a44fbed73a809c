//! Provision command implementation.

use crate::assets::ProvisionStatus;
use crate::cli::args::ProvisionArgs;
use crate::error::Result;
use crate::interpreter::{CommandRunner, SystemRunner};
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The provision command implementation.
pub struct ProvisionCommand<'a, R = SystemRunner> {
    session: &'a Session<R>,
    args: ProvisionArgs,
}

impl<'a, R: CommandRunner> ProvisionCommand<'a, R> {
    /// Create a new provision command.
    pub fn new(session: &'a Session<R>, args: ProvisionArgs) -> Self {
        Self { session, args }
    }
}

impl<R: CommandRunner> Command for ProvisionCommand<'_, R> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let kind = self.args.kind;
        let report = self.session.provision(kind)?;
        let target = report.location.writable_target_dir.display().to_string();

        match report.status {
            ProvisionStatus::NotRequired => ui.success(&format!(
                "{} assets run from the bundle on {}",
                kind,
                self.session.platform()
            )),
            ProvisionStatus::AlreadyPresent => {
                ui.success(&format!("{} assets already provisioned", kind))
            }
            ProvisionStatus::Copied => ui.success(&format!(
                "Provisioned {} {} file(s)",
                report.copied.len(),
                kind
            )),
        }
        ui.detail("location", &target);

        if ui.output_mode().shows_detail() {
            for file in &report.copied {
                ui.detail("copied", &file.display().to_string());
            }
        }

        Ok(CommandResult::success())
    }
}
