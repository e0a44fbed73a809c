//! Paths command implementation.

use crate::assets::AssetKind;
use crate::error::Result;
use crate::interpreter::{CommandRunner, SystemRunner};
use crate::session::Session;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints bundled and runnable directories for every asset kind.
pub struct PathsCommand<'a, R = SystemRunner> {
    session: &'a Session<R>,
}

impl<'a, R: CommandRunner> PathsCommand<'a, R> {
    pub fn new(session: &'a Session<R>) -> Self {
        Self { session }
    }
}

impl<R: CommandRunner> Command for PathsCommand<'_, R> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        for kind in AssetKind::ALL {
            let location = self.session.location(kind)?;
            ui.show_header(&format!("{} ({})", kind, self.session.platform()));
            ui.detail("bundled", &location.bundled_source_dir.display().to_string());
            ui.detail("runs from", &location.writable_target_dir.display().to_string());
        }
        Ok(CommandResult::success())
    }
}
