//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for status output and, through its
//!   [`HostDialog`] supertrait, diagnostic message boxes
//! - [`TerminalUI`], which draws message boxes on the terminal when no GUI
//!   host is attached
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use companion::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet);
//! ui.show_header("Companion");
//! ui.success("Interpreter found");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, CompanionTheme};

use crate::host::HostDialog;

/// Trait for status output.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface: HostDialog {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a `key: value` detail line.
    fn detail(&mut self, key: &str, value: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);
}

/// Create the UI for the CLI.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
