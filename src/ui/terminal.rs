//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::host::{HostDialog, MessageBox, PresentationError};

use super::{should_use_colors, CompanionTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout; message boxes are drawn on stderr so diagnostics
/// stay visible when stdout is piped.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: CompanionTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            CompanionTheme::new()
        } else {
            CompanionTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn detail(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "  {}", self.theme.format_field(key, value)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }
}

impl HostDialog for TerminalUI {
    fn show_message_box(&mut self, message: &MessageBox) -> Result<(), PresentationError> {
        let rendered = self.theme.format_box(&message.title, &message.message);
        writeln!(self.err, "{}", rendered).map_err(|e| PresentationError(e.to_string()))
    }

    fn write_document(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }
}
