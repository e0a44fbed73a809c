//! Mock UI implementation for testing.
//!
//! `MockUI` implements both [`UserInterface`] and [`HostDialog`] and captures
//! every interaction for later assertion. It can be told to refuse message
//! boxes, to exercise the document fallback.
//!
//! # Example
//!
//! ```
//! use companion::host::{HostDialog, MessageBox};
//! use companion::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.warning("Dependency check reported 1 message(s)");
//! ui.show_message_box(&MessageBox::info("Python Modules?", "missing: numpy")).unwrap();
//!
//! assert!(ui.has_warning("1 message"));
//! assert_eq!(ui.message_boxes()[0].message, "missing: numpy");
//! ```

use crate::host::{HostDialog, MessageBox, PresentationError};

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    details: Vec<(String, String)>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    message_boxes: Vec<MessageBox>,
    documents: Vec<String>,
    dialog_failure: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Make every `show_message_box` call fail with `reason`.
    pub fn fail_message_boxes(&mut self, reason: &str) {
        self.dialog_failure = Some(reason.to_string());
    }

    /// Get all captured key/value details.
    pub fn details(&self) -> &[(String, String)] {
        &self.details
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all message boxes that were shown.
    pub fn message_boxes(&self) -> &[MessageBox] {
        &self.message_boxes
    }

    /// Get all text written through the document fallback.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn detail(&mut self, key: &str, value: &str) {
        self.details.push((key.to_string(), value.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}

impl HostDialog for MockUI {
    fn show_message_box(&mut self, message: &MessageBox) -> Result<(), PresentationError> {
        if let Some(reason) = &self.dialog_failure {
            return Err(PresentationError(reason.clone()));
        }
        self.message_boxes.push(message.clone());
        Ok(())
    }

    fn write_document(&mut self, text: &str) {
        self.documents.push(text.to_string());
    }
}
