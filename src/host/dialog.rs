//! Message presentation.

use thiserror::Error;

/// Icon/severity of a message box.
///
/// Diagnostics are only ever informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
}

/// A modal message as the host's dialog system understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub title: String,
    pub kind: MessageKind,
    pub message: String,
    /// Button labels. Empty means acknowledge-only.
    pub buttons: Vec<String>,
}

impl MessageBox {
    /// Acknowledge-only informational message.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: MessageKind::Info,
            message: message.into(),
            buttons: Vec::new(),
        }
    }
}

/// The host could not show a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PresentationError(pub String);

/// Dialog capability of the host UI.
pub trait HostDialog {
    /// Show a modal message box.
    fn show_message_box(&mut self, message: &MessageBox) -> Result<(), PresentationError>;

    /// Write text straight into the host's main view.
    ///
    /// Used when `show_message_box` is unavailable; must not fail.
    fn write_document(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_has_no_buttons() {
        let msg = MessageBox::info("Python Modules?", "missing: numpy");
        assert_eq!(msg.kind, MessageKind::Info);
        assert!(msg.buttons.is_empty());
        assert_eq!(msg.message, "missing: numpy");
    }

    #[test]
    fn presentation_error_displays_reason() {
        let err = PresentationError("window destroyed".to_string());
        assert_eq!(err.to_string(), "window destroyed");
    }
}
