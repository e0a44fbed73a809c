//! Capabilities the host application lends to the companion runtime.
//!
//! The crate never reaches for a window or an application object directly;
//! callers hand in a [`HostPaths`] for directory lookups and a [`HostDialog`]
//! for showing diagnostics.
//!
//! - [`paths`] - Bundle and user-data directory providers
//! - [`dialog`] - Message box description and presentation trait

pub mod dialog;
pub mod paths;

pub use dialog::{HostDialog, MessageBox, MessageKind, PresentationError};
pub use paths::{DesktopHostPaths, FixedHostPaths, HostPaths};
