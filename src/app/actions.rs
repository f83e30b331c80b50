//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler only mutates [`AppState`](crate::app::AppState). Anything
//! that has to reach Zellij is returned as an [`Action`] and executed by the
//! plugin shim in `main.rs`.

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit (pressing 'q' on the list).
    CloseFocus,
}
