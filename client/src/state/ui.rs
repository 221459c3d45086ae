//! Shared page chrome state.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns (the global error banner and the
//! sidebar toggle) out of session state so screens can report failures
//! without touching authentication.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state shared by the shell and every screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Message shown in the global error banner, if any.
    pub error: Option<String>,
    pub sidebar_open: bool,
}

impl UiState {
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.trim().is_empty() {
            return;
        }
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
