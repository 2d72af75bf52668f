//! System clipboard backed by `arboard`.

use content_studio_ui::Clipboard;

use crate::AppError;

/// Clipboard of the current desktop session.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Opens the system clipboard.
    ///
    /// # Errors
    /// Returns [`AppError::Output`] when no clipboard is available (for
    /// example on a headless host).
    pub fn new() -> Result<Self, AppError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|error| AppError::Output(format!("clipboard unavailable: {error}")))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        self.inner.set_text(text).map_err(|error| error.to_string())
    }
}
