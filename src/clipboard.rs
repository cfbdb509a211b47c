//! Best-effort clipboard copy.
//!
//! Headless machines and SSH sessions usually have no clipboard. That is not
//! an error: the script is always printed to stdout regardless.

use tracing::debug;

/// Copy `text` to the system clipboard, logging instead of failing.
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => debug!(bytes = text.len(), "copied script to clipboard"),
        Err(e) => debug!(error = %e, "clipboard unavailable, skipping copy"),
    }
}
