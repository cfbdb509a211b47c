//! Raw command input: standard input or an interactive editor.
//!
//! Both reads block until the operator is done (end of input, or the editor
//! exits). There is no timeout.

use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Read};
use std::process::Command;
use tracing::debug;

use crate::shell;

/// Editor used when neither `$VISUAL` nor `$EDITOR` is set.
pub const FALLBACK_EDITOR: &str = "vi";

/// Read the command from stdin when it is piped, otherwise from an editor.
pub fn read_command_input() -> Result<String> {
    if std::io::stdin().is_terminal() {
        read_from_editor()
    } else {
        read_from_stdin()
    }
}

/// Read all of standard input.
pub fn read_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read command from stdin")?;
    debug!(bytes = buffer.len(), "read command from stdin");
    Ok(buffer)
}

/// Open an empty temporary file in the operator's editor and return what
/// they saved.
pub fn read_from_editor() -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("spool-")
        .suffix(".sh")
        .tempfile()
        .context("Failed to create temporary file for editor")?;

    let editor = editor_command();
    let mut words = shell::split(&editor)
        .filter(|words| !words.is_empty())
        .with_context(|| format!("Could not parse editor command '{editor}'"))?;
    let program = words.remove(0);

    debug!(editor = %editor, path = %file.path().display(), "opening editor");
    let status = Command::new(&program)
        .args(&words)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to launch editor '{program}'"))?;

    if !status.success() {
        bail!("Editor '{editor}' exited with {status}");
    }

    std::fs::read_to_string(file.path())
        .with_context(|| format!("Failed to read {}", file.path().display()))
}

/// `$VISUAL`, then `$EDITOR`, then [`FALLBACK_EDITOR`].
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}
