//! Here-document embedding of file content into a write command.
//!
//! The content goes between two occurrences of a sentinel and is never
//! shell-quoted. The opening sentinel is quoted (`<<'EOF'`), so the shell
//! performs no expansion inside the body either.

use tracing::debug;
use uuid::Uuid;

use super::quote::quote;
use crate::error::{Result, SpoolError};

/// Sentinel used when the content does not already contain it.
pub const DEFAULT_SENTINEL: &str = "EOF";

/// Heredoc terminator that does not occur in the content it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel(String);

impl Sentinel {
    /// Pick a sentinel for `content`: `EOF`, or `EOF-<uuid>` when the content
    /// contains `EOF`.
    pub fn for_content(content: &str) -> Result<Self> {
        Self::for_content_with(content, || Uuid::new_v4().to_string())
    }

    /// Same as [`Sentinel::for_content`] with a caller-supplied suffix source.
    ///
    /// The suffix is requested at most once. A widened sentinel that still
    /// collides is an error rather than another attempt.
    pub fn for_content_with<F>(content: &str, suffix: F) -> Result<Self>
    where
        F: FnOnce() -> String,
    {
        let mut sentinel = DEFAULT_SENTINEL.to_string();
        if content.contains(&sentinel) {
            sentinel = format!("{DEFAULT_SENTINEL}-{}", suffix());
            debug!(sentinel = %sentinel, "content contains default sentinel, widened");
        }

        if content.contains(&sentinel) {
            return Err(SpoolError::SentinelCollision(sentinel));
        }

        Ok(Self(sentinel))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the content is written to its destination.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Privilege prefix (e.g. `sudo`) placed in front of the write command.
    pub privilege: Option<String>,
    /// When false the write only happens if the destination does not exist.
    pub overwrite: bool,
}

/// Build a command that writes `content` to `destination` via a heredoc.
///
/// Shape: `[test ! -e DEST &&] [sudo] tee DEST > /dev/null <<'SENTINEL'`,
/// then the content, then the sentinel on its own line. The destination is
/// quoted; the content is embedded verbatim.
pub fn inline_file(content: &str, destination: &str, options: &WriteOptions) -> Result<String> {
    let sentinel = Sentinel::for_content(content)?;
    Ok(render_inline_file(content, destination, options, &sentinel))
}

fn render_inline_file(
    content: &str,
    destination: &str,
    options: &WriteOptions,
    sentinel: &Sentinel,
) -> String {
    let target = quote(destination);

    let mut command = String::new();
    if !options.overwrite {
        command.push_str(&format!("test ! -e {target} && "));
    }
    if let Some(privilege) = &options.privilege {
        command.push_str(privilege);
        command.push(' ');
    }
    command.push_str(&format!("tee {target} > /dev/null <<'{sentinel}'\n"));
    command.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        command.push('\n');
    }
    command.push_str(sentinel.as_str());
    command
}
