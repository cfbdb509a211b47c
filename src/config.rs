//! User defaults from `config.toml`.
//!
//! Looked up at `$SPOOL_CONFIG`, else `<config dir>/spool/config.toml`.
//! A missing file means built-in defaults; a malformed one is an error.
//!
//! ```toml
//! restart = "on-failure"
//! shell = "/bin/bash"
//! remote = false
//! system_wide = true
//! copy_to_clipboard = true
//! sudo = "doas"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::command::DEFAULT_SHELL;
use crate::models::RestartPolicy;
use crate::script::DEFAULT_PRIVILEGE;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SPOOL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default `Restart=` policy.
    pub restart: RestartPolicy,
    /// Interpreter for `--shell` commands.
    pub shell: String,
    /// Treat every target as remote (no local PATH lookup).
    pub remote: bool,
    /// Install system-wide unless `--user-wide` is given.
    pub system_wide: bool,
    /// Copy generated scripts to the clipboard.
    pub copy_to_clipboard: bool,
    /// Command used to gain privileges.
    pub sudo: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restart: RestartPolicy::No,
            shell: DEFAULT_SHELL.to_string(),
            remote: false,
            system_wide: true,
            copy_to_clipboard: true,
            sudo: DEFAULT_PRIVILEGE.to_string(),
        }
    }
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !Path::new(&self.shell).is_absolute() {
            bail!("Config 'shell' must be an absolute path, got '{}'", self.shell);
        }

        // Inserted verbatim into every privileged line
        let plain_word = !self.sudo.is_empty()
            && self
                .sudo
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'));
        if !plain_word {
            bail!(
                "Config 'sudo' must be a plain command name or path, got '{}'",
                self.sudo
            );
        }

        Ok(())
    }
}

/// Config file location: `$SPOOL_CONFIG` or the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("spool").join("config.toml"))
}
