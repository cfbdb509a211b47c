use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::validation::{validate_unit_name, validate_working_directory};

/// Prefix for generated unit names when none is given.
pub const GENERATED_UNIT_PREFIX: &str = "spool-temp";

/// Suffix systemd expects on service unit files.
pub const SERVICE_SUFFIX: &str = ".service";

/// Where the unit is installed and which manager instance controls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// `/etc/systemd/system`, controlled with `sudo systemctl`.
    #[default]
    System,
    /// `/etc/systemd/user`, controlled with `systemctl --user`.
    User,
}

impl Scope {
    pub fn from_system_wide(system_wide: bool) -> Self {
        if system_wide {
            Scope::System
        } else {
            Scope::User
        }
    }

    /// Directory the unit file is written to.
    pub fn unit_dir(self) -> &'static str {
        match self {
            Scope::System => "/etc/systemd/system",
            Scope::User => "/etc/systemd/user",
        }
    }

    /// Target referenced from `[Install] WantedBy=`.
    pub fn wanted_by(self) -> &'static str {
        match self {
            Scope::System => "multi-user.target",
            Scope::User => "default.target",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::System => write!(f, "system"),
            Scope::User => write!(f, "user"),
        }
    }
}

/// systemd `Restart=` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    #[default]
    No,
    OnSuccess,
    OnFailure,
    OnAbnormal,
    OnWatchdog,
    OnAbort,
    Always,
}

impl RestartPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RestartPolicy::No => "no",
            RestartPolicy::OnSuccess => "on-success",
            RestartPolicy::OnFailure => "on-failure",
            RestartPolicy::OnAbnormal => "on-abnormal",
            RestartPolicy::OnWatchdog => "on-watchdog",
            RestartPolicy::OnAbort => "on-abort",
            RestartPolicy::Always => "always",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the unit template needs besides the command and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    /// Unit name without the `.service` suffix.
    pub name: String,
    pub description: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    /// Value for `WorkingDirectory=`, already in systemd specifier form.
    pub working_directory: String,
    pub restart: RestartPolicy,
    /// Emit an `[Install]` section.
    pub install: bool,
    pub scope: Scope,
}

impl UnitDescriptor {
    /// `<name>.service`
    pub fn file_name(&self) -> String {
        format!("{}{SERVICE_SUFFIX}", self.name)
    }

    /// Absolute destination of the unit file.
    pub fn path(&self) -> String {
        Path::new(self.scope.unit_dir())
            .join(self.file_name())
            .display()
            .to_string()
    }
}

/// Unique throwaway unit name, e.g. `spool-temp-5f0c...`.
pub fn generate_unit_name() -> String {
    format!("{GENERATED_UNIT_PREFIX}-{}", uuid::Uuid::new_v4())
}

/// Accept `name` or `name.service`, validate, and return the bare name.
pub fn normalize_unit_name(raw: &str) -> Result<String> {
    let name = raw.strip_suffix(SERVICE_SUFFIX).unwrap_or(raw);
    validate_unit_name(name)?;
    Ok(name.to_string())
}

/// Map a `--working-directory` value to a systemd `WorkingDirectory=` value.
///
/// Unset means the home directory, `.` means `cwd`. The chosen path is
/// validated (a substituted `cwd` never went through argument parsing), then a
/// literal `%` is doubled so systemd does not read it as a specifier and `~`
/// becomes `%h`.
pub fn working_directory_value(raw: Option<&str>, cwd: &Path) -> Result<String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => "~".to_string(),
        Some(".") => cwd.display().to_string(),
        Some(other) => other.to_string(),
    };
    validate_working_directory(&raw)?;

    Ok(raw.replace('%', "%%").replace('~', "%h"))
}
