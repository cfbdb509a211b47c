//! Script composition.
//!
//! A generated script is a list of independent shell command lines:
//!
//! 1. heredoc write of the unit file
//! 2. `daemon-reload`
//! 3. enable / start (combined into `enable --now` when both are asked for)
//! 4. status and log-follow, only when the unit is started
//!
//! Nothing here executes commands or touches the filesystem.


use std::fmt;

use tracing::debug;

use crate::command::NormalizedCommand;
use crate::environment::EnvAssignment;
use crate::error::Result;
use crate::models::{Scope, UnitDescriptor};
use crate::render::UnitRenderer;
use crate::shell::{self, WriteOptions};

/// Privilege prefix used unless configured otherwise.
pub const DEFAULT_PRIVILEGE: &str = "sudo";

/// What to do with the unit once it is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activation {
    /// Enable the unit so it starts on boot/login.
    pub enable: bool,
    /// Start the unit right away and watch it.
    pub now: bool,
    /// Overwrite an existing unit file instead of refusing.
    pub replace: bool,
}

/// Final script text, one entry per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    lines: Vec<String>,
}

impl GeneratedScript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for GeneratedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Builds install scripts. Owns the unit renderer.
pub struct ScriptComposer {
    renderer: UnitRenderer,
    privilege: String,
}

impl ScriptComposer {
    pub fn new(renderer: UnitRenderer) -> Self {
        Self {
            renderer,
            privilege: DEFAULT_PRIVILEGE.to_string(),
        }
    }

    /// Use another privilege prefix, e.g. `doas`.
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privilege = privilege.into();
        self
    }

    /// Compose the install script for `unit` running `command`.
    ///
    /// Rendering and heredoc embedding both happen before any line is
    /// produced, so a failure yields no partial script.
    pub fn compose<I>(
        &self,
        unit: &UnitDescriptor,
        command: &NormalizedCommand,
        environment: I,
        activation: Activation,
    ) -> Result<GeneratedScript>
    where
        I: IntoIterator<Item = Result<EnvAssignment>>,
    {
        let body = self.renderer.render_unit(unit, command, environment)?;
        debug!(unit = %unit.name, bytes = body.len(), "rendered unit file");

        let write = shell::inline_file(
            &body,
            &unit.path(),
            &WriteOptions {
                privilege: Some(self.privilege.clone()),
                overwrite: activation.replace,
            },
        )?;

        let mut lines = vec![write];
        lines.extend(control_commands(
            &unit.file_name(),
            unit.scope,
            activation,
            &self.privilege,
        ));

        Ok(GeneratedScript { lines })
    }
}

/// Script that stops, disables and removes a unit, then reloads the manager.
pub fn delete_script(unit_name: &str, scope: Scope, privilege: &str) -> GeneratedScript {
    let file_name = format!("{unit_name}{}", crate::models::unit::SERVICE_SUFFIX);
    let path = format!("{}/{file_name}", scope.unit_dir());
    let systemctl = systemctl(scope, privilege);

    GeneratedScript {
        lines: vec![
            format!("{systemctl} disable --now {}", shell::quote(&file_name)),
            format!("{privilege} rm -f {}", shell::quote(&path)),
            format!("{systemctl} daemon-reload"),
        ],
    }
}

/// Service-manager lines that follow the unit file write.
pub fn control_commands(
    unit_file: &str,
    scope: Scope,
    activation: Activation,
    privilege: &str,
) -> Vec<String> {
    let systemctl = systemctl(scope, privilege);
    let unit = shell::quote(unit_file);

    let mut lines = vec![format!("{systemctl} daemon-reload")];

    match (activation.enable, activation.now) {
        (true, true) => lines.push(format!("{systemctl} enable --now {unit}")),
        (false, true) => lines.push(format!("{systemctl} start {unit}")),
        (true, false) => lines.push(format!("{systemctl} enable {unit}")),
        (false, false) => {}
    }

    if activation.now {
        lines.push(format!("{systemctl} status --no-pager --lines=0 {unit}"));
        lines.push(follow_logs(scope, privilege, &unit));
    }

    lines
}

fn systemctl(scope: Scope, privilege: &str) -> String {
    match scope {
        Scope::System => format!("{privilege} systemctl"),
        Scope::User => "systemctl --user".to_string(),
    }
}

fn follow_logs(scope: Scope, privilege: &str, quoted_unit: &str) -> String {
    match scope {
        Scope::System => format!("{privilege} journalctl -u {quoted_unit} -f"),
        Scope::User => format!("journalctl --user-unit {quoted_unit} -f"),
    }
}
