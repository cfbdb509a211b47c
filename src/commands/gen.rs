//! `spool gen`: build an install script for a command.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::clipboard::copy_to_clipboard;
use crate::command::{normalize, normalize_argv, ExecutionMode, NormalizeOptions, Resolution};
use crate::config::Config;
use crate::environment::validate_assignments;
use crate::error::SpoolError;
use crate::input::read_command_input;
use crate::models::{
    generate_unit_name, normalize_unit_name, working_directory_value, RestartPolicy, Scope,
    UnitDescriptor,
};
use crate::render::UnitRenderer;
use crate::script::{Activation, GeneratedScript, ScriptComposer};
use crate::validation::{validate_account_name, validate_description, validate_working_directory};

/// Options for `spool gen`, as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct GenArgs {
    pub description: Option<String>,
    pub unit: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub restart: Option<RestartPolicy>,
    pub working_directory: Option<String>,
    pub environment: Vec<String>,
    /// `Some(true)` for `--system-wide`, `Some(false)` for `--user-wide`.
    pub system_wide: Option<bool>,
    pub shell: bool,
    pub no_install: bool,
    pub replace: bool,
    pub enable: bool,
    pub now: bool,
    pub remote: bool,
    pub no_copy: bool,
    /// Command given on the command line; empty means read it interactively.
    pub command: Vec<String>,
}

/// Entry point for `spool gen`.
pub fn execute(args: GenArgs) -> Result<()> {
    let config = Config::load()?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let script = generate(&args, &config, &cwd, read_command_input)?;
    let text = script.to_string();

    println!("{text}");

    if config.copy_to_clipboard && !args.no_copy {
        copy_to_clipboard(&text);
    }

    Ok(())
}

/// Validate everything and compose the script.
///
/// `read_input` is only called when no command was given as arguments, and
/// only after option and unit name checks have passed.
pub fn generate<F>(
    args: &GenArgs,
    config: &Config,
    cwd: &Path,
    read_input: F,
) -> Result<GeneratedScript>
where
    F: FnOnce() -> Result<String>,
{
    let scope = Scope::from_system_wide(args.system_wide.unwrap_or(config.system_wide));
    let install = !args.no_install;

    check_conflicts(args, scope, install)?;

    let name = match &args.unit {
        Some(unit) => normalize_unit_name(unit)?,
        None => generate_unit_name(),
    };

    check_fields(args)?;
    let (user, group) = run_as(args, scope)?;

    let options = NormalizeOptions {
        mode: if args.shell {
            ExecutionMode::Shell
        } else {
            ExecutionMode::Direct
        },
        resolution: if args.remote || config.remote {
            Resolution::Remote
        } else {
            Resolution::Local
        },
        shell: config.shell.clone(),
    };

    let command = if args.command.is_empty() {
        let input = read_input()?;
        normalize(&input, &options)?
    } else {
        normalize_argv(args.command.iter().cloned(), &options)?
    };
    debug!(program = command.program(), argv = ?command.argv(), "normalized command");

    let unit = UnitDescriptor {
        name,
        description: args.description.clone(),
        user,
        group,
        working_directory: working_directory_value(args.working_directory.as_deref(), cwd)?,
        restart: args.restart.unwrap_or(config.restart),
        install,
        scope,
    };

    let composer = ScriptComposer::new(UnitRenderer::new()?).with_privilege(config.sudo.clone());
    let script = composer.compose(
        &unit,
        &command,
        validate_assignments(&args.environment),
        Activation {
            enable: args.enable,
            now: args.now,
            replace: args.replace,
        },
    )?;

    info!(unit = %unit.name, scope = %unit.scope, "generated install script");
    Ok(script)
}

fn check_conflicts(args: &GenArgs, scope: Scope, install: bool) -> Result<(), SpoolError> {
    let conflict = |message: &str| -> Result<(), SpoolError> {
        Err(SpoolError::ConflictingOptions(message.to_string()))
    };

    if scope == Scope::User && args.user.is_some() {
        return conflict("--user cannot be combined with --user-wide");
    }
    if scope == Scope::User && args.group.is_some() {
        return conflict("--group cannot be combined with --user-wide");
    }
    if args.enable && !install {
        return conflict("--enable requires the [Install] section (drop --no-install)");
    }
    if args.enable && args.unit.is_none() {
        return conflict("--enable requires a unit name (set with --unit)");
    }

    Ok(())
}

/// Values that land in the unit file verbatim. The CLI checks these while
/// parsing; library callers go through here.
fn check_fields(args: &GenArgs) -> Result<(), SpoolError> {
    if let Some(description) = &args.description {
        validate_description(description)?;
    }
    for account in args.user.iter().chain(args.group.iter()) {
        validate_account_name(account)?;
    }
    if let Some(dir) = &args.working_directory {
        validate_working_directory(dir)?;
    }
    Ok(())
}

/// Resolve `User=`/`Group=`: system units default to the invoking user, and
/// the group defaults to the user. User units run as their owner.
fn run_as(args: &GenArgs, scope: Scope) -> Result<(Option<String>, Option<String>)> {
    if scope == Scope::User {
        return Ok((None, None));
    }

    let user = match &args.user {
        Some(user) => user.clone(),
        None => current_user()?,
    };
    let group = args.group.clone().unwrap_or_else(|| user.clone());

    Ok((Some(user), Some(group)))
}

fn current_user() -> Result<String> {
    let uid = nix::unistd::getuid();
    let user = nix::unistd::User::from_uid(uid)
        .context("Failed to look up current user")?
        .with_context(|| format!("No passwd entry for uid {uid}; pass --user"))?;
    Ok(user.name)
}
