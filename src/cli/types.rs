use clap::{Parser, Subcommand};
use spool::completions::Shell;
use spool::environment::clap_env_validator;
use spool::models::RestartPolicy;
use spool::validation::{
    clap_account_validator, clap_description_validator, clap_unit_validator,
    clap_working_directory_validator,
};

#[derive(Parser)]
#[command(name = "spool")]
#[command(about = "Turn ad-hoc commands into systemd unit install scripts", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a script that installs a command as a systemd service
    ///
    /// The command is taken from the trailing arguments, else from piped
    /// stdin, else from $EDITOR. The script is printed, never executed.
    Gen {
        /// Unit description (max 500 characters)
        #[arg(long, value_parser = clap_description_validator)]
        description: Option<String>,

        /// Name of the service [default: spool-temp-<uuid>]
        #[arg(short = 'n', long, value_parser = clap_unit_validator)]
        unit: Option<String>,

        /// Run service as user [default: current user]
        #[arg(long, value_parser = clap_account_validator)]
        user: Option<String>,

        /// Run service as group [default: same as --user]
        #[arg(long, value_parser = clap_account_validator)]
        group: Option<String>,

        /// Restart policy [default: no, or from config]
        #[arg(long, value_enum)]
        restart: Option<RestartPolicy>,

        /// Working directory ("." for the current one) [default: home]
        #[arg(long, value_parser = clap_working_directory_validator)]
        working_directory: Option<String>,

        /// Environment variable for the service (repeatable)
        #[arg(short = 'E', long, value_name = "NAME=VALUE", value_parser = clap_env_validator)]
        environment: Vec<String>,

        /// Install the service system-wide (default)
        #[arg(long)]
        system_wide: bool,

        /// Install the service for user sessions (systemctl --user)
        #[arg(long, conflicts_with = "system_wide")]
        user_wide: bool,

        /// Run the command through a shell (allows several lines and operators)
        #[arg(long)]
        shell: bool,

        /// Do not add an [Install] section
        #[arg(long)]
        no_install: bool,

        /// Overwrite the unit file if it already exists
        #[arg(long)]
        replace: bool,

        /// Add a command to enable the service
        #[arg(long)]
        enable: bool,

        /// Add commands to start the service, show its status and follow logs
        #[arg(long)]
        now: bool,

        /// Target machine may differ: skip PATH lookup, require absolute paths
        #[arg(long)]
        remote: bool,

        /// Do not copy the script to the clipboard
        #[arg(long)]
        no_copy: bool,

        /// Command to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Generate a script that stops, disables and removes a service
    Del {
        /// Name of the service
        #[arg(value_parser = clap_unit_validator)]
        unit: String,

        /// The service was installed system-wide (default)
        #[arg(long)]
        system_wide: bool,

        /// The service was installed for user sessions
        #[arg(long, conflicts_with = "system_wide")]
        user_wide: bool,

        /// Do not copy the script to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// `--system-wide` / `--user-wide` as an override of the configured scope
pub fn scope_override(system_wide: bool, user_wide: bool) -> Option<bool> {
    if user_wide {
        Some(false)
    } else if system_wide {
        Some(true)
    } else {
        None
    }
}
