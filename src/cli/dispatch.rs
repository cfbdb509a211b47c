use anyhow::Result;
use clap::CommandFactory;
use spool::commands::gen::GenArgs;
use spool::commands::{del, gen};
use spool::completions::generate_completions;

use super::types::{scope_override, Cli, Commands};

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Gen {
            description,
            unit,
            user,
            group,
            restart,
            working_directory,
            environment,
            system_wide,
            user_wide,
            shell,
            no_install,
            replace,
            enable,
            now,
            remote,
            no_copy,
            command,
        } => gen::execute(GenArgs {
            description,
            unit,
            user,
            group,
            restart,
            working_directory,
            environment,
            system_wide: scope_override(system_wide, user_wide),
            shell,
            no_install,
            replace,
            enable,
            now,
            remote,
            no_copy,
            command,
        }),
        Commands::Del {
            unit,
            system_wide,
            user_wide,
            no_copy,
        } => del::execute(unit, scope_override(system_wide, user_wide), no_copy),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut std::io::stdout());
            Ok(())
        }
    }
}
