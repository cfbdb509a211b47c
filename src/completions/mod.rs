//! Shell completion scripts for the `spool` command line.

use clap::Command;
use std::io::Write;

pub use clap_complete::Shell;

/// Write the completion script for `cmd` in `shell`'s dialect to `out`.
///
/// ```no_run
/// use clap::Command;
/// use spool::completions::{generate_completions, Shell};
///
/// let mut cmd = Command::new("spool");
/// generate_completions(&mut cmd, Shell::Bash, &mut std::io::stdout());
/// ```
pub fn generate_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, bin_name, out);
}
