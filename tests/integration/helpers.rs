//! Shared helpers for running generated shell text

use std::path::Path;
use std::process::{Command, Output};

use spool::command::{ExecutionMode, NormalizeOptions, Resolution};

/// Run `script` with `sh -c` inside `cwd`
pub fn run_sh(script: &str, cwd: &Path) -> Output {
    Command::new("sh")
        .arg("-c")
        .arg(script)
        .current_dir(cwd)
        .output()
        .expect("Failed to run sh")
}

/// Stdout of a successful `sh -c` run
pub fn sh_stdout(script: &str, cwd: &Path) -> String {
    let output = run_sh(script, cwd);
    assert!(
        output.status.success(),
        "sh failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("sh output is not UTF-8")
}

/// Normalization options that never touch the local PATH
pub fn remote_options(mode: ExecutionMode) -> NormalizeOptions {
    NormalizeOptions {
        mode,
        resolution: Resolution::Remote,
        ..NormalizeOptions::default()
    }
}

/// Split a heredoc write command into (header line, body, closing sentinel)
pub fn split_heredoc(write: &str) -> (&str, &str, &str) {
    let (header, rest) = write.split_once('\n').expect("heredoc has no body");
    let (body, sentinel) = rest.rsplit_once('\n').expect("heredoc has no terminator");
    (header, body, sentinel)
}
