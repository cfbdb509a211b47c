//! Quoted tokens read back by a real shell

use tempfile::TempDir;

use spool::command::{normalize, ExecutionMode};
use spool::shell::{quote, quote_join, split};

use super::helpers::*;

const HOSTILE: &[&str] = &[
    "plain",
    "two words",
    "it's",
    "''",
    "\"double\"",
    "$HOME",
    "${PATH:-x}",
    "`id`",
    "$(id)",
    "a;b",
    "a && b",
    "a | b",
    "*",
    "~",
    "back\\slash",
    "#comment",
    "\t",
    "",
];

#[test]
fn test_tokens_survive_real_shell() {
    let temp_dir = TempDir::new().unwrap();

    let script = format!("printf '%s\\n' {}", quote_join(HOSTILE));
    let output = sh_stdout(&script, temp_dir.path());

    let expected: String = HOSTILE.iter().map(|t| format!("{t}\n")).collect();
    assert_eq!(output, expected);
}

#[test]
fn test_newline_token_survives_real_shell() {
    let temp_dir = TempDir::new().unwrap();
    let token = "line one\nline 'two'\n";

    let output = sh_stdout(&format!("printf %s {}", quote(token)), temp_dir.path());
    assert_eq!(output, token);
}

#[test]
fn test_injection_payloads_are_inert() {
    let temp_dir = TempDir::new().unwrap();
    let payloads = [
        "'; touch pwned1; '",
        "$(touch pwned2)",
        "`touch pwned3`",
        "x\ntouch pwned4",
    ];

    let script = format!("printf '%s' {} > /dev/null", quote_join(payloads));
    let output = run_sh(&script, temp_dir.path());
    assert!(output.status.success());

    for marker in ["pwned1", "pwned2", "pwned3", "pwned4"] {
        assert!(
            !temp_dir.path().join(marker).exists(),
            "{marker} was created"
        );
    }
}

#[test]
fn test_split_agrees_with_quote() {
    let line = quote_join(HOSTILE);
    let words = split(&line).expect("quoted line must split");
    assert_eq!(words, HOSTILE);
}

#[test]
fn test_shell_mode_comment_does_not_hide_later_lines() {
    let temp_dir = TempDir::new().unwrap();
    let command = normalize(
        "# start the worker\ntouch first\n\n# and then\ntouch second\n",
        &remote_options(ExecutionMode::Shell),
    )
    .unwrap();

    let output = run_sh(&quote_join(command.argv()), temp_dir.path());
    assert!(output.status.success());
    assert!(temp_dir.path().join("first").exists());
    assert!(temp_dir.path().join("second").exists());
}
