//! Heredoc write commands executed against a temp directory

use std::fs;
use tempfile::TempDir;

use spool::shell::{inline_file, WriteOptions, DEFAULT_SENTINEL};

use super::helpers::*;

fn no_privilege(overwrite: bool) -> WriteOptions {
    WriteOptions {
        privilege: None,
        overwrite,
    }
}

#[test]
fn test_content_written_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("it's a unit.service");
    let content = "[Service]\nExecStart='/bin/echo' '$HOME' '`id`'\nEnvironment='A=$(id)'\n";

    let write = inline_file(content, dest.to_str().unwrap(), &no_privilege(false)).unwrap();
    let output = run_sh(&write, temp_dir.path());

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&dest).unwrap(), content);
}

#[test]
fn test_content_with_default_sentinel_line() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("unit.service");
    let content = "first\nEOF\ntouch pwned\n";

    let write = inline_file(content, dest.to_str().unwrap(), &no_privilege(false)).unwrap();
    let (header, body, sentinel) = split_heredoc(&write);

    assert_ne!(sentinel, DEFAULT_SENTINEL);
    assert!(header.ends_with(&format!("<<'{sentinel}'")));
    assert_eq!(format!("{body}\n"), content);

    let output = run_sh(&write, temp_dir.path());
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&dest).unwrap(), content);
    assert!(!temp_dir.path().join("pwned").exists());
}

#[test]
fn test_existing_file_is_kept_without_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("unit.service");
    fs::write(&dest, "original\n").unwrap();

    let write = inline_file("new\n", dest.to_str().unwrap(), &no_privilege(false)).unwrap();
    let output = run_sh(&write, temp_dir.path());

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "original\n");
}

#[test]
fn test_existing_file_is_replaced_with_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("unit.service");
    fs::write(&dest, "original\n").unwrap();

    let write = inline_file("new\n", dest.to_str().unwrap(), &no_privilege(true)).unwrap();
    let output = run_sh(&write, temp_dir.path());

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "new\n");
}

#[test]
fn test_missing_trailing_newline_is_added() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("unit.service");

    let write = inline_file("no newline", dest.to_str().unwrap(), &no_privilege(false)).unwrap();
    run_sh(&write, temp_dir.path());

    assert_eq!(fs::read_to_string(&dest).unwrap(), "no newline\n");
}
