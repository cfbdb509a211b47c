//! Full install scripts built through the library API

use std::path::Path;

use spool::command::{normalize, ExecutionMode};
use spool::commands::gen::{generate, GenArgs};
use spool::config::Config;
use spool::environment::validate_assignments;
use spool::models::{RestartPolicy, Scope, UnitDescriptor};
use spool::render::UnitRenderer;
use spool::script::{Activation, ScriptComposer};
use spool::shell::split;
use spool::SpoolError;

use super::helpers::*;

fn descriptor(scope: Scope) -> UnitDescriptor {
    UnitDescriptor {
        name: "web".to_string(),
        description: Some("100% uptime".to_string()),
        user: None,
        group: None,
        working_directory: "%h".to_string(),
        restart: RestartPolicy::Always,
        install: true,
        scope,
    }
}

fn unit_line<'a>(body: &'a str, key: &str) -> Vec<&'a str> {
    body.lines()
        .filter_map(|line| line.strip_prefix(key))
        .collect()
}

#[test]
fn test_full_system_script_order() {
    let composer = ScriptComposer::new(UnitRenderer::new().unwrap());
    let command = normalize(
        "/usr/bin/env 'it'\\''s' \"$HOME\"",
        &remote_options(ExecutionMode::Direct),
    )
    .unwrap();

    let script = composer
        .compose(
            &descriptor(Scope::System),
            &command,
            validate_assignments(["GREETING=hello world", "RATIO=50%"]),
            Activation {
                enable: true,
                now: true,
                replace: false,
            },
        )
        .unwrap();

    let lines = script.lines();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with(
        "test ! -e '/etc/systemd/system/web.service' && sudo tee '/etc/systemd/system/web.service'"
    ));
    assert_eq!(lines[1], "sudo systemctl daemon-reload");
    assert_eq!(lines[2], "sudo systemctl enable --now 'web.service'");
    assert_eq!(
        lines[3],
        "sudo systemctl status --no-pager --lines=0 'web.service'"
    );
    assert_eq!(lines[4], "sudo journalctl -u 'web.service' -f");

    let (_, body, _) = split_heredoc(&lines[0]);
    assert_eq!(unit_line(body, "Description="), vec!["100%% uptime"]);
    assert_eq!(
        unit_line(body, "Environment="),
        vec!["'GREETING=hello world'", "'RATIO=50%%'"]
    );

    let exec = unit_line(body, "ExecStart=")[0];
    assert_eq!(
        split(exec).unwrap(),
        vec!["/usr/bin/env", "it's", "$$HOME"]
    );
}

#[test]
fn test_shell_mode_script_via_gen() {
    let args = GenArgs {
        unit: Some("worker".to_string()),
        user: Some("app".to_string()),
        shell: true,
        remote: true,
        ..GenArgs::default()
    };
    let script = generate(&args, &Config::default(), Path::new("/srv"), || {
        Ok("cd /srv/app\n\nexec ./run --flag 'x y'\n".to_string())
    })
    .unwrap();

    let (_, body, _) = split_heredoc(&script.lines()[0]);
    let exec = unit_line(body, "ExecStart=")[0];
    assert_eq!(
        split(exec).unwrap(),
        vec!["/bin/sh", "-c", "cd /srv/app ; exec ./run --flag 'x y'"]
    );
    assert_eq!(script.lines().len(), 2);
}

#[test]
fn test_user_scope_script() {
    let composer = ScriptComposer::new(UnitRenderer::new().unwrap()).with_privilege("doas");
    let command = normalize("/bin/true", &remote_options(ExecutionMode::Direct)).unwrap();

    let script = composer
        .compose(
            &descriptor(Scope::User),
            &command,
            Vec::new(),
            Activation {
                enable: false,
                now: true,
                replace: true,
            },
        )
        .unwrap();

    let lines = script.lines();
    assert!(lines[0].starts_with("doas tee '/etc/systemd/user/web.service'"));
    assert!(lines[0].contains("WantedBy=default.target\n"));
    assert_eq!(lines[1], "systemctl --user daemon-reload");
    assert_eq!(lines[2], "systemctl --user start 'web.service'");
    assert_eq!(lines[4], "journalctl --user-unit 'web.service' -f");
}

#[test]
fn test_invalid_environment_yields_no_script() {
    let composer = ScriptComposer::new(UnitRenderer::new().unwrap());
    let command = normalize("/bin/true", &remote_options(ExecutionMode::Direct)).unwrap();

    let result = composer.compose(
        &descriptor(Scope::System),
        &command,
        validate_assignments(["GOOD=1", "BAD NAME=2"]),
        Activation::default(),
    );

    assert_eq!(
        result.unwrap_err(),
        SpoolError::InvalidName("BAD NAME".to_string())
    );
}

#[test]
fn test_heredoc_body_never_contains_sentinel() {
    let args = GenArgs {
        unit: Some("echo".to_string()),
        user: Some("app".to_string()),
        remote: true,
        command: vec!["/bin/echo".to_string(), "EOF".to_string()],
        ..GenArgs::default()
    };
    let script = generate(&args, &Config::default(), Path::new("/"), || {
        unreachable!("command given as arguments")
    })
    .unwrap();

    let (header, body, sentinel) = split_heredoc(&script.lines()[0]);
    assert!(sentinel.starts_with("EOF-"));
    assert!(header.ends_with(&format!("<<'{sentinel}'")));
    assert!(body.lines().all(|line| line != sentinel));
}
