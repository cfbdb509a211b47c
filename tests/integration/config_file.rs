//! Config file defaults flowing into generated scripts

use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use spool::commands::{del, gen};
use spool::config::{Config, CONFIG_ENV};

fn load_with(content: &str) -> Config {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    let config = Config::load();
    std::env::remove_var(CONFIG_ENV);

    config.expect("Failed to load config")
}

#[test]
#[serial]
fn test_user_wide_default_from_config() {
    let config = load_with("system_wide = false\nrestart = \"on-failure\"\nremote = true\n");

    let args = gen::GenArgs {
        unit: Some("sync".to_string()),
        command: vec!["/usr/bin/rsync".to_string(), "-a".to_string()],
        ..gen::GenArgs::default()
    };
    let script = gen::generate(&args, &config, Path::new("/"), || unreachable!()).unwrap();
    let lines = script.lines();

    assert!(lines[0].contains("tee '/etc/systemd/user/sync.service'"));
    assert!(lines[0].contains("Restart=on-failure\n"));
    assert!(!lines[0].contains("User="));
    assert_eq!(lines[1], "systemctl --user daemon-reload");
}

#[test]
#[serial]
fn test_flag_overrides_config_scope() {
    let config = load_with("system_wide = false\nremote = true\n");

    let args = gen::GenArgs {
        unit: Some("sync".to_string()),
        user: Some("backup".to_string()),
        system_wide: Some(true),
        command: vec!["/usr/bin/rsync".to_string()],
        ..gen::GenArgs::default()
    };
    let script = gen::generate(&args, &config, Path::new("/"), || unreachable!()).unwrap();

    assert!(script.lines()[0].contains("User=backup\nGroup=backup\n"));
    assert_eq!(script.lines()[1], "sudo systemctl daemon-reload");
}

#[test]
#[serial]
fn test_privilege_from_config_in_delete_script() {
    let config = load_with("sudo = \"doas\"\n");

    let script = del::generate("web", None, &config).unwrap();
    assert_eq!(
        script.to_string(),
        "doas systemctl disable --now 'web.service'\n\
         doas rm -f '/etc/systemd/system/web.service'\n\
         doas systemctl daemon-reload"
    );
}

#[test]
#[serial]
fn test_malformed_config_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "restart = [\n").unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    let result = Config::load();
    std::env::remove_var(CONFIG_ENV);

    assert!(result.is_err());
}
