//! The `sudoplot` binary end to end, without hardware.

use std::path::Path;
use std::process::{Command, Output};

use sudoplot_config::{CONFIG_PATH_VAR, PORT_VAR, PUZZLE_VAR};
use tempfile::tempdir;

use crate::common::write_config;

fn sudoplot(home: &Path, config: &Path, envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sudoplot"));
    command
        .env("HOME", home)
        .env(CONFIG_PATH_VAR, config)
        .env("RUST_LOG", "warn")
        .env_remove(PORT_VAR)
        .env_remove(PUZZLE_VAR);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn prints_program_without_port() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "puzzle = 0\n");
    let output = sudoplot(dir.path(), &config, &[]);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines.first(),
        Some(&"; Wipe the board clean with the eraser side of the carriage")
    );
    assert_eq!(lines.last(), Some(&"G4 P300.0"));
    assert!(lines.contains(&"G1 X27 Y300"));
    assert!(!stdout.contains("<<"));
}

#[test]
fn toggles_and_origin_from_config() {
    let dir = tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "puzzle = 1\n[origin]\nx = 30\ny = 10\n[draw]\nnumbers = false\nwipe = false\nstart_end = false\n",
    );
    let output = sudoplot(dir.path(), &config, &[]);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(&lines[..3], &["M106 S70.0", "G4 P60.0", "G1 X30 Y290"]);
    assert!(!stdout.contains(';'));
}

#[test]
fn puzzle_env_overrides_file() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "puzzle = 0\n");
    let output = sudoplot(dir.path(), &config, &[(PUZZLE_VAR, "99")]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("puzzle index 99"), "{stderr}");
}

#[test]
fn overflow_exits_nonzero_with_no_output() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "puzzle = 0\n[origin]\nx = 60\n");
    let output = sudoplot(dir.path(), &config, &[]);

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_config_is_configuration_error() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[pen\nup = 70\n");
    let output = sudoplot(dir.path(), &config, &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unopenable_port_fails_before_sending() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "puzzle = 0\n");
    let missing = dir.path().join("no-such-tty");
    let output = sudoplot(
        dir.path(),
        &config,
        &[(PORT_VAR, missing.to_str().unwrap())],
    );

    assert_eq!(output.status.code(), Some(6));
    assert!(output.stdout.is_empty());
}

#[test]
fn writes_log_file_under_home() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "puzzle = 0\n");
    let output = sudoplot(dir.path(), &config, &[("RUST_LOG", "info")]);

    assert!(output.status.success());
    let log = std::fs::read_to_string(dir.path().join(".sudoplot/logs/sudoplot.log")).unwrap();
    assert!(log.contains("Program assembled"), "{log}");
}
