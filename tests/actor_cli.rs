/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

mod common;

use common::*;

#[test]
fn actor_command_prints_json_line() {
    let dirs = prepare_test_dirs();
    write_config(&dirs.config_path, Some("Hello"), 0);

    let output = run_cli(&dirs, &["actor", "42"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    assert_eq!(
        stdout.trim_end(),
        r#"{"actorId":"42","firstName":"First42","lastName":"Last42. Hello"}"#
    );
}

#[test]
fn show_options_reports_run_settings_from_config() {
    let dirs = prepare_test_dirs();
    write_config(&dirs.config_path, None, 7);

    let output = run_cli(&dirs, &["--show-options", "run", "127.0.0.1:9999"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    assert!(stdout.contains("bind:             127.0.0.1:9999"));
    assert!(stdout.contains("refresh interval: 7"));
}

#[test]
fn missing_config_path_is_reported() {
    let dirs = prepare_test_dirs();

    let output = run_cli(&dirs, &["actor", "1"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("stderr utf8");
    assert!(stderr.contains("error:"));
}
