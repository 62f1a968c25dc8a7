// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate configuration files and environment overrides.
// Author: Lukas Bower

use std::env;
use std::fs;

use serial_test::serial;
use slicedterm::config::{BLINK_ENV, CONFIG_ENV, OVERLAY_ENV};
use slicedterm::{ColorMode, ConfigError, TerminalConfig};
use tempfile::tempdir;

fn clear_env() {
    env::remove_var(CONFIG_ENV);
    env::remove_var(OVERLAY_ENV);
    env::remove_var(BLINK_ENV);
}

#[test]
#[serial]
fn explicit_file_is_loaded() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("term.toml");
    fs::write(
        &path,
        "prompt_symbol = \">\"\noverlay_ms = 2500\ncolor = \"never\"\n",
    )
    .expect("write config");

    let config = TerminalConfig::resolve(Some(&path)).expect("resolve");
    assert_eq!(config.prompt_symbol, ">");
    assert_eq!(config.overlay_ms, 2_500);
    assert_eq!(config.blink_ms, 530);
    assert_eq!(config.color, ColorMode::Never);
    assert!(config.banner);
}

#[test]
#[serial]
fn env_path_and_overrides_apply() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("env.toml");
    fs::write(&path, "banner = false\n").expect("write config");
    env::set_var(CONFIG_ENV, &path);
    env::set_var(OVERLAY_ENV, "1200");
    env::set_var(BLINK_ENV, " 400 ");

    let config = TerminalConfig::resolve(None).expect("resolve");
    clear_env();
    assert!(!config.banner);
    assert_eq!(config.overlay_ms, 1_200);
    assert_eq!(config.blink_ms, 400);
}

#[test]
#[serial]
fn malformed_override_is_rejected() {
    clear_env();
    env::set_var(OVERLAY_ENV, "soon");
    let err = TerminalConfig::resolve(None).unwrap_err();
    clear_env();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { key: "SLICEDTERM_OVERLAY_MS", .. }
    ));
}

#[test]
#[serial]
fn missing_file_is_an_io_error() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let err = TerminalConfig::resolve(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
#[serial]
fn unknown_keys_fail_to_parse() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("typo.toml");
    fs::write(&path, "overlay = 10\n").expect("write config");
    let err = TerminalConfig::resolve(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
