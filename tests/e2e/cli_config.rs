//! `regform config show` and config-driven output tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
}

fn fixture(relative: &str) -> PathBuf {
    workspace_root().join("tests").join("fixtures").join(relative)
}

fn regform() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_regform"));
    command
        .env_remove("REGFORM_TRACE")
        .env_remove("REGFORM_LOG_LEVEL")
        .env_remove("REGFORM_LOG_ENABLED")
        .env_remove("REGFORM_OUTPUT");
    command
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn defaults_are_shown_without_a_file() -> io::Result<()> {
    let output = regform().args(["config", "show"]).output()?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert_eq!(
        value,
        serde_json::json!({
            "version": 1,
            "logging": { "enabled": true, "level": "info" },
            "output": { "format": "text" }
        })
    );
    Ok(())
}

#[test]
fn env_overrides_file_values() -> io::Result<()> {
    let output = regform()
        .args(["config", "show", "--config"])
        .arg(fixture("config/regform.valid.toml"))
        .env("REGFORM_LOG_LEVEL", "ERROR")
        .output()?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert_eq!(
        value.pointer("/logging/level"),
        Some(&serde_json::json!("error"))
    );
    Ok(())
}

#[test]
fn toml_rendering_is_available() -> io::Result<()> {
    let output = regform()
        .args(["config", "show", "--format", "toml"])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[logging]"));
    assert!(stdout.contains("version = 1"));
    Ok(())
}

#[test]
fn config_file_sets_output_format() -> io::Result<()> {
    let output = regform()
        .args(["--config"])
        .arg(fixture("config/regform.valid.json"))
        .args(["validate", "--input"])
        .arg(fixture("submissions/valid-aadhar.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    // json output from the file; logging disabled by the file as well.
    assert!(stdout_json(&output)?.get("values").is_some());
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn unknown_config_key_is_rejected() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "config", "show", "--config"])
        .arg(fixture("config/regform.unknown-key.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_json(&output)?.pointer("/error/code"),
        Some(&serde_json::json!("ERR_CONFIG_INVALID_JSON"))
    );
    Ok(())
}

#[test]
fn future_version_is_rejected() -> io::Result<()> {
    let output = regform()
        .args(["config", "show", "--config"])
        .arg(fixture("config/regform.future-version.toml"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("code: ERR_CONFIG_UNSUPPORTED_VERSION"));
    Ok(())
}

#[test]
fn invalid_env_value_fails_fast() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "config", "show"])
        .env("REGFORM_OUTPUT", "yaml")
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(
        value.pointer("/error/code"),
        Some(&serde_json::json!("ERR_CONFIG_INVALID_ENV"))
    );
    assert_eq!(
        value.pointer("/error/meta/env_var"),
        Some(&serde_json::json!("REGFORM_OUTPUT"))
    );
    Ok(())
}
