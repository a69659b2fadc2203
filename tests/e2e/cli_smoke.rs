//! CLI smoke tests: info, schema, and argument errors.

use std::io;
use std::process::{Command, Output};

fn regform(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_regform"))
        .args(args)
        .env_remove("REGFORM_TRACE")
        .env_remove("REGFORM_LOG_LEVEL")
        .env_remove("REGFORM_LOG_ENABLED")
        .env_remove("REGFORM_OUTPUT")
        .output()
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn info_is_deterministic() -> io::Result<()> {
    let first = regform(&["--output", "json", "info"])?;
    let second = regform(&["--output", "json", "info"])?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value = stdout_json(&first)?;
    assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("regform"));
    assert!(value.pointer("/crates/domain").is_some());
    Ok(())
}

#[test]
fn info_text_lists_crates() -> io::Result<()> {
    let output = regform(&["info"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\nname: regform\n"));
    assert!(stdout.contains("\napp: "));
    Ok(())
}

#[test]
fn schema_describes_submission() -> io::Result<()> {
    let output = regform(&["schema"])?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert!(value.pointer("/properties/gidText").is_some());
    assert_eq!(
        value.get("additionalProperties"),
        Some(&serde_json::Value::Bool(false))
    );
    Ok(())
}

#[test]
fn validate_without_source_is_a_usage_error() -> io::Result<()> {
    let output = regform(&["validate"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    Ok(())
}
