//! `regform validate` end-to-end tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
}

fn submission(name: &str) -> PathBuf {
    workspace_root()
        .join("tests")
        .join("fixtures")
        .join("submissions")
        .join(name)
}

fn regform() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_regform"));
    command
        .env_remove("REGFORM_TRACE")
        .env_remove("REGFORM_LOG_LEVEL")
        .env_remove("REGFORM_OUTPUT")
        .env("REGFORM_LOG_ENABLED", "false");
    command
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn valid_aadhar_submission_exits_zero() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "validate", "--input"])
        .arg(submission("valid-aadhar.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let value = stdout_json(&output)?;
    assert_eq!(value.get("errors"), Some(&serde_json::json!({})));
    assert_eq!(
        value.pointer("/values/gidType"),
        Some(&serde_json::json!("aadhar"))
    );
    Ok(())
}

#[test]
fn pan_submission_returns_trimmed_value() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "validate", "--input"])
        .arg(submission("valid-pan-age.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let value = stdout_json(&output)?;
    assert_eq!(
        value.pointer("/values/gidText"),
        Some(&serde_json::json!("ABCDE1234F"))
    );
    Ok(())
}

#[test]
fn invalid_submission_exits_two_with_field_errors() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "validate", "--input"])
        .arg(submission("invalid-mixed.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value.get("values"), Some(&serde_json::json!({})));
    assert_eq!(
        value.pointer("/errors/dob"),
        Some(&serde_json::json!({
            "type": "is-positive-number-or-date",
            "message": "Please enter a valid date or age"
        }))
    );
    assert_eq!(
        value.pointer("/errors/phoneNumber/message"),
        Some(&serde_json::json!("Enter a valid mobile number"))
    );
    assert!(value.pointer("/errors/gidType").is_none());
    Ok(())
}

#[test]
fn text_report_for_inline_json() -> io::Result<()> {
    let output = regform()
        .args(["validate", "--input-json", r#"{"name":"Ravi Kumar"}"#])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: invalid\nerrors:\n"));
    assert!(stdout.contains("  gidType: Please select ID type. (validation)\n"));
    assert!(!stdout.contains("name:"));
    Ok(())
}

#[test]
fn stdin_submission_is_read() -> io::Result<()> {
    let mut child = regform()
        .args(["--output", "json", "validate", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(
            br#"{"name":"Asha Rao","dob":"31/12/1999","gender":"other","gidType":"pan","gidText":"PQRST6789Z"}"#,
        )?;
    }
    let output = child.wait_with_output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output)?.pointer("/values/name"),
        Some(&serde_json::json!("Asha Rao"))
    );
    Ok(())
}

#[test]
fn unknown_field_is_a_request_error() -> io::Result<()> {
    let output = regform()
        .args(["--output", "json", "validate", "--input"])
        .arg(submission("unknown-field.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value.get("status"), Some(&serde_json::json!("error")));
    assert_eq!(
        value.pointer("/error/code"),
        Some(&serde_json::json!("ERR_API_INVALID_REQUEST"))
    );
    Ok(())
}

#[test]
fn missing_input_file_exits_three() -> io::Result<()> {
    let output = regform()
        .args(["validate", "--input"])
        .arg(submission("does-not-exist.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("io error"));
    Ok(())
}

#[test]
fn resolve_events_are_logged_to_stderr_without_values() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_regform"))
        .args(["validate", "--input"])
        .arg(submission("valid-aadhar.json"))
        .env("REGFORM_LOG_ENABLED", "true")
        .env("REGFORM_LOG_LEVEL", "debug")
        .env_remove("REGFORM_OUTPUT")
        .env_remove("REGFORM_TRACE")
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();
    let names: Vec<_> = events
        .iter()
        .filter_map(|event| event.get("event").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(names, vec!["form.resolve.start", "form.resolve.valid"]);
    assert!(!stderr.contains("234567890123"));
    assert!(!stderr.contains("9876543210"));
    Ok(())
}
