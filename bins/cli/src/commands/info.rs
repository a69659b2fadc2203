//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, pretty_json};

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let crates = crate_versions();
    let stdout = if mode.is_json() {
        format_info_json(&crates)?
    } else {
        format_info_text(&crates)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn crate_versions() -> [(&'static str, &'static str); 7] {
    [
        ("shared", regform_shared::shared_crate_version()),
        ("domain", regform_domain::domain_crate_version()),
        ("ports", regform_ports::ports_crate_version()),
        ("config", regform_config::config_crate_version()),
        ("api", regform_api::api_crate_version()),
        ("adapters", regform_adapters::adapters_crate_version()),
        ("app", regform_app::app_crate_version()),
    ]
}

fn format_info_text(crates: &[(&str, &str)]) -> String {
    let mut out = format!(
        "status: ok\nname: {}\nversion: {}\n",
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    for (name, version) in crates {
        out.push_str(&format!("{name}: {version}\n"));
    }
    out
}

fn format_info_json(crates: &[(&str, &str)]) -> Result<String, CliError> {
    let versions: serde_json::Map<String, serde_json::Value> = crates
        .iter()
        .map(|(name, version)| ((*name).to_string(), serde_json::Value::from(*version)))
        .collect();
    let payload = serde_json::json!({
        "status": "ok",
        "name": env!("CARGO_BIN_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "crates": versions,
    });
    Ok(pretty_json(&payload)?)
}
