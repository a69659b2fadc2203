//! Validate command handler.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, pretty_json};
use crate::{CliOutput, format_error_output};
use regform_adapters::{StderrLogSink, logger_from_config};
use regform_api::v1::{
    ApiV1ResolverResultDto, outcome_to_api_v1_resolver_result, parse_personal_details_input_json,
};
use regform_app::personal_details_resolver;
use regform_config::AppConfig;
use regform_ports::FormResolverPort;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the submission JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
    Stdin,
}

impl InputSource {
    fn read(&self) -> Result<String, CliError> {
        match self {
            Self::File(path) => Ok(std::fs::read_to_string(path)?),
            Self::Inline(json) => Ok(json.clone()),
            Self::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            },
        }
    }
}

/// Run the validate command.
pub fn run_validate(
    mode: OutputMode,
    config: &AppConfig,
    source: &InputSource,
) -> Result<CliOutput, CliError> {
    let raw = source.read()?;
    let input = match parse_personal_details_input_json(&raw) {
        Ok(input) => input,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let resolver = match personal_details_resolver() {
        Ok(resolver) => resolver,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let resolver = resolver.with_logger(logger_from_config(
        &config.logging,
        Arc::new(StderrLogSink),
    ));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(CliError::Runtime)?;
    let outcome = runtime.block_on(resolver.resolve(input));
    tracing::debug!(valid = outcome.is_valid(), "submission resolved");

    let result = outcome_to_api_v1_resolver_result(&outcome);
    let stdout = if mode.is_json() {
        pretty_json(&result)?
    } else {
        format_result_text(&result)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: if result.is_valid() {
            ExitCode::Ok
        } else {
            ExitCode::InvalidInput
        },
    })
}

fn format_result_text(result: &ApiV1ResolverResultDto) -> String {
    let mut out = String::new();
    if result.is_valid() {
        out.push_str("status: valid\nvalues:\n");
        for (field, value) in &result.values {
            out.push_str(&format!("  {field}: {value:?}\n"));
        }
    } else {
        out.push_str("status: invalid\nerrors:\n");
        for (field, error) in &result.errors {
            out.push_str(&format!("  {field}: {} ({})\n", error.message, error.kind));
        }
    }
    out
}
