//! Schema command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::pretty_json;
use regform_api::v1::api_v1_personal_details_request_schema;

/// Print the request JSON Schema; the format flag does not apply.
pub fn run_schema() -> Result<CliOutput, CliError> {
    Ok(CliOutput {
        stdout: pretty_json(&api_v1_personal_details_request_schema())?,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
