//! API v1 request decoding.

use crate::v1::ApiV1PersonalDetailsRequestDto;
use regform_domain::PersonalDetailsInput;
use regform_shared::{ErrorCode, ErrorEnvelope, Result};

/// Decode a JSON personal details submission.
///
/// Malformed JSON, non-object payloads, wrongly typed values, and unknown
/// keys fail with an expected `api:invalid_request` error.
pub fn parse_personal_details_request_json(
    input: &str,
) -> Result<ApiV1PersonalDetailsRequestDto> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("api", "invalid_request"),
            format!("invalid personal details JSON: {error}"),
        )
        .with_metadata("line", error.line().to_string())
        .with_metadata("column", error.column().to_string())
    })
}

/// Decode a JSON submission straight into the validator's input record.
pub fn parse_personal_details_input_json(input: &str) -> Result<PersonalDetailsInput> {
    parse_personal_details_request_json(input).map(PersonalDetailsInput::from)
}
