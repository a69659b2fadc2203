//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1ErrorCode, ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1FieldErrorDto,
    ApiV1PersonalDetailsRequestDto, ApiV1ResolverResultDto, ApiV1Result,
};
use regform_domain::{PersonalDetailsInput, ValidationOutcome};
use regform_shared::{ErrorCode, ErrorEnvelope, ErrorKind, REDACTED, is_sensitive_key, mask};

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged = envelope.metadata.clone();
    if let Some(extra) = extra_meta {
        merged.extend(extra);
    }
    let meta = if merged.is_empty() {
        None
    } else {
        Some(redact_api_v1_meta(merged))
    };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta,
    }
}

/// Map a shared result into an API v1 result wrapper.
#[must_use]
pub fn result_to_api_v1_result<T>(
    result: Result<T, ErrorEnvelope>,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1Result<T> {
    match result {
        Ok(data) => ApiV1Result::ok(data),
        Err(error) => ApiV1Result::err(error_envelope_to_api_v1_error(&error, extra_meta)),
    }
}

/// Map a validation outcome into the `{ values, errors }` resolver result.
#[must_use]
pub fn outcome_to_api_v1_resolver_result(
    outcome: &ValidationOutcome<PersonalDetailsInput>,
) -> ApiV1ResolverResultDto {
    match outcome {
        ValidationOutcome::Valid { values } => ApiV1ResolverResultDto {
            values: regform_shared::present_fields(values)
                .into_iter()
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect(),
            errors: std::collections::BTreeMap::new(),
        },
        ValidationOutcome::Invalid { errors } => ApiV1ResolverResultDto {
            values: std::collections::BTreeMap::new(),
            errors: errors
                .iter()
                .map(|(field, detail)| {
                    (
                        field.clone(),
                        ApiV1FieldErrorDto {
                            kind: detail.kind().to_string(),
                            message: detail.message().to_string(),
                        },
                    )
                })
                .collect(),
        },
    }
}

impl From<ApiV1PersonalDetailsRequestDto> for PersonalDetailsInput {
    fn from(dto: ApiV1PersonalDetailsRequestDto) -> Self {
        Self {
            name: dto.name,
            dob: dto.dob.map(crate::v1::ApiV1DobValue::into_text),
            gender: dto.gender,
            phone_number: dto.phone_number,
            gid_type: dto.gid_type,
            gid_text: dto.gid_text,
        }
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn redact_api_v1_meta(meta: ApiV1ErrorMeta) -> ApiV1ErrorMeta {
    meta.into_iter()
        .map(|(key, value)| {
            let redacted = if is_credential_key(&key) {
                REDACTED.to_string()
            } else if is_sensitive_key(&key) {
                mask(&value)
            } else {
                value
            };
            (key, redacted)
        })
        .collect()
}

fn is_credential_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("token") || key.contains("password") || key.contains("secret")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::ApiV1DobValue;
    use regform_domain::{ErrorDetail, FieldErrors};
    use regform_shared::ErrorClass;
    use std::collections::BTreeMap;
    use std::error::Error;

    #[test]
    fn mapping_redacts_sensitive_metadata() -> Result<(), Box<dyn Error>> {
        let envelope = ErrorEnvelope::expected(ErrorCode::new("config", "invalid_env"), "bad env")
            .with_metadata("sessionToken", "abc123")
            .with_metadata("phoneNumber", "9876543210")
            .with_metadata("env_var", "REGFORM_OUTPUT");

        let dto = error_envelope_to_api_v1_error(&envelope, None);
        let meta = dto.meta.ok_or("meta should be present")?;
        assert_eq!(dto.code, "ERR_CONFIG_INVALID_ENV");
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
        assert_eq!(meta.get("sessionToken").map(String::as_str), Some(REDACTED));
        assert_eq!(
            meta.get("phoneNumber").map(String::as_str),
            Some("******3210")
        );
        assert_eq!(
            meta.get("env_var").map(String::as_str),
            Some("REGFORM_OUTPUT")
        );
        Ok(())
    }

    #[test]
    fn unexpected_errors_map_to_expected_kind() {
        let envelope = ErrorEnvelope::unexpected(ErrorCode::io(), "io", ErrorClass::Retriable);
        let dto = error_envelope_to_api_v1_error(&envelope, None);
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
        assert_eq!(dto.code, "ERR_CORE_IO");
        assert_eq!(dto.meta, None);
    }

    #[test]
    fn result_mapping_preserves_ok_and_err() {
        let mapped = result_to_api_v1_result(Ok::<u32, ErrorEnvelope>(10), None);
        assert!(matches!(mapped, ApiV1Result::Ok { ok: true, data: 10 }));

        let mut extra = BTreeMap::new();
        extra.insert("requestId".to_string(), "abc".to_string());
        let err_result: Result<u32, ErrorEnvelope> = Err(ErrorEnvelope::expected(
            ErrorCode::invalid_input(),
            "bad input",
        ));
        let mapped = result_to_api_v1_result(err_result, Some(extra));
        let ApiV1Result::Err { ok, error } = mapped else {
            return;
        };
        assert!(!ok);
        assert_eq!(
            error.meta.and_then(|meta| meta.get("requestId").cloned()),
            Some("abc".to_string())
        );
    }

    #[test]
    fn invalid_outcome_has_empty_values() {
        let mut errors = FieldErrors::new();
        errors.insert(
            "gidText",
            ErrorDetail::constraint("gidText-validator", "Enter a valid aadhar number"),
        );
        let outcome = ValidationOutcome::Invalid { errors };

        let result = outcome_to_api_v1_resolver_result(&outcome);
        assert!(result.values.is_empty());
        assert!(!result.is_valid());
        assert_eq!(
            result.errors.get("gidText").map(|error| error.kind.as_str()),
            Some("gidText-validator")
        );
    }

    #[test]
    fn valid_outcome_lists_present_values() {
        let values = PersonalDetailsInput::default()
            .with("name", "Ravi Kumar")
            .with("phoneNumber", "");
        let result = outcome_to_api_v1_resolver_result(&ValidationOutcome::Valid { values });

        assert!(result.is_valid());
        assert_eq!(result.values.len(), 2);
        assert_eq!(result.values.get("phoneNumber").map(String::as_str), Some(""));
    }

    #[test]
    fn numeric_dob_becomes_text() {
        let dto = ApiV1PersonalDetailsRequestDto {
            dob: Some(ApiV1DobValue::Number(29.0)),
            ..ApiV1PersonalDetailsRequestDto::default()
        };
        let input = PersonalDetailsInput::from(dto);
        assert_eq!(input.dob.as_deref(), Some("29"));
    }
}
