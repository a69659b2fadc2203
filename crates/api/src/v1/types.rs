//! API v1 DTO types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error kind exposed in API v1 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, user-facing errors (bad input, bad config).
    Expected,
    /// Invariant violations that indicate a bug.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// API v1 error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_CONFIG_INVALID_ENV`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message for the caller.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Optional metadata for debugging and correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
}

/// API v1 result wrapper for success or failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiV1Result<T> {
    /// Success response.
    Ok {
        /// Indicates success.
        ok: bool,
        /// Success payload.
        data: T,
    },
    /// Error response.
    Err {
        /// Indicates failure.
        ok: bool,
        /// Error payload.
        error: ApiV1ErrorDto,
    },
}

impl<T> ApiV1Result<T> {
    /// Build a success response wrapper.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self::Ok { ok: true, data }
    }

    /// Build an error response wrapper.
    #[must_use]
    pub const fn err(error: ApiV1ErrorDto) -> Self {
        Self::Err { ok: false, error }
    }
}

/// `dob` as sent by a form: usually a string, sometimes a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ApiV1DobValue {
    /// Age or `DD/MM/YYYY` date as text.
    Text(String),
    /// Age as a JSON number.
    Number(f64),
}

impl ApiV1DobValue {
    /// The string the validator sees.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// API v1 Step-1 personal details submission.
///
/// Every key is optional; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiV1PersonalDetailsRequestDto {
    /// Applicant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age or `DD/MM/YYYY` date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<ApiV1DobValue>,
    /// `male`, `female` or `other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Ten-digit mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// `aadhar` or `pan`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid_type: Option<String>,
    /// Aadhar number or PAN, depending on `gidType`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid_text: Option<String>,
}

/// One field's error in a resolver result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiV1FieldErrorDto {
    /// `validation` or a named check identifier.
    #[serde(rename = "type")]
    pub kind: String,
    /// User-facing message.
    pub message: String,
}

/// Resolver result handed back to a form controller.
///
/// `values` is empty when invalid; `errors` is empty when valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiV1ResolverResultDto {
    /// Validated (and trimmed) field values keyed by wire name.
    pub values: BTreeMap<String, String>,
    /// Field errors keyed by wire name.
    pub errors: BTreeMap<String, ApiV1FieldErrorDto>,
}

impl ApiV1ResolverResultDto {
    /// Returns true when no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
