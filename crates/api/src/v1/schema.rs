//! JSON Schema exports for API v1 DTOs.

use crate::v1::{ApiV1PersonalDetailsRequestDto, ApiV1ResolverResultDto};
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1PersonalDetailsRequestDto`.
#[must_use]
pub fn api_v1_personal_details_request_schema() -> Schema {
    schema_for!(ApiV1PersonalDetailsRequestDto)
}

/// JSON Schema for `ApiV1ResolverResultDto`.
#[must_use]
pub fn api_v1_resolver_result_schema() -> Schema {
    schema_for!(ApiV1ResolverResultDto)
}
