//! API v1 DTOs and helpers.

mod mappers;
mod request;
mod schema;
mod types;

pub use mappers::{
    error_code_to_api_v1, error_envelope_to_api_v1_error, outcome_to_api_v1_resolver_result,
    result_to_api_v1_result,
};
pub use request::{parse_personal_details_input_json, parse_personal_details_request_json};
pub use schema::{api_v1_personal_details_request_schema, api_v1_resolver_result_schema};
pub use types::*;
