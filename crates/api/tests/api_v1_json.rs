//! JSON contract tests for the API v1 DTOs.

use regform_api::v1::{
    ApiV1ErrorKind, ApiV1Result, api_v1_personal_details_request_schema,
    api_v1_resolver_result_schema, error_envelope_to_api_v1_error,
    outcome_to_api_v1_resolver_result, parse_personal_details_input_json,
};
use regform_domain::{ValidationOutcome, personal_details_schema};
use regform_shared::ErrorEnvelope;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;

fn fixture(name: &str) -> Result<String, Box<dyn Error>> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures/submissions")
        .join(name);
    Ok(std::fs::read_to_string(path)?)
}

#[test]
fn valid_pan_submission_resolves_to_trimmed_values() -> Result<(), Box<dyn Error>> {
    let schema = personal_details_schema()?;
    let input = parse_personal_details_input_json(&fixture("valid-pan-age.json")?)?;
    let outcome = schema.validate(&input);

    let value = serde_json::to_value(outcome_to_api_v1_resolver_result(&outcome))?;
    assert_eq!(value.pointer("/errors"), Some(&json!({})));
    assert_eq!(value.pointer("/values/gidText"), Some(&json!("ABCDE1234F")));
    assert_eq!(value.pointer("/values/dob"), Some(&json!("29")));
    assert_eq!(value.pointer("/values/phoneNumber"), Some(&json!("")));
    Ok(())
}

#[test]
fn invalid_submission_reports_every_field() -> Result<(), Box<dyn Error>> {
    let schema = personal_details_schema()?;
    let input = parse_personal_details_input_json(&fixture("invalid-mixed.json")?)?;
    let outcome = schema.validate(&input);
    assert!(matches!(outcome, ValidationOutcome::Invalid { .. }));

    let value = serde_json::to_value(outcome_to_api_v1_resolver_result(&outcome))?;
    assert_eq!(value.pointer("/values"), Some(&json!({})));
    assert_eq!(
        value.pointer("/errors/name"),
        Some(&json!({
            "type": "validation",
            "message": "Name must be greater than 3 characters"
        }))
    );
    assert_eq!(
        value.pointer("/errors/gender/type"),
        Some(&json!("gender-validator"))
    );
    assert_eq!(
        value.pointer("/errors/gidText/message"),
        Some(&json!("PAN number should be in the format XXXXX0000X"))
    );
    assert_eq!(
        value
            .pointer("/errors")
            .and_then(serde_json::Value::as_object)
            .map(serde_json::Map::len),
        Some(5)
    );
    Ok(())
}

#[test]
fn unknown_field_submission_is_rejected() -> Result<(), Box<dyn Error>> {
    let Err(error) = parse_personal_details_input_json(&fixture("unknown-field.json")?) else {
        return Err("unknown keys should be rejected".into());
    };
    let dto = error_envelope_to_api_v1_error(&error, None);
    assert_eq!(dto.code, "ERR_API_INVALID_REQUEST");
    assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
    Ok(())
}

#[test]
fn failed_submission_envelope_serializes_as_error_result() -> Result<(), Box<dyn Error>> {
    let schema = personal_details_schema()?;
    let input = parse_personal_details_input_json(&fixture("invalid-mixed.json")?)?;
    let result = schema
        .validate(&input)
        .into_result()
        .map_err(ErrorEnvelope::from);
    let wrapped = regform_api::v1::result_to_api_v1_result(result, None);

    let value = serde_json::to_value(&wrapped)?;
    assert_eq!(value.pointer("/ok"), Some(&json!(false)));
    assert_eq!(
        value.pointer("/error/code"),
        Some(&json!("ERR_FORM_INVALID_SUBMISSION"))
    );
    assert_eq!(value.pointer("/error/kind"), Some(&json!("EXPECTED")));
    assert!(matches!(wrapped, ApiV1Result::Err { .. }));
    Ok(())
}

#[test]
fn request_schema_lists_every_field() -> Result<(), Box<dyn Error>> {
    let schema = serde_json::to_value(api_v1_personal_details_request_schema())?;
    let properties = schema
        .pointer("/properties")
        .and_then(serde_json::Value::as_object)
        .ok_or("request schema has no properties")?;
    for field in ["name", "dob", "gender", "phoneNumber", "gidType", "gidText"] {
        assert!(properties.contains_key(field), "missing {field}");
    }
    assert_eq!(
        schema.pointer("/additionalProperties"),
        Some(&json!(false))
    );

    let result_schema = serde_json::to_value(api_v1_resolver_result_schema())?;
    assert!(result_schema.pointer("/properties/errors").is_some());
    Ok(())
}
