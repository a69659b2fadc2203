//! # regform-domain
//!
//! Validation core for the "Personal Details" step of the registration wizard.
//!
//! - **Record** - `PersonalDetailsInput`, the raw submission
//! - **Schema** - `Schema`, `RuleChain`, `Check`, `Test`, conditional `FieldRule::When`
//! - **Outcome** - `ValidationOutcome`, `FieldErrors`, `ErrorDetail`
//! - **Personal details** - the Step-1 rules and the typed `PersonalDetails` view
//! - **Counter** - the global counter reducer
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` and the `fields-derive` macro
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use regform_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod counter;
pub mod outcome;
pub mod personal_details;
pub mod record;
pub mod schema;

pub use counter::{CounterAction, CounterState, DECREMENT, INCREMENT, reduce, reduce_type};
pub use outcome::{ErrorDetail, FailureReason, FieldErrors, ValidationOutcome};
pub use personal_details::{
    AADHAR, AADHAR_PATTERN, DATE_PATTERN, DOB_CHECK, DateOfBirthOrAge, GENDER_CHECK, GENDERS,
    GID_TEXT_CHECK, GID_TYPE_CHECK, GID_TYPES, Gender, GovernmentId, PAN_PATTERN, PHONE_PATTERN,
    PersonalDetails, PersonalDetailsError, personal_details_schema, validate_personal_details,
};
pub use record::{DOB, GENDER, GID_TEXT, GID_TYPE, NAME, PHONE_NUMBER, PersonalDetailsInput};
pub use schema::{
    Check, DEFAULT_CHECK_KIND, FieldRule, RuleChain, Schema, SchemaBuilder, SchemaError, Test,
    coerce_number,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
