//! Step-1 "Personal Details" rules and the typed view of a valid submission.

use crate::outcome::FieldErrors;
use crate::record::{DOB, GENDER, GID_TEXT, GID_TYPE, NAME, PHONE_NUMBER, PersonalDetailsInput};
use crate::schema::{Check, RuleChain, Schema, SchemaError, Test, coerce_number};
use regform_shared::{ErrorCode, ErrorEnvelope, FieldSource, Validated};
use serde::Serialize;
use std::fmt;

/// Accepted `gender` values.
pub const GENDERS: &[&str] = &["male", "female", "other"];
/// Accepted `gidType` values.
pub const GID_TYPES: &[&str] = &["aadhar", "pan"];
/// Discriminator value selecting the Aadhar branch for `gidText`.
pub const AADHAR: &str = "aadhar";

/// Minimum name length in characters.
pub const NAME_MIN_CHARS: usize = 4;
/// Mobile number length.
pub const PHONE_CHARS: usize = 10;
/// Aadhar number length.
pub const AADHAR_CHARS: usize = 12;

/// `DD/MM/YYYY` with day 01-31 and month 01-12; no calendar check.
pub const DATE_PATTERN: &str = r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/[0-9]{4}$";
/// Indian mobile number.
pub const PHONE_PATTERN: &str = r"^[6789][0-9]{9}$";
/// Aadhar number: twelve digits, not starting with 0 or 1.
pub const AADHAR_PATTERN: &str = r"^[23456789][0-9]{11}$";
/// PAN: five letters, four digits, one letter.
pub const PAN_PATTERN: &str = r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$";

/// Named check on `dob`.
pub const DOB_CHECK: &str = "is-positive-number-or-date";
/// Named check on `gender`.
pub const GENDER_CHECK: &str = "gender-validator";
/// Named check on `gidType`.
pub const GID_TYPE_CHECK: &str = "gidType-validator";
/// Named check on `gidText` format and length.
pub const GID_TEXT_CHECK: &str = "gidText-validator";

/// Build the Step-1 schema.
///
/// Fields are checked in declaration order; `gidText` switches between the
/// Aadhar and PAN chains on the raw `gidType` value.
pub fn personal_details_schema() -> Result<Schema<PersonalDetailsInput>, SchemaError> {
    let aadhar = RuleChain::new()
        .check(Check::required("Please enter your Aadhar number"))
        .check(Check::pattern(AADHAR_PATTERN, "Enter a valid aadhar number")?.named(GID_TEXT_CHECK))
        .check(
            Check::min_chars(AADHAR_CHARS, "Aadhar number should be 12 digits")
                .named(GID_TEXT_CHECK),
        )
        .check(
            Check::max_chars(AADHAR_CHARS, "Aadhar number should be 12 digits")
                .named(GID_TEXT_CHECK),
        );

    let pan = RuleChain::new()
        .trim()
        .check(Check::required("Please enter your PAN number"))
        .check(
            Check::pattern(PAN_PATTERN, "PAN number should be in the format XXXXX0000X")?
                .named(GID_TEXT_CHECK),
        );

    Schema::builder()
        .field(
            NAME,
            RuleChain::new()
                .check(Check::required("Name is required"))
                .check(Check::min_chars(
                    NAME_MIN_CHARS,
                    "Name must be greater than 3 characters",
                )),
        )
        .field(
            DOB,
            RuleChain::new()
                .check(Check::defined("Please enter a value for Age"))
                .check(
                    Check::any_of(
                        vec![Test::PositiveNumber, Test::pattern(DATE_PATTERN)?],
                        "Please enter a valid date or age",
                    )
                    .named(DOB_CHECK),
                ),
        )
        .field(
            GENDER,
            RuleChain::new()
                .check(Check::required("Gender is required"))
                .check(
                    Check::one_of(GENDERS, "Gender should either Male, Female or Other")
                        .named(GENDER_CHECK),
                ),
        )
        .field(
            PHONE_NUMBER,
            RuleChain::new()
                .check(Check::pattern(PHONE_PATTERN, "Enter a valid mobile number")?)
                .check(Check::exact_chars(
                    PHONE_CHARS,
                    "Mobile number must be of length 10",
                )),
        )
        .field(
            GID_TYPE,
            RuleChain::new()
                .check(Check::required("Please select ID type."))
                .check(
                    Check::one_of(GID_TYPES, "Govt ID Type should be either Aadhar or PAN")
                        .named(GID_TYPE_CHECK),
                ),
        )
        .when(GID_TEXT, GID_TYPE, AADHAR, aadhar, pan)
        .build()
}

/// Applicant gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
    /// `other`
    Other,
}

impl Gender {
    /// Parse an exact lowercase wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// The `dob` field: either an age or a calendar-shaped date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DateOfBirthOrAge {
    /// Positive age in years.
    Age {
        /// Years, possibly fractional; `Infinity` coerces to an infinite age.
        years: f64,
    },
    /// `DD/MM/YYYY` date; the day is not checked against the month.
    Date {
        /// 1-31
        day: u8,
        /// 1-12
        month: u8,
        /// Four-digit year.
        year: u16,
    },
}

impl DateOfBirthOrAge {
    fn parse(value: &str) -> Option<Self> {
        let age = coerce_number(value).filter(|years| *years > 0.0);
        if let Some(years) = age {
            return Some(Self::Age { years });
        }
        let mut parts = value.split('/');
        let day = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let year = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::Date { day, month, year })
    }
}

/// Government identity document.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "number", rename_all = "lowercase")]
pub enum GovernmentId {
    /// Twelve-digit Aadhar number.
    Aadhar(String),
    /// Ten-character PAN.
    Pan(String),
}

impl GovernmentId {
    /// The identity number.
    #[must_use]
    pub fn number(&self) -> &str {
        match self {
            Self::Aadhar(number) | Self::Pan(number) => number,
        }
    }
}

impl fmt::Debug for GovernmentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = regform_shared::mask(self.number());
        match self {
            Self::Aadhar(_) => formatter.debug_tuple("Aadhar").field(&masked).finish(),
            Self::Pan(_) => formatter.debug_tuple("Pan").field(&masked).finish(),
        }
    }
}

/// Typed view of a submission that passed [`personal_details_schema`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    /// Applicant name.
    pub name: String,
    /// Age or date of birth.
    pub dob: DateOfBirthOrAge,
    /// Gender.
    pub gender: Gender,
    /// Mobile number when provided.
    pub phone_number: Option<String>,
    /// Identity document.
    pub government_id: GovernmentId,
}

/// A valid-looking record could not be typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalDetailsError {
    /// The submission failed validation.
    Invalid(FieldErrors),
    /// A field the schema guarantees could not be interpreted.
    Untyped {
        /// Offending field.
        field: &'static str,
    },
}

impl fmt::Display for PersonalDetailsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => {
                write!(formatter, "{} field(s) failed validation", errors.len())
            },
            Self::Untyped { field } => {
                write!(formatter, "validated field `{field}` has no typed form")
            },
        }
    }
}

impl std::error::Error for PersonalDetailsError {}

impl From<PersonalDetailsError> for ErrorEnvelope {
    fn from(error: PersonalDetailsError) -> Self {
        match error {
            PersonalDetailsError::Invalid(errors) => errors.into(),
            PersonalDetailsError::Untyped { field } => Self::invariant(
                ErrorCode::new("form", "untyped_field"),
                format!("validated field `{field}` has no typed form"),
            )
            .with_metadata("field", field),
        }
    }
}

impl PersonalDetails {
    /// Interpret already-validated values.
    pub fn from_valid(values: &PersonalDetailsInput) -> Result<Self, PersonalDetailsError> {
        let present = |field: &'static str| {
            values
                .field(field)
                .filter(|value| !value.is_empty())
                .ok_or(PersonalDetailsError::Untyped { field })
        };

        let name = present(NAME)?.to_string();
        let dob = DateOfBirthOrAge::parse(present(DOB)?)
            .ok_or(PersonalDetailsError::Untyped { field: DOB })?;
        let gender =
            Gender::parse(present(GENDER)?).ok_or(PersonalDetailsError::Untyped { field: GENDER })?;
        let phone_number = values
            .field(PHONE_NUMBER)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let number = present(GID_TEXT)?.to_string();
        let government_id = match present(GID_TYPE)? {
            "aadhar" => GovernmentId::Aadhar(number),
            "pan" => GovernmentId::Pan(number),
            _ => return Err(PersonalDetailsError::Untyped { field: GID_TYPE }),
        };

        Ok(Self {
            name,
            dob,
            gender,
            phone_number,
            government_id,
        })
    }
}

/// Validate a submission and return its typed view.
pub fn validate_personal_details(
    schema: &Schema<PersonalDetailsInput>,
    input: &PersonalDetailsInput,
) -> Result<Validated<PersonalDetails>, PersonalDetailsError> {
    let values = schema
        .validate(input)
        .into_result()
        .map_err(PersonalDetailsError::Invalid)?;
    PersonalDetails::from_valid(&values).map(Validated::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn aadhar_applicant() -> PersonalDetailsInput {
        PersonalDetailsInput::default()
            .with(NAME, "Ravi Kumar")
            .with(DOB, "15/08/1990")
            .with(GENDER, "male")
            .with(PHONE_NUMBER, "9876543210")
            .with(GID_TYPE, "aadhar")
            .with(GID_TEXT, "234567890123")
    }

    #[test]
    fn typed_view_of_aadhar_applicant() -> Result<(), Box<dyn Error>> {
        let schema = personal_details_schema()?;
        let details = validate_personal_details(&schema, &aadhar_applicant())?.into_inner();

        assert_eq!(details.name, "Ravi Kumar");
        assert_eq!(
            details.dob,
            DateOfBirthOrAge::Date {
                day: 15,
                month: 8,
                year: 1990
            }
        );
        assert_eq!(details.gender, Gender::Male);
        assert_eq!(details.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(
            details.government_id,
            GovernmentId::Aadhar("234567890123".to_string())
        );
        Ok(())
    }

    #[test]
    fn typed_view_reads_age_and_trimmed_pan() -> Result<(), Box<dyn Error>> {
        let schema = personal_details_schema()?;
        let input = aadhar_applicant()
            .with(DOB, "34")
            .with(GID_TYPE, "pan")
            .with(GID_TEXT, " ABCDE1234F ");
        let details = validate_personal_details(&schema, &input)?.into_inner();

        assert_eq!(details.dob, DateOfBirthOrAge::Age { years: 34.0 });
        assert_eq!(details.government_id.number(), "ABCDE1234F");
        Ok(())
    }

    #[test]
    fn typed_view_coerces_radix_ages() -> Result<(), Box<dyn Error>> {
        let schema = personal_details_schema()?;
        let input = aadhar_applicant().with(DOB, "0x10");
        let details = validate_personal_details(&schema, &input)?.into_inner();

        assert_eq!(details.dob, DateOfBirthOrAge::Age { years: 16.0 });
        Ok(())
    }

    #[test]
    fn invalid_submission_surfaces_field_errors() -> Result<(), Box<dyn Error>> {
        let schema = personal_details_schema()?;
        let input = aadhar_applicant().with(GENDER, "Male");
        let Err(PersonalDetailsError::Invalid(errors)) = validate_personal_details(&schema, &input)
        else {
            return Err("expected field errors".into());
        };
        assert_eq!(errors.field_names().collect::<Vec<_>>(), vec![GENDER]);
        Ok(())
    }

    #[test]
    fn from_valid_rejects_unvalidated_values() {
        let input = aadhar_applicant().with(GID_TYPE, "passport");
        assert_eq!(
            PersonalDetails::from_valid(&input),
            Err(PersonalDetailsError::Untyped { field: GID_TYPE })
        );
    }

    #[test]
    fn government_id_debug_is_masked() {
        let rendered = format!("{:?}", GovernmentId::Pan("ABCDE1234F".to_string()));
        assert_eq!(rendered, "Pan(\"******234F\")");
    }

    #[test]
    fn untyped_error_maps_to_invariant_envelope() {
        let envelope: ErrorEnvelope = PersonalDetailsError::Untyped { field: DOB }.into();
        assert_eq!(envelope.kind, regform_shared::ErrorKind::Invariant);
        assert_eq!(envelope.code, ErrorCode::new("form", "untyped_field"));
    }
}
