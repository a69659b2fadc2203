//! Raw Step-1 submission record.

use regform_fields_derive::FieldSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name: applicant name.
pub const NAME: &str = "name";
/// Field name: date of birth or age.
pub const DOB: &str = "dob";
/// Field name: gender.
pub const GENDER: &str = "gender";
/// Field name: mobile number.
pub const PHONE_NUMBER: &str = "phoneNumber";
/// Field name: government ID type.
pub const GID_TYPE: &str = "gidType";
/// Field name: government ID number.
pub const GID_TEXT: &str = "gidText";

/// Step-1 "Personal Details" submission exactly as entered.
///
/// Every field is an optional string; absent and empty are treated alike by
/// required checks.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, FieldSource)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetailsInput {
    /// Applicant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years or a `DD/MM/YYYY` date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// `male`, `female` or `other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Ten-digit mobile number; optional.
    #[field(name = "phoneNumber")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// `aadhar` or `pan`.
    #[field(name = "gidType")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid_type: Option<String>,
    /// Identity number interpreted according to `gid_type`.
    #[field(name = "gidText")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid_text: Option<String>,
}

impl PersonalDetailsInput {
    /// Builder-style setter by wire name; unknown names are ignored.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        regform_shared::FieldSource::set_field(&mut self, field, value.into());
        self
    }
}

impl fmt::Debug for PersonalDetailsInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = |value: &Option<String>| value.as_deref().map(regform_shared::mask);
        formatter
            .debug_struct("PersonalDetailsInput")
            .field("name", &masked(&self.name))
            .field("dob", &masked(&self.dob))
            .field("gender", &self.gender)
            .field("phone_number", &masked(&self.phone_number))
            .field("gid_type", &self.gid_type)
            .field("gid_text", &masked(&self.gid_text))
            .finish()
    }
}
