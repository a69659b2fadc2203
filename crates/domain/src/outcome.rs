//! Validation outcome and per-field error details.

use regform_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Required value absent or empty.
    Missing,
    /// Value present but violated a constraint.
    Constraint,
}

/// Error reported for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
    #[serde(skip)]
    reason: FailureReason,
}

impl ErrorDetail {
    /// Failure of a required check.
    pub fn missing(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            reason: FailureReason::Missing,
        }
    }

    /// Failure of a value constraint.
    pub fn constraint(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            reason: FailureReason::Constraint,
        }
    }

    /// Check identifier (`validation` unless the check is named).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failure reason.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        self.reason
    }
}

/// Field name to error detail; at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, ErrorDetail>);

impl FieldErrors {
    /// Empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record the error for `field`, replacing any previous entry.
    pub fn insert(&mut self, field: &str, detail: ErrorDetail) {
        self.0.insert(field.to_string(), detail);
    }

    /// Error for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ErrorDetail> {
        self.0.get(field)
    }

    /// Returns true when `field` failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failed field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate `(field, detail)` pairs in sorted order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ErrorDetail> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a ErrorDetail);
    type IntoIter = btree_map::Iter<'a, String, ErrorDetail>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<FieldErrors> for ErrorEnvelope {
    fn from(errors: FieldErrors) -> Self {
        let failed = errors.field_names().collect::<Vec<_>>().join(",");
        let message = match errors.len() {
            1 => "1 field failed validation".to_string(),
            count => format!("{count} fields failed validation"),
        };
        let mut envelope = Self::expected(ErrorCode::invalid_submission(), message)
            .with_metadata("failedFields", failed);
        for (field, detail) in &errors {
            envelope = envelope.with_metadata(format!("error.{field}"), detail.message.clone());
        }
        envelope
    }
}

/// Result of validating one record snapshot.
///
/// Exactly one of values or errors exists. `Valid` carries the transformed
/// record, `Invalid` carries at least one field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationOutcome<R> {
    /// Every field passed.
    Valid {
        /// Record after transforms.
        values: R,
    },
    /// At least one field failed.
    Invalid {
        /// Per-field errors.
        errors: FieldErrors,
    },
}

impl<R> ValidationOutcome<R> {
    /// Returns true for `Valid`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Transformed values when valid.
    #[must_use]
    pub const fn values(&self) -> Option<&R> {
        match self {
            Self::Valid { values } => Some(values),
            Self::Invalid { .. } => None,
        }
    }

    /// Field errors when invalid.
    #[must_use]
    pub const fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { errors } => Some(errors),
        }
    }

    /// Convert into a plain `Result`.
    pub fn into_result(self) -> Result<R, FieldErrors> {
        match self {
            Self::Valid { values } => Ok(values),
            Self::Invalid { errors } => Err(errors),
        }
    }
}
