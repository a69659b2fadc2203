//! Declarative field-rule schema and its evaluation.
//!
//! A [`Schema`] is an ordered list of `(field, rule)` pairs over a record type
//! that implements [`FieldSource`]. Evaluation visits every field, so errors
//! accumulate across fields; inside one field the first failing [`Check`]
//! decides the reported error.

use crate::outcome::{ErrorDetail, FieldErrors, ValidationOutcome};
use regex::Regex;
use regform_shared::{ErrorCode, ErrorEnvelope, FieldSource};
use std::fmt;
use std::marker::PhantomData;

/// Default error `kind` for checks without a named identifier.
pub const DEFAULT_CHECK_KIND: &str = "validation";

/// Failures while assembling a schema. Evaluation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A pattern did not compile.
    InvalidPattern {
        /// Pattern source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
    /// A rule targets a field the record does not have.
    UnknownField {
        /// Field name used by the rule.
        field: String,
    },
    /// A conditional rule reads a discriminator the record does not have.
    UnknownDiscriminator {
        /// Field the conditional rule is attached to.
        field: String,
        /// Missing discriminator field.
        discriminator: String,
    },
    /// A conditional rule uses its own field as the discriminator.
    SelfDiscriminator {
        /// Offending field.
        field: String,
    },
    /// Two rules target the same field.
    DuplicateField {
        /// Field name.
        field: String,
    },
}

impl SchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidPattern { .. } => ErrorCode::new("schema", "invalid_pattern"),
            Self::UnknownField { .. } | Self::UnknownDiscriminator { .. } => {
                ErrorCode::new("schema", "unknown_field")
            },
            Self::SelfDiscriminator { .. } => ErrorCode::new("schema", "self_discriminator"),
            Self::DuplicateField { .. } => ErrorCode::new("schema", "duplicate_field"),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(formatter, "pattern /{pattern}/ does not compile: {reason}")
            },
            Self::UnknownField { field } => write!(formatter, "record has no field `{field}`"),
            Self::UnknownDiscriminator {
                field,
                discriminator,
            } => write!(
                formatter,
                "rule for `{field}` reads unknown discriminator `{discriminator}`"
            ),
            Self::SelfDiscriminator { field } => {
                write!(formatter, "rule for `{field}` cannot discriminate on itself")
            },
            Self::DuplicateField { field } => {
                write!(formatter, "field `{field}` has more than one rule")
            },
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for ErrorEnvelope {
    fn from(error: SchemaError) -> Self {
        let envelope = Self::invariant(error.error_code(), error.to_string());
        match error {
            SchemaError::InvalidPattern { pattern, .. } => {
                envelope.with_metadata("pattern", pattern)
            },
            SchemaError::UnknownField { field }
            | SchemaError::SelfDiscriminator { field }
            | SchemaError::DuplicateField { field } => envelope.with_metadata("field", field),
            SchemaError::UnknownDiscriminator {
                field,
                discriminator,
            } => envelope
                .with_metadata("field", field)
                .with_metadata("discriminator", discriminator),
        }
    }
}

/// A predicate over one non-empty field value.
#[derive(Debug, Clone)]
pub enum Test {
    /// Value must be present and non-empty.
    Required,
    /// Value must be present; an empty string still reaches later checks.
    Defined,
    /// At least `n` characters.
    MinChars(usize),
    /// At most `n` characters.
    MaxChars(usize),
    /// Exactly `n` characters.
    ExactChars(usize),
    /// Whole-value regular expression match.
    Pattern(Regex),
    /// Value is one of a fixed, case-sensitive set.
    OneOf(&'static [&'static str]),
    /// Value coerces to a number strictly greater than zero
    /// (see [`coerce_number`]).
    PositiveNumber,
    /// Passes when any inner test passes.
    AnyOf(Vec<Test>),
}

impl Test {
    /// Compile a pattern test.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|error| SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: error.to_string(),
            })
    }

    const fn rejects_absent(&self) -> bool {
        matches!(self, Self::Required | Self::Defined)
    }

    fn passes(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::Defined => true,
            Self::MinChars(min) => value.chars().count() >= *min,
            Self::MaxChars(max) => value.chars().count() <= *max,
            Self::ExactChars(len) => value.chars().count() == *len,
            Self::Pattern(regex) => regex.is_match(value),
            Self::OneOf(allowed) => allowed.contains(&value),
            Self::PositiveNumber => coerce_number(value).is_some_and(|number| number > 0.0),
            Self::AnyOf(tests) => tests.iter().any(|test| test.passes(value)),
        }
    }
}

/// Coerce a submitted string to a number the way browser form values are
/// coerced.
///
/// Surrounding whitespace is ignored and a blank value is zero. Decimal
/// literals with an optional sign and exponent, `Infinity` (signed or not),
/// and unsigned `0x`/`0o`/`0b` integer literals are numbers. Anything else,
/// including `NaN`, `inf` and digit separators, is `None`.
///
/// ```
/// use regform_domain::coerce_number;
///
/// assert_eq!(coerce_number(" 29 "), Some(29.0));
/// assert_eq!(coerce_number("0x10"), Some(16.0));
/// assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
/// assert_eq!(coerce_number("inf"), None);
/// assert_eq!(coerce_number(""), Some(0.0));
/// ```
#[must_use]
pub fn coerce_number(value: &str) -> Option<f64> {
    let value = value.trim();
    match value {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {},
    }

    let radix = match value.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = value.get(2..).filter(|digits| !digits.is_empty())?;
        return digits.chars().try_fold(0.0_f64, |total, ch| {
            ch.to_digit(radix)
                .map(|digit| total.mul_add(f64::from(radix), f64::from(digit)))
        });
    }

    // The float parser also takes `inf`/`nan` spellings; only exponents may
    // carry letters.
    if value
        .chars()
        .any(|ch| ch.is_alphabetic() && !matches!(ch, 'e' | 'E'))
    {
        return None;
    }
    value.parse::<f64>().ok().filter(|number| !number.is_nan())
}

/// A test paired with its failure message and optional named identifier.
#[derive(Debug, Clone)]
pub struct Check {
    test: Test,
    message: Box<str>,
    name: Option<&'static str>,
}

impl Check {
    /// Wrap an arbitrary test.
    pub fn new(test: Test, message: impl Into<Box<str>>) -> Self {
        Self {
            test,
            message: message.into(),
            name: None,
        }
    }

    /// Field must be present and non-empty.
    pub fn required(message: impl Into<Box<str>>) -> Self {
        Self::new(Test::Required, message)
    }

    /// Minimum character count.
    pub fn min_chars(min: usize, message: impl Into<Box<str>>) -> Self {
        Self::new(Test::MinChars(min), message)
    }

    /// Maximum character count.
    pub fn max_chars(max: usize, message: impl Into<Box<str>>) -> Self {
        Self::new(Test::MaxChars(max), message)
    }

    /// Exact character count.
    pub fn exact_chars(len: usize, message: impl Into<Box<str>>) -> Self {
        Self::new(Test::ExactChars(len), message)
    }

    /// Regular expression match.
    pub fn pattern(pattern: &str, message: impl Into<Box<str>>) -> Result<Self, SchemaError> {
        Ok(Self::new(Test::pattern(pattern)?, message))
    }

    /// Field must be present; empty strings are checked like any other value.
    pub fn defined(message: impl Into<Box<str>>) -> Self {
        Self::new(Test::Defined, message)
    }

    /// Membership in a fixed set.
    pub fn one_of(allowed: &'static [&'static str], message: impl Into<Box<str>>) -> Self {
        Self::new(Test::OneOf(allowed), message)
    }

    /// Passes when any of `tests` passes.
    pub fn any_of(tests: Vec<Test>, message: impl Into<Box<str>>) -> Self {
        Self::new(Test::AnyOf(tests), message)
    }

    /// Attach a named identifier reported as the error `kind`.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// The underlying test.
    #[must_use]
    pub const fn test(&self) -> &Test {
        &self.test
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error `kind` this check reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.name.unwrap_or(DEFAULT_CHECK_KIND)
    }

    fn failure(&self) -> ErrorDetail {
        if self.test.rejects_absent() {
            ErrorDetail::missing(self.kind(), &*self.message)
        } else {
            ErrorDetail::constraint(self.kind(), &*self.message)
        }
    }
}

/// Ordered checks for a single field.
///
/// A chain without a [`Test::Required`] or [`Test::Defined`] check is
/// optional: absent or empty values skip every other check.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    trim: bool,
    checks: Vec<Check>,
}

/// Result of running a chain: the transformed value (when a transform changed
/// it) or the first failure.
type ChainResult = Result<Option<String>, ErrorDetail>;

impl RuleChain {
    /// Empty (always passing) chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trim: false,
            checks: Vec::new(),
        }
    }

    /// Trim surrounding whitespace before checking; the trimmed value is
    /// written into the validated record.
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Append a check.
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Checks in evaluation order.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Returns true when the chain has no presence check.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        !self.checks.iter().any(|check| check.test.rejects_absent())
    }

    fn evaluate(&self, raw: Option<&str>) -> ChainResult {
        let value = raw.map(|value| if self.trim { value.trim() } else { value });
        let transformed = match (raw, value) {
            (Some(raw), Some(value)) if raw != value => Some(value.to_string()),
            _ => None,
        };

        let failed = match value {
            None => self.checks.iter().find(|check| check.test.rejects_absent()),
            Some("") => self
                .checks
                .iter()
                .find(|check| matches!(check.test, Test::Required))
                .or_else(|| {
                    if self.is_optional() {
                        None
                    } else {
                        self.first_failure("")
                    }
                }),
            Some(value) => self.first_failure(value),
        };
        failed.map_or(Ok(transformed), |check| Err(check.failure()))
    }

    fn first_failure(&self, value: &str) -> Option<&Check> {
        self.checks.iter().find(|check| !check.test.passes(value))
    }
}

/// Rule attached to one field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Unconditional chain.
    Chain(RuleChain),
    /// Two-branch dispatch on a sibling field of the same input snapshot.
    When {
        /// Sibling field whose value selects the branch.
        discriminator: &'static str,
        /// Discriminator value selecting `then`.
        equals: &'static str,
        /// Chain used when the discriminator equals `equals`.
        then: RuleChain,
        /// Chain used for any other value, including absence.
        otherwise: RuleChain,
    },
}

impl FieldRule {
    fn select<R: FieldSource>(&self, input: &R) -> &RuleChain {
        match self {
            Self::Chain(chain) => chain,
            Self::When {
                discriminator,
                equals,
                then,
                otherwise,
            } => {
                if input.field(discriminator) == Some(*equals) {
                    then
                } else {
                    otherwise
                }
            },
        }
    }
}

/// Validated collection of field rules for record type `R`.
#[derive(Debug, Clone)]
pub struct Schema<R> {
    rules: Vec<(&'static str, FieldRule)>,
    record: PhantomData<fn(&R)>,
}

impl<R: FieldSource + Clone> Schema<R> {
    /// Start building a schema.
    #[must_use]
    pub const fn builder() -> SchemaBuilder<R> {
        SchemaBuilder {
            rules: Vec::new(),
            record: PhantomData,
        }
    }

    /// Field names with rules, in evaluation order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|(field, _)| *field)
    }

    /// Rule attached to a field.
    #[must_use]
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
    }

    /// Validate one input snapshot.
    ///
    /// Every rule reads from `input`, never from partially transformed
    /// values, so a discriminator is seen exactly as submitted.
    pub fn validate(&self, input: &R) -> ValidationOutcome<R> {
        let mut values = input.clone();
        let mut errors = FieldErrors::new();

        for (field, rule) in &self.rules {
            match rule.select(input).evaluate(input.field(field)) {
                Ok(Some(transformed)) => {
                    values.set_field(field, transformed);
                },
                Ok(None) => {},
                Err(detail) => errors.insert(field, detail),
            }
        }

        if errors.is_empty() {
            ValidationOutcome::Valid { values }
        } else {
            ValidationOutcome::Invalid { errors }
        }
    }
}

/// Builder for [`Schema`]; structural mistakes surface at [`SchemaBuilder::build`].
#[derive(Debug)]
pub struct SchemaBuilder<R> {
    rules: Vec<(&'static str, FieldRule)>,
    record: PhantomData<fn(&R)>,
}

impl<R: FieldSource + Clone> SchemaBuilder<R> {
    /// Attach an unconditional chain to `field`.
    #[must_use]
    pub fn field(mut self, field: &'static str, chain: RuleChain) -> Self {
        self.rules.push((field, FieldRule::Chain(chain)));
        self
    }

    /// Attach a conditional rule to `field`, selected by `discriminator`.
    #[must_use]
    pub fn when(
        mut self,
        field: &'static str,
        discriminator: &'static str,
        equals: &'static str,
        then: RuleChain,
        otherwise: RuleChain,
    ) -> Self {
        self.rules.push((
            field,
            FieldRule::When {
                discriminator,
                equals,
                then,
                otherwise,
            },
        ));
        self
    }

    /// Check field references and produce the schema.
    pub fn build(self) -> Result<Schema<R>, SchemaError> {
        for (index, (field, rule)) in self.rules.iter().enumerate() {
            if !R::has_field(field) {
                return Err(SchemaError::UnknownField {
                    field: (*field).to_string(),
                });
            }
            if self
                .rules
                .iter()
                .skip(index + 1)
                .any(|(other, _)| other == field)
            {
                return Err(SchemaError::DuplicateField {
                    field: (*field).to_string(),
                });
            }
            if let FieldRule::When { discriminator, .. } = rule {
                if discriminator == field {
                    return Err(SchemaError::SelfDiscriminator {
                        field: (*field).to_string(),
                    });
                }
                if !R::has_field(discriminator) {
                    return Err(SchemaError::UnknownDiscriminator {
                        field: (*field).to_string(),
                        discriminator: (*discriminator).to_string(),
                    });
                }
            }
        }

        Ok(Schema {
            rules: self.rules,
            record: PhantomData,
        })
    }
}
