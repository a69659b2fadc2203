//! # regform-shared
//!
//! Shared utilities, result types, and error handling for the regform workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - `Validated<T>` proof wrapper
//! - PII masking for logs and error metadata
//! - `FieldSource`, field-name based access to flat form records
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public error types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod fields;
pub mod invariants;
pub mod redaction;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use fields::{FieldSource, present_fields};
pub use invariants::Validated;
pub use redaction::{REDACTED, is_sensitive_key, mask, mask_if_sensitive};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
