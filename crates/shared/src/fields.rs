//! Field-name based access to flat form records.
//!
//! Validation rules address fields by their wire name (`phoneNumber`, not
//! `phone_number`). Records implement [`FieldSource`], usually through
//! `#[derive(FieldSource)]`, so a schema can read and rewrite them by name.

use std::collections::BTreeMap;

/// Read/write access to the string fields of a flat record.
pub trait FieldSource {
    /// Wire names of every field, in declaration order.
    const FIELD_NAMES: &'static [&'static str];

    /// Borrow a field's current value. `None` when the field is absent or
    /// the name is unknown.
    fn field(&self, name: &str) -> Option<&str>;

    /// Replace a field's value. Returns `false` for unknown names.
    fn set_field(&mut self, name: &str, value: String) -> bool;

    /// Returns true when `name` is one of [`FieldSource::FIELD_NAMES`].
    fn has_field(name: &str) -> bool {
        Self::FIELD_NAMES.contains(&name)
    }
}

/// Collect the present fields of a record, keyed by wire name.
pub fn present_fields<R: FieldSource>(record: &R) -> BTreeMap<&'static str, &str> {
    R::FIELD_NAMES
        .iter()
        .filter_map(|name| record.field(name).map(|value| (*name, value)))
        .collect()
}
