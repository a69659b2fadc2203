//! # regform-app
//!
//! Application use cases for form resolution.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod resolve_form;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use resolve_form::{PersonalDetailsResolver, SchemaResolver, personal_details_resolver};

#[cfg(test)]
mod tests {
    use super::*;
    use regform_domain::domain_crate_version;
    use regform_ports::ports_crate_version;
    use regform_shared::shared_crate_version;

    #[test]
    fn app_can_use_ports_domain_shared() {
        assert!(!app_crate_version().is_empty());
        assert_eq!(ports_crate_version(), domain_crate_version());
        assert_eq!(shared_crate_version(), app_crate_version());
    }
}
