//! # regform-config
//!
//! Configuration schema, env overrides, and layered loading for the CLI.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (defaults + file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{AppEnv, ENV_LOG_ENABLED, ENV_LOG_LEVEL, ENV_OUTPUT, EnvParseError, apply_env_overrides};
pub use load::{
    load_app_config_from_path, load_app_config_from_sources, load_app_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    AppConfig, CURRENT_CONFIG_VERSION, ConfigSchemaError, LogLevelSetting, LoggingConfig,
    OutputConfig, OutputFormatSetting, ValidatedAppConfig, app_config_schema,
    parse_app_config_json, parse_app_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regform_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        assert!(!config_crate_version().is_empty());
        assert_eq!(config_crate_version(), shared_crate_version());
    }
}
