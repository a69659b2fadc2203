//! Application configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Unknown keys are rejected at every level.
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.

use regform_shared::{ErrorCode, ErrorEnvelope, Validated};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AppConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Structured logging settings.
    pub logging: LoggingConfig,
    /// CLI output settings.
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Validated configuration.
pub type ValidatedAppConfig = Validated<AppConfig>;

impl AppConfig {
    /// Validate the config.
    pub fn validate(self) -> Result<ValidatedAppConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(Validated::new(self))
    }
}

/// Structured logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Emit structured resolver events.
    pub enabled: bool,
    /// Minimum level emitted.
    pub level: LogLevelSetting,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevelSetting::Info,
        }
    }
}

/// Configured minimum log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelSetting {
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warn and above.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevelSetting {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// CLI output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Default output format when `--output` is not given.
    pub format: OutputFormatSetting,
}

/// Configured output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatSetting {
    /// Human-readable report.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormatSetting {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a config from a JSON string, applying validation.
pub fn parse_app_config_json(input: &str) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    let config: AppConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Parse a config from a TOML string, applying validation.
pub fn parse_app_config_toml(input: &str) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    let config: AppConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// JSON Schema for the config file.
#[must_use]
pub fn app_config_schema() -> schemars::Schema {
    schemars::schema_for!(AppConfig)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let message = error.to_string();
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => Self::expected(
                ErrorCode::new("config", "unsupported_version"),
                message,
            )
            .with_metadata("found", found.to_string())
            .with_metadata("supported", supported.to_string()),
        }
    }
}
