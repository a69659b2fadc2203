//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is set must hold a valid value,
//! otherwise loading fails with `config:invalid_env`.

use crate::schema::{AppConfig, LogLevelSetting, OutputFormatSetting};
use regform_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: minimum log level (`debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "REGFORM_LOG_LEVEL";
/// Env var: structured logging on or off (`true|false`).
pub const ENV_LOG_ENABLED: &str = "REGFORM_LOG_ENABLED";
/// Env var: default output format (`text|json`).
pub const ENV_OUTPUT: &str = "REGFORM_OUTPUT";

const ENV_VARS: [&str; 3] = [ENV_LOG_LEVEL, ENV_LOG_ENABLED, ENV_OUTPUT];

/// Parsed env overrides; `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppEnv {
    /// `REGFORM_LOG_LEVEL`
    pub log_level: Option<LogLevelSetting>,
    /// `REGFORM_LOG_ENABLED`
    pub log_enabled: Option<bool>,
    /// `REGFORM_OUTPUT`
    pub output: Option<OutputFormatSetting>,
}

impl AppEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            log_level: parse_optional(map, ENV_LOG_LEVEL, LogLevelSetting::parse)?,
            log_enabled: parse_optional(map, ENV_LOG_ENABLED, parse_bool)?,
            output: parse_optional(map, ENV_OUTPUT, OutputFormatSetting::parse)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map: BTreeMap<String, String> = ENV_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Returns true when no variable was set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.log_level.is_none() && self.log_enabled.is_none() && self.output.is_none()
    }
}

/// Apply env overrides on top of a config.
#[must_use]
pub fn apply_env_overrides(mut config: AppConfig, env: &AppEnv) -> AppConfig {
    if let Some(level) = env.log_level {
        config.logging.level = level;
    }
    if let Some(enabled) = env.log_enabled {
        config.logging.enabled = enabled;
    }
    if let Some(format) = env.output {
        config.output.format = format;
    }
    config
}

fn parse_optional<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    parse(&value)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidValue {
            var,
            value: raw.clone(),
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// An env var held an unsupported value.
    InvalidValue {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidValue { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let message = error.to_string();
        let envelope = Self::expected(ErrorCode::new("config", "invalid_env"), message);
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidValue { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}
