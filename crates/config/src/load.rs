//! Config loading helpers (defaults + file + env).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{AppConfig, AppEnv, ValidatedAppConfig, apply_env_overrides};
use regform_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`AppEnv`)
/// - config file content, JSON or TOML
/// - defaults (`AppConfig::default()`)
pub fn load_app_config_from_sources(
    config_json: Option<&str>,
    env: &AppEnv,
) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    let config = match config_json {
        None => AppConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };
    finish(config, env)
}

/// Load the config from an optional file path.
pub fn load_app_config_from_path(
    config_path: Option<&Path>,
    env: &AppEnv,
) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    let config = match config_path {
        None => AppConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), ?format, "loading config file");
            parse_config_unvalidated(&config_text, format)?
        },
    };
    finish(config, env)
}

/// Load the config from std env and an optional file path.
pub fn load_app_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    let env = AppEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_app_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &AppConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &AppConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn finish(config: AppConfig, env: &AppEnv) -> Result<ValidatedAppConfig, ErrorEnvelope> {
    if !env.is_empty() {
        tracing::debug!(?env, "applying env overrides");
    }
    // env is applied before validation so it can repair a bad file value.
    apply_env_overrides(config, env)
        .validate()
        .map_err(Into::into)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<AppConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogLevelSetting, OutputFormatSetting};
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn env_wins_over_file_values() -> Result<(), Box<dyn Error>> {
        let config_json = r#"{ "version": 1, "output": { "format": "text" } }"#;
        let env = AppEnv {
            output: Some(OutputFormatSetting::Json),
            ..AppEnv::default()
        };

        let config = load_app_config_from_sources(Some(config_json), &env)?;
        assert_eq!(config.output.format, OutputFormatSetting::Json);
        Ok(())
    }

    #[test]
    fn file_values_win_over_defaults() -> Result<(), Box<dyn Error>> {
        let config_json = r#"{ "logging": { "level": "error" } }"#;
        let config = load_app_config_from_sources(Some(config_json), &AppEnv::default())?;
        assert_eq!(config.logging.level, LogLevelSetting::Error);
        assert_eq!(config.output.format, OutputFormatSetting::Text);
        Ok(())
    }

    #[test]
    fn serialization_is_deterministic() -> Result<(), Box<dyn Error>> {
        let config = load_app_config_from_sources(None, &AppEnv::default())?;
        let first = to_pretty_json(&config)?;
        let second = to_pretty_json(&config)?;
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
        assert!(to_pretty_toml(&config)?.contains("[logging]"));
        Ok(())
    }

    #[test]
    fn malformed_json_is_tagged_with_source() -> Result<(), Box<dyn Error>> {
        let Err(error) = load_app_config_from_sources(Some("{ \"version\": }"), &AppEnv::default())
        else {
            return Err("malformed JSON should fail".into());
        };
        assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
        assert_eq!(
            error.metadata.get("source").map(String::as_str),
            Some("config")
        );
        Ok(())
    }

    #[test]
    fn unsupported_extension_is_rejected() -> Result<(), Box<dyn Error>> {
        let path = PathBuf::from("regform.yaml");
        let Err(error) = load_app_config_from_path(Some(&path), &AppEnv::default()) else {
            return Err("yaml should be rejected".into());
        };
        assert_eq!(error.code, ErrorCode::new("config", "unsupported_format"));
        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() -> Result<(), Box<dyn Error>> {
        let path = PathBuf::from("definitely/not/here/regform.json");
        let Err(error) = load_app_config_from_path(Some(&path), &AppEnv::default()) else {
            return Err("missing file should fail".into());
        };
        assert_eq!(error.code, ErrorCode::new("config", "config_file_not_found"));
        assert!(error.is_expected());
        Ok(())
    }
}
