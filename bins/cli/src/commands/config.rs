//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output};
use clap::ValueEnum;
use regform_config::{AppConfig, to_pretty_json, to_pretty_toml};

/// Serialization for `config show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigShowFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML, loadable with `--config`.
    Toml,
}

/// Print the effective config.
pub fn run_config_show(
    mode: OutputMode,
    config: &AppConfig,
    format: ConfigShowFormat,
) -> Result<CliOutput, CliError> {
    let rendered = match format {
        ConfigShowFormat::Json => to_pretty_json(config),
        ConfigShowFormat::Toml => to_pretty_toml(config),
    };
    match rendered {
        Ok(stdout) => Ok(CliOutput {
            stdout,
            stderr: String::new(),
            exit_code: ExitCode::Ok,
        }),
        Err(error) => Ok(format_error_output(mode, &error)),
    }
}
