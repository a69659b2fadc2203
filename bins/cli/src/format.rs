//! Output format helpers for CLI commands.

use clap::{Args, ValueEnum};
use regform_config::{AppConfig, OutputFormatSetting};

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses (overrides config and env).
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Output mode derived from CLI flags and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    pub format: OutputFormat,
}

impl OutputMode {
    /// Flag wins; otherwise the configured format.
    #[must_use]
    pub const fn resolve(args: &OutputArgs, config: Option<&AppConfig>) -> Self {
        let format = match (args.output, config) {
            (Some(value), _) => value,
            (None, Some(config)) => match config.output.format {
                OutputFormatSetting::Text => OutputFormat::Text,
                OutputFormatSetting::Json => OutputFormat::Json,
            },
            (None, None) => OutputFormat::Text,
        };
        Self { format }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

/// Pretty JSON with a trailing newline.
pub fn pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormatSetting::Json;

        let flagged = OutputArgs {
            output: Some(OutputFormat::Text),
        };
        assert_eq!(
            OutputMode::resolve(&flagged, Some(&config)).format,
            OutputFormat::Text
        );

        let unflagged = OutputArgs { output: None };
        assert!(OutputMode::resolve(&unflagged, Some(&config)).is_json());
        assert!(!OutputMode::resolve(&unflagged, None).is_json());
    }
}
