//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Args, Parser, Subcommand};
use commands::{ConfigShowFormat, InputSource, run_config_show, run_info, run_schema, run_validate};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode, pretty_json};
use regform_api::v1::{ApiV1ErrorDto, ApiV1ErrorKind, error_envelope_to_api_v1_error};
use regform_config::{AppConfig, load_app_config_std_env};
use regform_shared::ErrorEnvelope;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Env var holding the `tracing` filter for CLI diagnostics.
const ENV_TRACE: &str = "REGFORM_TRACE";

#[derive(Debug, Parser)]
#[command(
    name = "regform",
    version,
    about = "Validate registration form submissions",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Optional config file path (JSON/TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a personal details submission.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the submission JSON Schema.
    Schema,
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show version details.
    Info,
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config (defaults + file + env).
    Show {
        /// Serialization format.
        #[arg(long, value_enum, default_value_t = ConfigShowFormat::Json)]
        format: ConfigShowFormat,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Read the submission from a JSON file.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Submission JSON passed inline.
    #[arg(long)]
    input_json: Option<String>,
    /// Read the submission JSON from stdin.
    #[arg(long)]
    stdin: bool,
}

impl InputArgs {
    fn source(&self) -> InputSource {
        match (&self.input, &self.input_json) {
            (Some(path), _) => InputSource::File(path.clone()),
            (None, Some(json)) => InputSource::Inline(json.clone()),
            (None, None) => InputSource::Stdin,
        }
    }
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_TRACE).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli) -> Result<CliOutput, CliError> {
    match &cli.command {
        Commands::Schema => run_schema(),
        Commands::Info => {
            // A broken config must not hide version details.
            let config = load_app_config_std_env(cli.config.as_deref()).ok();
            run_info(OutputMode::resolve(&cli.output, config.as_deref()))
        },
        Commands::Validate { input } => with_config(cli, |mode, config| {
            run_validate(mode, config, &input.source())
        }),
        Commands::Config {
            command: ConfigCommands::Show { format },
        } => with_config(cli, |mode, config| run_config_show(mode, config, *format)),
    }
}

fn with_config(
    cli: &Cli,
    command: impl FnOnce(OutputMode, &AppConfig) -> Result<CliOutput, CliError>,
) -> Result<CliOutput, CliError> {
    let config = match load_app_config_std_env(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let mode = OutputMode::resolve(&cli.output, None);
            return Ok(format_error_output(mode, &error));
        },
    };
    let mode = OutputMode::resolve(&cli.output, Some(config.as_ref()));
    tracing::debug!(?mode, "config loaded");
    command(mode, config.as_ref())
}

pub(crate) fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let api_error = error_envelope_to_api_v1_error(error, None);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": api_error,
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        pretty_json(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\"}}\n".to_string()
        })
    } else {
        format_api_error_text(&api_error)
    };

    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::for_envelope(error),
    }
}

fn format_api_error_text(error: &ApiV1ErrorDto) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code);
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(match error.kind {
        ApiV1ErrorKind::Expected => "EXPECTED",
        ApiV1ErrorKind::Invariant => "INVARIANT",
    });
    out.push('\n');

    if let Some(meta) = error.meta.as_ref().filter(|meta| !meta.is_empty()) {
        out.push_str("meta:\n");
        for (key, value) in meta {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
