//! Binary entry point for the doctag CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Report reST tags in a docstring buffer
//! doctag scan docstring.txt --format rest
//!
//! # Report tags as file offsets for a docstring starting at byte 120
//! doctag scan docstring.txt --format epytext --base-offset 120
//!
//! # Annotate a Python file outline
//! doctag annotate outline.json --format rest
//!
//! # Build a quoted string literal
//! doctag quote 'say "hi"'
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use doctag::cli::{annotate_outline, run_quote, scan_file};
use doctag::config::{CliOverrides, ResolvedConfig};
use doctag::error::{DoctagError, OutputErrorCode};
use doctag::format::DocStringFormat;
use doctag::output::{emit_response, ErrorResponse, QuoteResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Documentation tag scanner for Python docstrings.
///
/// All output is JSON on stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "doctag", version, about = "Documentation tag scanner for Python docstrings")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a docstring format name.
fn parse_format(s: &str) -> Result<DocStringFormat, String> {
    s.parse::<DocStringFormat>().map_err(|e| e.to_string())
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Report every documentation tag in a text file.
    ///
    /// The whole file is treated as one docstring buffer.
    Scan {
        /// File holding the docstring text.
        file: PathBuf,
        /// Docstring format (plain, epytext, rest, numpy, google).
        #[arg(long, value_parser = parse_format)]
        format: Option<DocStringFormat>,
        /// Offset added to every reported range.
        #[arg(long)]
        base_offset: Option<usize>,
        /// Byte offset to start scanning from.
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Scan for these tags instead of the format's table (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// With --tag: skip occurrences followed by a letter or digit.
        #[arg(long, requires = "tags")]
        word_end: bool,
    },
    /// Annotate a Python file outline given as JSON.
    Annotate {
        /// Outline JSON file.
        outline: PathBuf,
        /// Default docstring format when the outline does not set one.
        #[arg(long, value_parser = parse_format)]
        format: Option<DocStringFormat>,
    },
    /// Print a value as an escaped, double-quoted string literal.
    Quote {
        /// Raw value.
        value: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like every other response.
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), DoctagError> {
    match cli.command {
        Command::Scan {
            file,
            format,
            base_offset,
            start,
            tags,
            word_end,
        } => {
            let config = ResolvedConfig::resolve(&CliOverrides {
                format,
                base_offset,
            })?;
            let response = scan_file(&file, &config, &tags, word_end, start)?;
            emit(&response)
        }
        Command::Annotate { outline, format } => {
            let config = ResolvedConfig::resolve(&CliOverrides {
                format,
                base_offset: None,
            })?;
            let response = annotate_outline(&outline, &config)?;
            emit(&response)
        }
        Command::Quote { value } => emit(&QuoteResponse::new(run_quote(&value))),
    }
}

fn emit<T: serde::Serialize>(response: &T) -> Result<(), DoctagError> {
    emit_response(response, &mut io::stdout())
        .map_err(|e| DoctagError::internal(format!("failed to write output: {}", e)))
}
