//! # mdi CLI entry point
//!
//! Parses command-line arguments, initialises tracing, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mdi_cli::import_request::{run_import_request, ImportRequestArgs};
use mdi_cli::load_config;
use mdi_cli::validate::{run_validate, ValidateArgs};

/// Metadata import file validator.
///
/// Checks catalog metadata import files (JSONL) for schema conformance,
/// unique entry names and resolvable parent entries, and generates the
/// import API request for a file.
#[derive(Parser, Debug)]
#[command(name = "mdi", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a metadata import file.
    Validate(ValidateArgs),

    /// Generate an import API request for a metadata import file.
    ImportRequest(ImportRequestArgs),
}

impl Cli {
    fn log_level(&self) -> &'static str {
        let debug_flag = matches!(&self.command, Commands::Validate(args) if args.debug);
        match (self.verbose, debug_flag) {
            (0, false) => "warn",
            (1, false) => "info",
            (0..=2, _) => "debug",
            _ => "trace",
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level(), cli.log_format);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mdi starting");

    let result = match &cli.command {
        Commands::Validate(args) => {
            load_config(cli.config.as_deref()).and_then(|config| run_validate(args, config))
        }
        Commands::ImportRequest(args) => run_import_request(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
