//! # Validate Subcommand
//!
//! Validates one metadata import file. Text output narrates the scan line by
//! line and ends with `File is VALID` or `File is NOT VALID`; JSON output is
//! the full report and nothing else.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use mdi_validator::{
    Defect, DefectKind, LineOutcome, MetadataFileValidator, ProgressSink, RunMode,
    ValidationReport, ValidatorConfig,
};

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Progress lines and a summary.
    Text,
    /// The report as pretty-printed JSON.
    Json,
}

/// Arguments for the `mdi validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSONL metadata import file.
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Print per-line detail and listings of distinct names, types and FQNs.
    #[arg(long)]
    pub debug: bool,

    /// Pretty-print each parsed line and skip all validation.
    #[arg(long)]
    pub list: bool,

    /// Only process the first N non-blank lines.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Require at least N non-blank lines.
    #[arg(long = "min_lines", visible_alias = "min-lines", value_name = "N")]
    pub min_lines: Option<usize>,

    /// Require exactly N non-blank lines.
    #[arg(long = "exact_lines", visible_alias = "exact-lines", value_name = "N")]
    pub exact_lines: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ValidateArgs {
    /// Overlay explicit flags on a base configuration.
    pub fn apply(&self, mut config: ValidatorConfig) -> ValidatorConfig {
        if self.top.is_some() {
            config.top = self.top;
        }
        if self.min_lines.is_some() {
            config.min_lines = self.min_lines;
        }
        if self.exact_lines.is_some() {
            config.exact_lines = self.exact_lines;
        }
        if self.list {
            config.list_only = true;
        }
        config
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the file is valid, 1 when it is not.
pub fn run_validate(args: &ValidateArgs, base: ValidatorConfig) -> Result<u8> {
    let config = args.apply(base);
    let validator = MetadataFileValidator::new(config).context("failed to prepare validator")?;

    let report = match args.format {
        OutputFormat::Json => {
            let report = validator
                .validate_path(&args.file_path)
                .with_context(|| format!("failed to validate {}", args.file_path.display()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to render report")?
            );
            report
        }
        OutputFormat::Text => {
            println!(
                "\nValidating metadata import file: {}",
                args.file_path.display()
            );
            let mut console = ConsoleSink::new(args.debug, validator.config().list_only);
            let report = validator
                .validate_path_with(&args.file_path, &mut console)
                .with_context(|| format!("failed to validate {}", args.file_path.display()))?;
            for line in summary_lines(&report, args.debug) {
                println!("{line}");
            }
            report
        }
    };

    Ok(if report.is_valid() { 0 } else { 1 })
}

/// Prints scan progress to stdout.
#[derive(Debug)]
pub struct ConsoleSink {
    debug: bool,
    list: bool,
}

impl ConsoleSink {
    /// A sink printing extra per-line detail when `debug` is set, and every
    /// parsed line when `list` is set.
    pub fn new(debug: bool, list: bool) -> Self {
        Self { debug, list }
    }
}

impl ProgressSink for ConsoleSink {
    fn on_line(&mut self, line: usize, outcome: &LineOutcome) {
        println!("Validating line {line}");
        if self.debug && matches!(outcome, LineOutcome::Parsed(_)) {
            println!("  JSON is well-formed");
        }
    }

    fn on_record(&mut self, _line: usize, value: &Value) {
        if self.list {
            println!("{}", pretty(value));
        }
    }

    fn on_defect(&mut self, defect: &Defect) {
        // Whole-file findings are part of the summary.
        let Some(line) = defect.line else {
            return;
        };
        match &defect.kind {
            DefectKind::BlankLine => println!("  File has an empty line: {line}"),
            DefectKind::MalformedLine { raw, reason } => {
                println!("Line {line}: invalid JSON: {reason}");
                println!("    Line {line}: {raw}");
            }
            _ => println!("  {defect}"),
        }
    }

    fn on_top_reached(&mut self, top: usize) {
        println!("Reached line specified in top: {top}");
        println!("Finishing\n");
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The end-of-run summary, ending with the verdict line.
pub fn summary_lines(report: &ValidationReport, debug: bool) -> Vec<String> {
    let mut out = Vec::new();

    if report.mode == RunMode::Validate {
        if report.malformed_lines > 0 {
            out.push(format!("**File has {} malformed lines", report.malformed_lines));
        } else {
            out.push("\n==All lines in file are well-formed JSON".to_string());
        }

        for (name, count) in report.duplicate_names() {
            out.push(format!(
                "!!!{count} entries in file have the same entry name '{name}'. Must be unique."
            ));
        }

        if debug {
            push_listing(&mut out, "Entry Names:", &report.entry_names);
            push_listing(&mut out, "Entry Types:", &report.entry_types);
            push_listing(&mut out, "Fully Qualified Names:", &report.fully_qualified_names);
        }

        let mut unknown = 0usize;
        for parent in report.unknown_parents() {
            out.push(format!("**Found unknown parent {parent}"));
            unknown += 1;
        }
        if unknown == 0 {
            out.push("==All parent entries found".to_string());
        }

        if report
            .defects
            .iter()
            .any(|d| d.kind == DefectKind::NoRootEntries)
        {
            out.push("Warning: file has no root entry (no entry with an empty parentEntry)".to_string());
        }
    }

    out.push(format!(
        "==File has {} lines ({} blank lines skipped)",
        report.content_lines, report.blank_lines
    ));

    if report.mode == RunMode::Validate {
        if report.invalid_entries > 0 {
            out.push(format!("**File has {} invalid entries", report.invalid_entries));
        } else {
            out.push("==All entries passed validation against the import entry schema".to_string());
        }
    }

    for defect in &report.defects {
        match &defect.kind {
            DefectKind::LineCountMismatch { expected, .. } => out.push(format!(
                "**File has different number of lines to exact_lines value {expected}"
            )),
            DefectKind::LineCountBelowMinimum { minimum, .. } => out.push(format!(
                "**File has less lines than min_lines value {minimum}"
            )),
            _ => {}
        }
    }

    if debug {
        out.push(format!("sha256: {}", report.sha256));
    }
    out.push(report.verdict().to_string());
    out
}

fn push_listing(out: &mut Vec<String>, title: &str, values: &[String]) {
    out.push(format!("\n{title}"));
    out.extend(values.iter().cloned());
}
