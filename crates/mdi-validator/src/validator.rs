//! # Metadata File Validator
//!
//! Drives one run: a single sequential scan that parses, schema-checks and
//! accumulates every line, then the whole-file cross-reference pass and the
//! line-count bound checks. Nothing recoverable stops the scan; the only
//! early exits are an unreadable input and the configured line limit.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use mdi_core::{translate_legacy_keys, ImportRecord, Sha256Accumulator};
use mdi_schema::ImportSchemaValidator;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::accumulator::Accumulator;
use crate::config::ValidatorConfig;
use crate::crossref::{check_cross_references, missing_field_warnings, unmapped_type_notes};
use crate::error::ValidatorError;
use crate::line::{LineOutcome, LineReader};
use crate::report::{Defect, DefectKind, RunMode, ValidationReport};
use crate::sink::ProgressSink;

/// Validates metadata import files.
///
/// Holds the compiled schema, so one instance can validate many files.
/// Each run owns its own accumulator; nothing is shared between runs.
#[derive(Debug)]
pub struct MetadataFileValidator {
    config: ValidatorConfig,
    schema: Option<ImportSchemaValidator>,
}

impl MetadataFileValidator {
    /// Build a validator. The schema is not loaded in list mode.
    pub fn new(config: ValidatorConfig) -> Result<Self, ValidatorError> {
        config.validate()?;
        let schema = if config.list_only {
            None
        } else {
            Some(match &config.schema_path {
                Some(path) => ImportSchemaValidator::from_file(path)?,
                None => ImportSchemaValidator::bundled()?,
            })
        };
        Ok(Self { config, schema })
    }

    /// The run configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a file without progress reporting.
    pub fn validate_path(&self, path: &Path) -> Result<ValidationReport, ValidatorError> {
        self.validate_path_with(path, &mut ())
    }

    /// Validate a file, reporting progress to `sink`.
    pub fn validate_path_with(
        &self,
        path: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<ValidationReport, ValidatorError> {
        let input_error = |source: io::Error| {
            warn!(path = %path.display(), error = %source, "cannot read input file");
            ValidatorError::Input {
                path: path.to_path_buf(),
                source,
            }
        };
        let file = File::open(path).map_err(input_error)?;
        self.scan(&path.display().to_string(), BufReader::new(file), sink)
            .map_err(input_error)
    }

    /// Validate an already-open source labelled `source`.
    pub fn validate_reader<R: BufRead>(
        &self,
        source: &str,
        reader: R,
        sink: &mut dyn ProgressSink,
    ) -> Result<ValidationReport, ValidatorError> {
        self.scan(source, reader, sink)
            .map_err(|e| ValidatorError::Input {
                path: source.into(),
                source: e,
            })
    }

    fn mode(&self) -> RunMode {
        if self.schema.is_some() {
            RunMode::Validate
        } else {
            RunMode::List
        }
    }

    fn scan<R: BufRead>(
        &self,
        source: &str,
        reader: R,
        sink: &mut dyn ProgressSink,
    ) -> io::Result<ValidationReport> {
        let mode = self.mode();
        info!(source, ?mode, "scanning metadata import file");

        let mut scan = Scan::new(sink);
        let mut lines = LineReader::new(reader);
        while let Some(raw) = lines.next_line()? {
            let outcome = raw.parse();
            if !outcome.is_blank() {
                if let Some(top) = self.config.top.filter(|top| scan.content_lines >= *top) {
                    debug!(top, line = raw.number, "line limit reached");
                    scan.stopped_at_top = Some(top);
                    scan.sink.on_top_reached(top);
                    break;
                }
            }
            scan.digest.update(&raw.bytes);
            scan.sink.on_line(raw.number, &outcome);

            match outcome {
                LineOutcome::Blank => {
                    scan.blank_lines += 1;
                    scan.push(Defect::at(raw.number, DefectKind::BlankLine));
                }
                LineOutcome::Malformed { reason } => {
                    scan.content_lines += 1;
                    scan.malformed_lines += 1;
                    warn!(line = raw.number, %reason, "malformed JSON line");
                    scan.push(Defect::at(
                        raw.number,
                        DefectKind::MalformedLine {
                            raw: raw.text().into_owned(),
                            reason,
                        },
                    ));
                }
                LineOutcome::Parsed(value) => {
                    scan.content_lines += 1;
                    self.check_record(&mut scan, raw.number, value);
                }
            }
        }

        if mode == RunMode::Validate {
            for defect in check_cross_references(&scan.accumulator) {
                scan.push(defect);
            }
        }
        for defect in self.bound_checks(scan.content_lines) {
            scan.push(defect);
        }

        let report = scan.finish(
            source,
            mode,
            self.schema.as_ref().map(|s| s.schema_name().to_string()),
        );
        info!(
            source,
            content_lines = report.content_lines,
            malformed = report.malformed_lines,
            invalid = report.invalid_entries,
            defects = report.defects.len(),
            verdict = %report.verdict(),
            "scan complete"
        );
        Ok(report)
    }

    fn check_record(&self, scan: &mut Scan<'_>, line: usize, mut value: Value) {
        let Some(schema) = &self.schema else {
            scan.sink.on_record(line, &value);
            return;
        };

        if self.config.accept_legacy_field_names {
            let keys = translate_legacy_keys(&mut value);
            if !keys.is_empty() {
                debug!(line, translated = keys.len(), "legacy field names translated");
                scan.push(Defect::at(line, DefectKind::LegacyFieldNames { keys }));
            }
        }
        scan.sink.on_record(line, &value);

        let violations = schema.violations(&value);
        if !violations.is_empty() {
            debug!(line, violations = violations.len(), "schema validation failed");
            scan.invalid_entries += 1;
            for v in violations {
                scan.push(Defect::at(
                    line,
                    DefectKind::SchemaViolation {
                        instance_path: v.instance_path,
                        schema_path: v.schema_path,
                        message: v.message,
                    },
                ));
            }
        }

        let record = ImportRecord::from_value(&value);
        for defect in missing_field_warnings(line, &record) {
            if let DefectKind::MissingField { field, .. } = &defect.kind {
                warn!(line, field = field.as_str(), "entry field missing");
            }
            scan.push(defect);
        }
        for defect in unmapped_type_notes(line, &record) {
            scan.push(defect);
        }
        scan.accumulator.record(&record);
    }

    fn bound_checks(&self, actual: usize) -> Vec<Defect> {
        let mut defects = Vec::new();
        if let Some(expected) = self.config.exact_lines {
            if actual != expected {
                defects.push(Defect::file(DefectKind::LineCountMismatch { expected, actual }));
            }
        }
        if let Some(minimum) = self.config.min_lines {
            if actual < minimum {
                defects.push(Defect::file(DefectKind::LineCountBelowMinimum { minimum, actual }));
            }
        }
        defects
    }
}

/// Mutable state of one run.
struct Scan<'a> {
    sink: &'a mut dyn ProgressSink,
    accumulator: Accumulator,
    digest: Sha256Accumulator,
    defects: Vec<Defect>,
    content_lines: usize,
    blank_lines: usize,
    malformed_lines: usize,
    invalid_entries: usize,
    stopped_at_top: Option<usize>,
}

impl<'a> Scan<'a> {
    fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            sink,
            accumulator: Accumulator::new(),
            digest: Sha256Accumulator::new(),
            defects: Vec::new(),
            content_lines: 0,
            blank_lines: 0,
            malformed_lines: 0,
            invalid_entries: 0,
            stopped_at_top: None,
        }
    }

    fn push(&mut self, defect: Defect) {
        self.sink.on_defect(&defect);
        self.defects.push(defect);
    }

    fn finish(self, source: &str, mode: RunMode, schema: Option<String>) -> ValidationReport {
        let acc = self.accumulator;
        ValidationReport {
            source: source.to_string(),
            mode,
            schema,
            content_lines: self.content_lines,
            blank_lines: self.blank_lines,
            malformed_lines: self.malformed_lines,
            invalid_entries: self.invalid_entries,
            root_entries: acc.root_entries(),
            stopped_at_top: self.stopped_at_top,
            sha256: self.digest.finalize().to_hex(),
            entry_names: acc.distinct_names().map(str::to_string).collect(),
            entry_types: acc.entry_types().iter().cloned().collect(),
            fully_qualified_names: acc.fully_qualified_names().iter().cloned().collect(),
            defects: self.defects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;

    const ROOT: &str = r#"{"entry":{"name":"projects/p/locations/us/entryGroups/g/entries/db","parentEntry":"","entryType":"projects/p/locations/global/entryTypes/database","fullyQualifiedName":"mysql:`h`.db","entrySource":{"displayName":"db","system":"MYSQL"},"aspects":{"p.global.database":{"aspectType":"p.global.database","data":{}}}},"aspectKeys":["p.global.database"],"updateMask":["aspects"]}"#;

    fn run(config: ValidatorConfig, input: &str) -> ValidationReport {
        MetadataFileValidator::new(config)
            .unwrap()
            .validate_reader("mem", input.as_bytes(), &mut ())
            .unwrap()
    }

    #[test]
    fn single_root_is_valid() {
        let report = run(ValidatorConfig::default(), ROOT);
        assert!(report.is_valid(), "{:?}", report.defects);
        assert_eq!(report.content_lines, 1);
        assert_eq!(report.root_entries, 1);
        assert_eq!(report.schema.as_deref(), Some(mdi_schema::IMPORT_ENTRY_SCHEMA_NAME));
    }

    #[test]
    fn blank_lines_counted_not_fatal() {
        let input = format!("\n{ROOT}\n   \n");
        let report = run(ValidatorConfig::default(), &input);
        assert!(report.is_valid());
        assert_eq!(report.blank_lines, 2);
        assert_eq!(report.content_lines, 1);
        let blank_lines: Vec<_> = report
            .defects
            .iter()
            .filter(|d| d.kind == DefectKind::BlankLine)
            .map(|d| d.line)
            .collect();
        assert_eq!(blank_lines, vec![Some(1), Some(3)]);
    }

    #[test]
    fn top_stops_after_content_lines() {
        let input = format!("{ROOT}\n\n{{broken\n");
        let config = ValidatorConfig {
            top: Some(1),
            ..ValidatorConfig::default()
        };
        let report = run(config, &input);
        assert_eq!(report.stopped_at_top, Some(1));
        assert_eq!(report.content_lines, 1);
        assert_eq!(report.malformed_lines, 0);
        assert!(report.is_valid());
    }

    #[test]
    fn digest_covers_scanned_bytes() {
        let report = run(ValidatorConfig::default(), ROOT);
        assert_eq!(
            report.sha256,
            mdi_core::ContentDigest::of(ROOT.as_bytes()).to_hex()
        );
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = ValidatorConfig {
            top: Some(0),
            ..ValidatorConfig::default()
        };
        assert!(matches!(
            MetadataFileValidator::new(config),
            Err(ValidatorError::Config { .. })
        ));
    }

    #[test]
    fn missing_schema_file_is_schema_error() {
        let config = ValidatorConfig {
            schema_path: Some("/nonexistent/schema.json".into()),
            ..ValidatorConfig::default()
        };
        assert!(matches!(
            MetadataFileValidator::new(config),
            Err(ValidatorError::Schema(_))
        ));
    }

    #[test]
    fn non_object_line_is_invalid_entry() {
        let report = run(ValidatorConfig::default(), "42\n");
        assert_eq!(report.malformed_lines, 0);
        assert_eq!(report.invalid_entries, 1);
        assert!(!report.is_valid());
        assert!(report.count(Severity::Warning) >= 1);
    }

    #[test]
    fn list_mode_reports_list() {
        let config = ValidatorConfig {
            list_only: true,
            ..ValidatorConfig::default()
        };
        let report = run(config, "{\"anything\": true}\n");
        assert_eq!(report.mode, RunMode::List);
        assert_eq!(report.schema, None);
        assert!(report.defects.is_empty());
    }

    #[test]
    fn missing_file_is_input_error() {
        let validator = MetadataFileValidator::new(ValidatorConfig::default()).unwrap();
        let err = validator
            .validate_path(Path::new("/nonexistent/import.jsonl"))
            .unwrap_err();
        assert!(matches!(err, ValidatorError::Input { .. }));
    }
}
