//! # mdi-validator: Metadata Import File Validator
//!
//! Decides whether a catalog metadata import file (JSONL) is fit for import
//! and reports every defect found, never just the first.
//!
//! ## Pipeline
//!
//! One deterministic pass over the file, then one pass over the accumulated
//! state:
//!
//! 1. [`line`]: read and parse each line; blank lines are counted, invalid
//!    JSON is recorded and skipped.
//! 2. Schema: each parsed line is checked against the import-entry schema
//!    ([`mdi_schema::ImportSchemaValidator`]).
//! 3. [`accumulator`]: identifying fields are extracted (even from lines that
//!    failed the schema) and folded into name/parent/type/FQN collections.
//! 4. [`crossref`]: after the scan: duplicate names, dangling parents,
//!    missing roots, and unmapped column types.
//! 5. [`report`]: everything is gathered into a [`ValidationReport`] whose
//!    verdict is valid only if no error-severity defect was found.
//!
//! ## Crate Policy
//!
//! - Recoverable problems are [`Defect`] values, not errors. Only failing to
//!   open or read the input ([`ValidatorError::Input`]) ends a run early.
//! - No printing: progress is surfaced through the [`ProgressSink`] seam and
//!   `tracing` events.

pub mod accumulator;
pub mod config;
pub mod crossref;
pub mod error;
pub mod line;
pub mod report;
pub mod request;
pub mod sink;
pub mod validator;

pub use accumulator::Accumulator;
pub use config::ValidatorConfig;
pub use error::ValidatorError;
pub use line::{LineOutcome, LineReader, RawLine};
pub use report::{Defect, DefectKind, RunMode, Severity, ValidationReport, Verdict};
pub use request::{generate_import_request, ImportRequest, ImportRequestOptions};
pub use sink::ProgressSink;
pub use validator::MetadataFileValidator;
