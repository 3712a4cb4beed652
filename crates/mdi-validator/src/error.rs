//! # Validator Errors
//!
//! Conditions that stop a run before a verdict exists. Everything else a
//! file can get wrong is a [`Defect`](crate::Defect) in the report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a validation or request-generation run.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The input file could not be opened or read.
    #[error("cannot read input file {path}: {source}")]
    Input {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The run configuration is unreadable or contradictory.
    #[error("invalid configuration {path}: {reason}")]
    Config {
        /// Path of the configuration file, `<inline>`, or `<resolved>` for the
        /// configuration after command-line overrides.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The import-entry schema could not be loaded or compiled.
    #[error(transparent)]
    Schema(#[from] mdi_schema::SchemaValidationError),

    /// An identifier needed to build an import request was malformed.
    #[error("cannot build import request: {0}")]
    ImportRequest(#[from] mdi_core::ValidationError),
}
