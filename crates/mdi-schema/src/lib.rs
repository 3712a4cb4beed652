//! # mdi-schema: Import Entry Schema Validation
//!
//! Structural validation of one parsed metadata-import line against the
//! catalog import-entry JSON Schema (draft-07).
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module compiles the bundled
//! `schemas/metadata-import-entry.schema.json` (or an operator-supplied
//! replacement) once, and checks each line against it. Key type:
//!
//! - [`ImportSchemaValidator::validate`]: validates one line and returns
//!   every violation found, not just the first.
//!
//! ## Crate Policy
//!
//! - No internal crate dependencies.
//! - Violations are data, not panics: each carries the instance path,
//!   the schema path, and a human-readable message.

pub mod validate;

pub use validate::{
    ImportSchemaValidator, SchemaValidationError, ValidationViolations, Violation,
    IMPORT_ENTRY_SCHEMA, IMPORT_ENTRY_SCHEMA_NAME,
};
