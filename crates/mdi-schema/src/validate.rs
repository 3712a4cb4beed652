//! # Schema Validation
//!
//! Runtime validation of import lines against the import-entry JSON Schema
//! (draft-07).
//!
//! ## Schema source
//!
//! The schema ships inside the binary ([`IMPORT_ENTRY_SCHEMA`]) so the tool
//! works without a checkout. Operators tracking a newer catalog API can point
//! [`ImportSchemaValidator::from_file`] at a replacement schema instead.
//!
//! ## Conditional rules
//!
//! Aspects whose `aspectType` is `dataplex-types.global.schema` must carry a
//! `data` object whose `fields` (when present) are column descriptors with
//! non-empty `name`, `mode`, `dataType` and `metadataType`. Every other
//! aspect only needs an object `data` payload.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The bundled import-entry schema.
pub const IMPORT_ENTRY_SCHEMA: &str =
    include_str!("../../../schemas/metadata-import-entry.schema.json");

/// Filename of the bundled schema, used in diagnostics.
pub const IMPORT_ENTRY_SCHEMA_NAME: &str = "metadata-import-entry.schema.json";

/// Failure to load the import-entry schema, or a line that violates it.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The line does not conform.
    #[error("{} validation error(s) against schema '{schema_name}':\n{violations}", .violations.len())]
    ValidationFailed {
        /// Schema the line was checked against.
        schema_name: String,
        /// Every violation found.
        violations: ValidationViolations,
    },

    /// The schema file could not be read or is not JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Bundled filename or override path.
        schema_name: String,
        /// Read or parse failure.
        reason: String,
    },

    /// The schema is JSON but could not be compiled into a validator.
    #[error("schema compile error for '{schema_name}': {reason}")]
    SchemaCompileError {
        /// Bundled filename or override path.
        schema_name: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// One failed constraint within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// What the keyword expected.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// All violations of one line, in validator order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when the line conformed.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take ownership of the violations.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled import-entry schema.
///
/// Compilation happens once at construction; [`validate`](Self::validate)
/// can then be called for every line of a file. The compiled validator is
/// `Send + Sync`.
pub struct ImportSchemaValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for ImportSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl ImportSchemaValidator {
    /// Compile the bundled import-entry schema.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled schema itself is broken, which the crate's
    /// tests rule out.
    pub fn bundled() -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(IMPORT_ENTRY_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: IMPORT_ENTRY_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(IMPORT_ENTRY_SCHEMA_NAME, &schema)
    }

    /// Load and compile a replacement schema from disk.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoadError` if the file cannot be read or parsed as JSON,
    /// and `SchemaCompileError` if it is not a valid draft-07 schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let path = path.as_ref();
        let schema_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(schema_name, &schema)
    }

    /// Compile an in-memory schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaCompileError` if the value is not a valid schema.
    pub fn from_value(
        schema_name: impl Into<String>,
        schema: &Value,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .build(schema)
            .map_err(|e| SchemaValidationError::SchemaCompileError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!(schema = %schema_name, "compiled import entry schema");
        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// Name of the schema in use (bundled filename or override path).
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Collect every violation of `instance`, in the order the validator
    /// reports them. Empty when the instance conforms.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Validate one parsed import line.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every violation
    /// if the line does not conform.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations },
            })
        }
    }
}
