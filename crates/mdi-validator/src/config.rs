//! # Run Configuration
//!
//! Options for one validation run. Loadable from YAML; every field has a
//! default so a config file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ValidatorError;

/// Options for one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Stop after this many non-blank lines.
    pub top: Option<usize>,
    /// Require at least this many non-blank lines.
    pub min_lines: Option<usize>,
    /// Require exactly this many non-blank lines.
    pub exact_lines: Option<usize>,
    /// Parse and echo only; skip schema and cross-reference checks.
    pub list_only: bool,
    /// Translate older snake_case field names before validation.
    pub accept_legacy_field_names: bool,
    /// Schema file to use instead of the bundled one.
    pub schema_path: Option<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            top: None,
            min_lines: None,
            exact_lines: None,
            list_only: false,
            accept_legacy_field_names: true,
            schema_path: None,
        }
    }
}

impl ValidatorConfig {
    /// Load from a YAML file.
    ///
    /// Bounds are not checked here: command-line flags may still override
    /// them. [`MetadataFileValidator::new`](crate::MetadataFileValidator::new)
    /// checks the final configuration.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ValidatorError> {
        let label = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ValidatorError::Config {
            path: label.clone(),
            reason: e.to_string(),
        })?;
        Self::parse_yaml(&text, &label)
    }

    /// Parse from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ValidatorError> {
        Self::parse_yaml(text, "<inline>")
    }

    fn parse_yaml(text: &str, label: &str) -> Result<Self, ValidatorError> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| ValidatorError::Config {
            path: label.to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Reject contradictory options.
    pub fn validate(&self) -> Result<(), ValidatorError> {
        let reject = |reason: String| ValidatorError::Config {
            path: "<resolved>".to_string(),
            reason,
        };
        if self.top == Some(0) {
            return Err(reject("top must be at least 1".to_string()));
        }
        if let (Some(exact), Some(min)) = (self.exact_lines, self.min_lines) {
            if exact < min {
                return Err(reject(format!(
                    "exact_lines ({exact}) is below min_lines ({min})"
                )));
            }
        }
        Ok(())
    }
}
