//! # mdi-cli: Metadata Import Validator CLI
//!
//! Provides the `mdi` command-line interface.
//!
//! ## Subcommands
//!
//! - `mdi validate`: validate one JSONL import file and print a verdict.
//! - `mdi import-request`: derive an import API request from an import file.
//!
//! ```bash
//! mdi validate output/mysql-metadata.jsonl --min_lines 10
//! mdi validate output/mysql-metadata.jsonl --list --top 5
//! mdi --config mdi.yaml validate output/mysql-metadata.jsonl --format json
//! mdi import-request output/mysql-metadata.jsonl --output_filename request.json
//! ```
//!
//! ## Exit codes
//!
//! `0` valid, `1` not valid, `2` operational error (unreadable input,
//! bad configuration, unwritable output).

pub mod import_request;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use mdi_validator::ValidatorConfig;

/// Load the run configuration from `--config`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => ValidatorConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(ValidatorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_config_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdi.yaml");
        std::fs::write(&path, "min_lines: 3\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().min_lines, Some(3));
    }

    #[test]
    fn bad_config_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdi.yaml");
        std::fs::write(&path, "bogus: true\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load configuration"));
    }
}
