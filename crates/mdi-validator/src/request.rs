//! # Import Request Generation
//!
//! Derives a metadata import API request from an import file: the request
//! scope is every entry group, entry type and aspect type the file touches.
//! Lines are read with the same parser and legacy adapter as validation.
//! Malformed lines are skipped; they are the validator's concern.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use mdi_core::{translate_legacy_keys, AspectKey, EntryTypeName, ImportRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::accumulator::Accumulator;
use crate::error::ValidatorError;
use crate::line::{LineOutcome, LineReader};

/// Tunable parts of the request that the file does not determine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequestOptions {
    /// Bucket URI the import file is uploaded to.
    pub source_storage_uri: String,
    /// `FULL` or `INCREMENTAL`.
    pub entry_sync_mode: String,
    /// `FULL` or `INCREMENTAL`.
    pub aspect_sync_mode: String,
    /// Import job log level.
    pub log_level: String,
}

impl Default for ImportRequestOptions {
    fn default() -> Self {
        Self {
            source_storage_uri: "gs://your-metadata-file-gcs-bucket/".to_string(),
            entry_sync_mode: "FULL".to_string(),
            aspect_sync_mode: "INCREMENTAL".to_string(),
            log_level: "DEBUG".to_string(),
        }
    }
}

/// A metadata import job request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Always `IMPORT`.
    #[serde(rename = "type")]
    pub request_type: String,
    /// What to import and how.
    pub import_spec: ImportSpec,
}

/// Body of an import request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Bucket URI holding the import file.
    pub source_storage_uri: String,
    /// Resources the job may touch.
    pub scope: ImportScope,
    /// How entries missing from the file are treated.
    pub entry_sync_mode: String,
    /// How aspects missing from the file are treated.
    pub aspect_sync_mode: String,
    /// Import job log level.
    pub log_level: String,
}

/// Resources the import job may modify. Each list is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportScope {
    /// `projects/<p>/locations/<l>/entryGroups/<g>` paths.
    #[serde(rename = "entryGroups")]
    pub entry_groups: Vec<String>,
    /// Entry type resource paths, as written in the file.
    pub entry_types: Vec<String>,
    /// Aspect type resource paths derived from the aspect keys.
    pub aspect_types: Vec<String>,
}

impl ImportRequest {
    /// Build a request from accumulated file contents.
    ///
    /// # Errors
    ///
    /// Fails on the first entry type that is not an entry-type resource path,
    /// or the first aspect key that is not `<project>.<location>.<id>`.
    pub fn from_accumulator(
        acc: &Accumulator,
        options: &ImportRequestOptions,
    ) -> Result<Self, ValidatorError> {
        let entry_types = acc
            .entry_types()
            .iter()
            .map(|entry_type| EntryTypeName::new(entry_type.as_str()).map(String::from))
            .collect::<Result<Vec<_>, _>>()?;
        let aspect_types = acc
            .aspect_keys()
            .iter()
            .map(|key| AspectKey::new(key.as_str()).map(|k| k.aspect_type_path()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            request_type: "IMPORT".to_string(),
            import_spec: ImportSpec {
                source_storage_uri: options.source_storage_uri.clone(),
                scope: ImportScope {
                    entry_groups: acc.entry_groups().into_iter().collect(),
                    entry_types,
                    aspect_types,
                },
                entry_sync_mode: options.entry_sync_mode.clone(),
                aspect_sync_mode: options.aspect_sync_mode.clone(),
                log_level: options.log_level.clone(),
            },
        })
    }
}

/// Scan an import file and build the request covering it.
pub fn generate_import_request(
    path: &Path,
    options: &ImportRequestOptions,
) -> Result<ImportRequest, ValidatorError> {
    let input_error = |source: io::Error| ValidatorError::Input {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(input_error)?;
    let acc = collect_scope(BufReader::new(file)).map_err(input_error)?;
    let request = ImportRequest::from_accumulator(&acc, options)?;
    info!(
        path = %path.display(),
        entry_groups = request.import_spec.scope.entry_groups.len(),
        entry_types = request.import_spec.scope.entry_types.len(),
        aspect_types = request.import_spec.scope.aspect_types.len(),
        "import request generated"
    );
    Ok(request)
}

/// Accumulate every parseable line of `reader`.
pub fn collect_scope<R: BufRead>(reader: R) -> io::Result<Accumulator> {
    let mut acc = Accumulator::new();
    let mut lines = LineReader::new(reader);
    while let Some(raw) = lines.next_line()? {
        match raw.parse() {
            LineOutcome::Blank => {}
            LineOutcome::Malformed { reason } => {
                warn!(line = raw.number, %reason, "skipping malformed line");
            }
            LineOutcome::Parsed(mut value) => {
                translate_legacy_keys(&mut value);
                acc.record(&ImportRecord::from_value(&value));
            }
        }
    }
    Ok(acc)
}
