//! # Import-Request Subcommand
//!
//! Builds the metadata import API request covering one import file, prints
//! it, and writes it next to the caller.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mdi_validator::{generate_import_request, ImportRequestOptions};

/// Arguments for the `mdi import-request` subcommand.
#[derive(Args, Debug)]
pub struct ImportRequestArgs {
    /// Path to the JSONL metadata import file.
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Where to write the request.
    #[arg(
        long = "output_filename",
        visible_alias = "output-filename",
        default_value = "metadata_import_request.json"
    )]
    pub output_filename: PathBuf,

    /// Bucket URI the import file is uploaded to.
    #[arg(long = "source_storage_uri", visible_alias = "source-storage-uri")]
    pub source_storage_uri: Option<String>,
}

impl ImportRequestArgs {
    fn options(&self) -> ImportRequestOptions {
        let mut options = ImportRequestOptions::default();
        if let Some(uri) = &self.source_storage_uri {
            options.source_storage_uri = uri.clone();
        }
        options
    }
}

/// Execute the import-request subcommand.
pub fn run_import_request(args: &ImportRequestArgs) -> Result<u8> {
    let request = generate_import_request(&args.file_path, &args.options()).with_context(|| {
        format!(
            "failed to build import request from {}",
            args.file_path.display()
        )
    })?;
    let json = serde_json::to_string_pretty(&request).context("failed to render request")?;

    println!("\n{json}");
    std::fs::write(&args.output_filename, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", args.output_filename.display()))?;
    println!("\nGenerated import request: {}", args.output_filename.display());
    Ok(0)
}
