//! Fixture builders shaped like the output of the database connectors:
//! one instance entry (root), its databases, and their tables.

#![allow(dead_code)]

use std::io::Write;

use mdi_validator::{MetadataFileValidator, ValidationReport, ValidatorConfig};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

pub const PROJECT: &str = "test-project";
pub const LOCATION: &str = "us-central1";
pub const GROUP: &str = "mysql";

pub fn entry_name(path: &str) -> String {
    format!("projects/{PROJECT}/locations/{LOCATION}/entryGroups/{GROUP}/entries/{path}")
}

fn entry_type(kind: &str) -> String {
    format!("projects/{PROJECT}/locations/global/entryTypes/mysql-{kind}")
}

fn aspect_key(kind: &str) -> String {
    format!("{PROJECT}.global.mysql-{kind}")
}

fn line(name: &str, parent: &str, kind: &str, fqn: &str, mut aspects: Value) -> Value {
    let key = aspect_key(kind);
    aspects[&key] = json!({"aspectType": key, "data": {}});
    let aspect_keys: Vec<String> = aspects
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    json!({
        "entry": {
            "name": name,
            "parentEntry": parent,
            "entryType": entry_type(kind),
            "fullyQualifiedName": fqn,
            "entrySource": {"displayName": name.rsplit('/').next().unwrap_or(name), "system": "MySQL"},
            "aspects": aspects
        },
        "aspectKeys": aspect_keys,
        "updateMask": ["aspects"]
    })
}

pub fn instance() -> Value {
    line(
        &entry_name("db-host"),
        "",
        "instance",
        "mysql:`db-host`",
        json!({}),
    )
}

pub fn database(db: &str) -> Value {
    line(
        &entry_name(&format!("db-host/databases/{db}")),
        &entry_name("db-host"),
        "database",
        &format!("mysql:`db-host`.{db}"),
        json!({}),
    )
}

pub fn table_with_columns(db: &str, table: &str, columns: Value) -> Value {
    line(
        &entry_name(&format!("db-host/databases/{db}/tables/{table}")),
        &entry_name(&format!("db-host/databases/{db}")),
        "table",
        &format!("mysql:`db-host`.{db}.{table}"),
        json!({
            "dataplex-types.global.schema": {
                "aspectType": "dataplex-types.global.schema",
                "data": {"fields": columns}
            }
        }),
    )
}

pub fn table(db: &str, table: &str) -> Value {
    table_with_columns(
        db,
        table,
        json!([
            {"name": "id", "mode": "REQUIRED", "dataType": "int", "metadataType": "NUMBER"},
            {"name": "label", "mode": "NULLABLE", "dataType": "varchar", "metadataType": "STRING"}
        ]),
    )
}

/// Instance, one database, and `tables` tables: `tables + 2` lines.
pub fn hierarchy(tables: usize) -> Vec<Value> {
    let mut lines = vec![instance(), database("sales")];
    lines.extend((0..tables).map(|i| table("sales", &format!("t{i}"))));
    lines
}

pub fn render(lines: &[Value]) -> String {
    lines
        .iter()
        .map(|v| format!("{v}\n"))
        .collect::<String>()
}

pub fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn validate_str(content: &str, config: ValidatorConfig) -> ValidationReport {
    let file = write_file(content);
    MetadataFileValidator::new(config)
        .unwrap()
        .validate_path(file.path())
        .unwrap()
}

pub fn validate_lines(lines: &[Value]) -> ValidationReport {
    validate_str(&render(lines), ValidatorConfig::default())
}
