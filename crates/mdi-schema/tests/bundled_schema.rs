//! Integration test: the bundled import-entry schema against connector-shaped
//! lines, and its agreement with the record model in `mdi-core`.

use std::path::PathBuf;

use mdi_schema::{ImportSchemaValidator, IMPORT_ENTRY_SCHEMA};
use serde_json::{json, Value};

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn connector_line(system: &str, fqn: &str) -> Value {
    let group = system.to_lowercase();
    let table_aspect = format!("acme-prod.global.{group}-table");
    json!({
        "entry": {
            "name": format!("projects/acme-prod/locations/europe-west1/entryGroups/{group}/entries/host/databases/sales/tables/orders"),
            "parentEntry": format!("projects/acme-prod/locations/europe-west1/entryGroups/{group}/entries/host/databases/sales"),
            "entryType": format!("projects/acme-prod/locations/global/entryTypes/{group}-table"),
            "fullyQualifiedName": fqn,
            "entrySource": {"displayName": "orders", "system": system},
            "aspects": {
                "dataplex-types.global.schema": {
                    "aspectType": "dataplex-types.global.schema",
                    "data": {"fields": [
                        {"name": "order_id", "mode": "REQUIRED", "dataType": "NUMBER", "metadataType": "NUMBER"},
                        {"name": "placed_at", "mode": "NULLABLE", "dataType": "TIMESTAMP", "metadataType": "TIMESTAMP"},
                        {"name": "blob", "mode": "NULLABLE", "dataType": "BFILE", "metadataType": "OTHER"}
                    ]}
                },
                table_aspect.clone(): {
                    "aspectType": &table_aspect,
                    "data": {}
                }
            }
        },
        "aspectKeys": ["dataplex-types.global.schema", &table_aspect],
        "updateMask": ["aspects"]
    })
}

#[test]
fn test_schema_sentinel_matches_record_model() {
    let schema: Value = serde_json::from_str(IMPORT_ENTRY_SCHEMA).unwrap();
    let sentinel = &schema["definitions"]["aspect"]["if"]["properties"]["aspectType"]["const"];
    assert_eq!(sentinel, mdi_core::SCHEMA_ASPECT_TYPE);
}

#[test]
fn test_schema_file_loads_from_repository() {
    let path = repo_root().join("schemas/metadata-import-entry.schema.json");
    let validator = ImportSchemaValidator::from_file(&path).unwrap();
    assert!(validator.schema_name().ends_with("metadata-import-entry.schema.json"));
}

#[test]
fn test_connector_lines_pass() {
    let validator = ImportSchemaValidator::bundled().unwrap();
    let lines = [
        connector_line("MySQL", "mysql:`db-host.internal`.sales.orders"),
        connector_line("PostgreSQL", "postgresql:`pg-host`.sales.public.orders"),
        connector_line("Oracle", "oracle:`ora-host:1521`.SALES.ORDERS"),
        connector_line("SQLServer", "sqlserver:`mssql-host`.sales.dbo.orders"),
        connector_line("Snowflake", "snowflake:`acme.snowflakecomputing.com`.`SALES DB`.PUBLIC.ORDERS"),
    ];
    for line in &lines {
        let violations = validator.violations(line);
        assert!(
            violations.is_empty(),
            "{} rejected: {violations:?}",
            line["entry"]["fullyQualifiedName"]
        );
    }
}

#[test]
fn test_unquoted_host_rejected() {
    let validator = ImportSchemaValidator::bundled().unwrap();
    let line = connector_line("MySQL", "mysql:db-host.sales.orders");
    let violations = validator.violations(&line);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].instance_path, "/entry/fullyQualifiedName");
}

#[test]
fn test_every_violation_reported_for_one_line() {
    let validator = ImportSchemaValidator::bundled().unwrap();
    let mut line = connector_line("MySQL", "mysql:`h`.db.t");
    line["entry"]["name"] = json!("orders");
    line["entry"]["entryType"] = json!("table");
    line["entry"]["entrySource"] = json!({"displayName": "orders"});
    let paths: Vec<String> = validator
        .violations(&line)
        .into_iter()
        .map(|v| v.instance_path)
        .collect();
    assert!(paths.contains(&"/entry/name".to_string()));
    assert!(paths.contains(&"/entry/entryType".to_string()));
    assert!(paths.contains(&"/entry/entrySource".to_string()));
}
