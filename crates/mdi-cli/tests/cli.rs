//! Black-box tests: run the `mdi` binary and check stdout and exit codes.

use std::path::Path;
use std::process::{Command, Output};

const ROOT: &str = r#"{"entry":{"name":"projects/p/locations/us/entryGroups/g/entries/host","parentEntry":"","entryType":"projects/p/locations/global/entryTypes/instance","fullyQualifiedName":"mysql:`host`","entrySource":{"displayName":"host","system":"MySQL"},"aspects":{"p.global.instance":{"aspectType":"p.global.instance","data":{}}}},"aspectKeys":["p.global.instance"],"updateMask":["aspects"]}"#;
const CHILD: &str = r#"{"entry":{"name":"projects/p/locations/us/entryGroups/g/entries/host/databases/db","parentEntry":"projects/p/locations/us/entryGroups/g/entries/host","entryType":"projects/p/locations/global/entryTypes/database","fullyQualifiedName":"mysql:`host`.db","entrySource":{"displayName":"db","system":"MySQL"},"aspects":{"p.global.database":{"aspectType":"p.global.database","data":{}}}},"aspectKeys":["p.global.database"],"updateMask":["aspects"]}"#;
const ORPHAN: &str = r#"{"entry":{"name":"projects/p/locations/us/entryGroups/g/entries/host/databases/other/tables/t","parentEntry":"projects/p/locations/us/entryGroups/g/entries/host/databases/other","entryType":"projects/p/locations/global/entryTypes/table","fullyQualifiedName":"mysql:`host`.other.t","entrySource":{"displayName":"t","system":"MySQL"},"aspects":{"p.global.table":{"aspectType":"p.global.table","data":{}}}},"aspectKeys":["p.global.table"],"updateMask":["aspects"]}"#;

fn mdi(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdi"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn last_line(output: &Output) -> String {
    stdout(output).lines().last().unwrap_or_default().to_string()
}

#[test]
fn test_valid_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n{CHILD}\n")).unwrap();

    let output = mdi(&["validate", "ok.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(last_line(&output), "File is VALID");
    assert!(stdout(&output).contains("Validating line 2"));
}

#[test]
fn test_invalid_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.jsonl"), format!("{ROOT}\n{ORPHAN}\n")).unwrap();

    let output = mdi(&["validate", "bad.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(last_line(&output), "File is NOT VALID");
    assert!(stdout(&output).contains("**Found unknown parent"));
}

#[test]
fn test_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let output = mdi(&["validate", "absent.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(!stdout(&output).contains("File is"));
}

#[test]
fn test_exact_lines_flag_applies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n{CHILD}\n")).unwrap();

    let output = mdi(&["validate", "ok.jsonl", "--exact_lines", "3"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let output = mdi(&["validate", "ok.jsonl", "--min_lines", "2"], dir.path());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_json_format_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.jsonl"), format!("{ROOT}\n{ORPHAN}\n")).unwrap();

    let output = mdi(&["validate", "bad.jsonl", "--format", "json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["content_lines"], 2);
    let kinds: Vec<&str> = report["defects"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["kind"].as_str())
        .collect();
    assert_eq!(kinds, vec!["unknown_parent"]);
}

#[test]
fn test_list_mode_echoes_and_passes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.jsonl"), format!("{ROOT}\n{ORPHAN}\n")).unwrap();

    let output = mdi(&["validate", "bad.jsonl", "--list"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("\"fullyQualifiedName\": \"mysql:`host`.other.t\""));
}

#[test]
fn test_config_file_supplies_bounds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n{CHILD}\n")).unwrap();
    std::fs::write(dir.path().join("mdi.yaml"), "min_lines: 5\n").unwrap();

    let output = mdi(&["--config", "mdi.yaml", "validate", "ok.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    // Explicit flags win over the file.
    let output = mdi(
        &["--config", "mdi.yaml", "validate", "ok.jsonl", "--min_lines", "1"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_bad_config_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n")).unwrap();
    std::fs::write(dir.path().join("mdi.yaml"), "min_lines: 5\nexact_lines: 2\n").unwrap();

    let output = mdi(&["--config", "mdi.yaml", "validate", "ok.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_flags_repair_contradictory_config_bounds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n{CHILD}\n")).unwrap();
    std::fs::write(dir.path().join("mdi.yaml"), "exact_lines: 2\nmin_lines: 10\n").unwrap();

    let output = mdi(&["--config", "mdi.yaml", "validate", "ok.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let output = mdi(
        &["--config", "mdi.yaml", "validate", "ok.jsonl", "--min_lines", "1"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(last_line(&output), "File is VALID");
}

#[test]
fn test_import_request_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.jsonl"), format!("{ROOT}\n{CHILD}\n")).unwrap();

    let output = mdi(&["import-request", "ok.jsonl"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let written = std::fs::read_to_string(dir.path().join("metadata_import_request.json")).unwrap();
    let request: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(request["type"], "IMPORT");
    assert_eq!(
        request["import_spec"]["scope"]["entryGroups"],
        serde_json::json!(["projects/p/locations/us/entryGroups/g"])
    );
}
