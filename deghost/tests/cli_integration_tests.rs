// deghost/tests/cli_integration_tests.rs
//! Tests for the CLI surface: scan mode, rule filtering, custom configs,
//! and JSON export plumbing.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn deghost_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("deghost"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    deghost_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test_log::test]
fn scan_reports_findings_without_writing() {
    let dir = TempDir::new().unwrap();
    let body = "// TODO: implement this before release\nfn stub() {}\n// AI generated this function\n";
    write_file(dir.path(), "src/lib.rs", body);

    deghost_cmd()
        .arg("-q")
        .arg("scan")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SCAN REPORT"))
        .stdout(predicate::str::contains("todo_implement_this"))
        .stdout(predicate::str::contains("Scan only: no files were written."));

    // Scan never writes, even without --dry-run.
    assert_eq!(fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(), body);
}

#[test]
fn disabled_rule_stops_matching() {
    let dir = TempDir::new().unwrap();
    // A single bare comment: removed by `empty_line_comment`, untouched by
    // the run-collapse cleanup (which needs three in a row).
    let body = "fn f() {}\n//\nfn g() {}\n";
    write_file(dir.path(), "src/lib.rs", body);

    deghost_cmd()
        .arg("-q")
        .arg("scrub")
        .arg(dir.path())
        .arg("-x")
        .arg("empty_line_comment")
        .assert()
        .success();
    assert_eq!(fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(), body);

    deghost_cmd()
        .arg("-q")
        .arg("scrub")
        .arg(dir.path())
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(),
        "fn f() {}\nfn g() {}\n"
    );
}

#[test]
fn custom_config_rules_merge_over_defaults() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "rules.yaml",
        r#"
line_rules:
  - name: scratch_marker
    pattern: '^\s*//\s*scratch\s*$'
"#,
    );
    write_file(dir.path(), "tree/src/app.ts", "// scratch\nexport const x = 1;\n");

    deghost_cmd()
        .arg("-q")
        .arg("scrub")
        .arg(dir.path().join("tree"))
        .arg("--config")
        .arg(dir.path().join("rules.yaml"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("tree/src/app.ts")).unwrap(),
        "export const x = 1;\n"
    );
}

#[test]
fn invalid_config_fails_fast() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "rules.yaml",
        r#"
line_rules:
  - name: broken
    pattern: "(["
"#,
    );
    write_file(dir.path(), "tree/src/app.ts", "export const x = 1;\n");

    deghost_cmd()
        .arg("-q")
        .arg("scrub")
        .arg(dir.path().join("tree"))
        .arg("--config")
        .arg(dir.path().join("rules.yaml"))
        .assert()
        .failure();
}

#[test]
fn json_file_export_contains_full_findings() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "tree/notes.md",
        "Certainly! Here's how the setup works.\n",
    );
    let json_path = dir.path().join("stats.json");

    deghost_cmd()
        .arg("-q")
        .arg("scan")
        .arg(dir.path().join("tree"))
        .arg("--json-file")
        .arg(&json_path)
        .assert()
        .success();

    let stats: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(stats["files_processed"], 1);
    let findings = stats["findings"].as_array().unwrap();
    assert!(findings
        .iter()
        .any(|f| f["rule"] == "certainly" && f["category"] == "telltale"));
    assert!(findings.iter().any(|f| f["rule"] == "heres_a"));
}

#[test]
fn json_stdout_conflicts_with_json_file() {
    let dir = TempDir::new().unwrap();
    deghost_cmd()
        .arg("scrub")
        .arg(dir.path())
        .arg("--json-stdout")
        .arg("--json-file")
        .arg(dir.path().join("stats.json"))
        .assert()
        .failure();
}
