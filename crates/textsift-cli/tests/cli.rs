//! End-to-end tests for the textsift binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SAMPLE: &str = "\
Acme Corporation
123 Main Street

Invoice #: INV-2024-001
Invoice Date: 01/15/2024
Due Date: 02/15/2024

Subtotal: $100.00
Tax: $20.00
Total: $120.00
";

#[test]
fn process_text_format_prints_extracted_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();

    Command::cargo_bin("textsift")
        .unwrap()
        .args(["process", input.to_str().unwrap(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2024-001"))
        .stdout(predicate::str::contains("Acme Corporation"))
        .stdout(predicate::str::contains("$120.00"));
}

#[test]
fn process_json_format_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();

    let output = Command::cargo_bin("textsift")
        .unwrap()
        .args(["process", input.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["invoice_no"], "INV-2024-001");
    assert_eq!(value["date1_mmddyyyy"], "01/15/2024");
}

#[test]
fn process_missing_file_fails() {
    Command::cargo_bin("textsift")
        .unwrap()
        .args(["process", "no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_writes_fixed_shape_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("sample.txt"), SAMPLE).unwrap();
    fs::write(input_dir.join("empty.txt"), "   \n").unwrap();
    fs::write(input_dir.join("skip.md"), "ignored").unwrap();

    let output = dir.path().join("out.csv");

    Command::cargo_bin("textsift")
        .unwrap()
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    // Header plus one row per .txt file, in sorted order.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("filename,text_excerpt,date_primary_mmddyyyy,"));
    assert!(lines[1].starts_with("empty.txt,"));
    assert!(lines[1].contains("empty file"));
    assert!(lines[2].starts_with("sample.txt,"));
    assert!(lines[2].contains("INV-2024-001"));
    assert!(lines[2].contains("$120.00"));
}

#[test]
fn batch_with_no_matching_files_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    Command::cargo_bin("textsift")
        .unwrap()
        .args([
            "batch",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .txt files"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("textsift")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_excerpt_length"));
}
