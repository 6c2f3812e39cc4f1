//! End-to-end tests for `rolodexgen inspect` and `rolodexgen themes`.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the rolodexgen binary
fn rolodexgen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_rolodexgen")
}

#[test]
fn test_inspect_json() {
    let (data_path, _temp_dir) = temp_file("acme.csv", ACME_CSV);

    let output = Command::new(rolodexgen_bin())
        .args(["inspect", "--data", data_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["delimiter"], "comma");
    assert_eq!(result["row_count"], 1);
    assert_eq!(
        result["columns"],
        serde_json::json!(["Name", "Type", "Phone"])
    );
    assert_eq!(result["preview"][0]["Name"], "Acme, Inc");
    assert_eq!(result["preview"][0]["Phone"], "555-1234");
}

#[test]
fn test_inspect_plain_tsv() {
    let (data_path, _temp_dir) = temp_file("directory.tsv", DIRECTORY_TSV);

    let output = Command::new(rolodexgen_bin())
        .args(["inspect", "--data", data_path.to_str().unwrap(), "--rows", "2"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delimiter: tab"));
    assert!(stdout.contains("Rows: 3"));
    assert!(stdout.contains("  - Hours"));
    assert!(stdout.contains("Food Bank"));
    assert!(stdout.contains("Clinic"));
    assert!(!stdout.contains("Library | "), "Only two preview rows expected");
    assert!(stdout.contains("more column(s) not shown"));
}

#[test]
fn test_inspect_rejects_non_csv() {
    let (data_path, _temp_dir) = temp_file("photo.png", "not an image");

    let output = Command::new(rolodexgen_bin())
        .args(["inspect", "--data", data_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("CSV or TSV"));
}

#[test]
fn test_inspect_missing_file() {
    let output = Command::new(rolodexgen_bin())
        .args(["inspect", "--data", "/nonexistent/rolodexgen/data.csv"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_inspect_empty_file() {
    let (data_path, _temp_dir) = temp_file("empty.csv", "\n\n");

    let output = Command::new(rolodexgen_bin())
        .args(["inspect", "--data", data_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_themes_json() {
    let output = Command::new(rolodexgen_bin())
        .args(["themes", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let themes: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    let names: Vec<&str> = themes
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["auto", "ios", "md"]);
}
