//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "verity-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_items(dir: &Path) -> String {
    let path = dir.join("items.json");
    std::fs::write(
        &path,
        r#"[
            {"id":"s1","pair":1,"type":"fact","form":"affirmative",
             "validity":"valid","plausibility":"high","text":"Snow is white"},
            {"id":"s2","pair":2,"type":"fact","form":"affirmative",
             "validity":"valid","plausibility":"high","text":"Water is wet"},
            {"id":"s3","pair":3,"type":"foil","form":"negated",
             "validity":"invalid","plausibility":"low","text":"Fire is cold"},
            {"id":"s4","pair":4,"type":"foil","form":"negated",
             "validity":"invalid","plausibility":"low","text":"Rocks are soft"}
        ]"#,
    )
    .unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_code_shape() {
    let (stdout, _, code) = run_cli(&["code"]);
    assert_eq!(code, 0, "code command failed");
    let printed = stdout.trim();
    assert_eq!(printed.len(), 9);
    assert_eq!(&printed[3..6], "zvz");
}

#[test]
fn test_items_partition_counts() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_items(dir.path());

    let (stdout, _, code) = run_cli(&["items", "partition", "--items", &items, "--participant", "2"]);
    assert_eq!(code, 0, "items partition failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["odd_count"], 2);
    assert_eq!(parsed["even_count"], 2);
    assert_eq!(parsed["list_assignment"], "even");
    assert_eq!(parsed["assigned"].as_array().unwrap().len(), 2);
}

#[test]
fn test_export_even_participant() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_items(dir.path());
    let out = dir.path().join("out.csv");

    let (_, stderr, code) = run_cli(&[
        "export",
        "--items",
        &items,
        "--worker-id",
        "w42",
        "--participant",
        "2",
        "--ratings",
        "3,5",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "export failed: {stderr}");

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("worker_id,participant_number,completion_code"));
    assert!(csv.contains("w42"));
}

#[test]
fn test_export_rejects_wrong_rating_count() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_items(dir.path());

    let (_, stderr, code) = run_cli(&[
        "export",
        "--items",
        &items,
        "--worker-id",
        "w1",
        "--participant",
        "2",
        "--ratings",
        "3",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("expected 2 ratings"));
}

#[test]
fn test_export_rejects_out_of_range_participant() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_items(dir.path());

    let (_, stderr, code) = run_cli(&[
        "export",
        "--items",
        &items,
        "--worker-id",
        "w1",
        "--participant",
        "1000",
        "--ratings",
        "3,5",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_run_scripted_no_upload() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_items(dir.path());

    let (stdout, stderr, code) = run_cli(&[
        "run",
        "--items",
        &items,
        "--worker-id",
        "w7",
        "--participant",
        "1",
        "--seed",
        "9",
        "--ratings",
        "0,5",
        "--no-upload",
    ]);
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("Your completion code:"));
    assert!(stderr.contains("upload skipped (w7.csv)"));
}
