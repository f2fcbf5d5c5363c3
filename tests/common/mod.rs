//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Helper to get a stockplan command
pub fn stockplan() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("stockplan"));
    cmd.env_remove("STOCKPLAN_DATA").env_remove("STOCKPLAN_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    stockplan()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to run a command inside a project and require success
pub fn run_ok(tmp: &TempDir, args: &[&str]) -> String {
    let output = stockplan()
        .current_dir(tmp.path())
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stockplan {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to create a test item
pub fn create_test_item(tmp: &TempDir, name: &str, category: &str) {
    run_ok(tmp, &["item", "add", name, "--category", category]);
}

/// Read the project's data blob as JSON
pub fn read_data(tmp: &TempDir) -> serde_json::Value {
    let content = fs::read_to_string(tmp.path().join(".stockplan/data.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Helper to set up the flour example: order 50 on day one, stock 10 on day two
pub fn setup_flour(tmp: &TempDir) {
    create_test_item(tmp, "flour", "bread");
    run_ok(tmp, &["set", "flour", "2024-01-01", "stock", "20"]);
    run_ok(tmp, &["set", "flour", "2024-01-01", "order", "50"]);
    run_ok(tmp, &["set", "flour", "2024-01-01", "safety", "5"]);
    run_ok(tmp, &["set", "flour", "2024-01-02", "stock", "10"]);
}
