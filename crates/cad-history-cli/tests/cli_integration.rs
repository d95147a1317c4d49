//! Integration tests for the cadh CLI.
//!
//! Every run gets its own config file and working directory so user
//! configuration and `.env` files never leak in.
//!
//! Run with: `cargo test --package cad-history-cli --test cli_integration`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Helper to run the cadh CLI in an isolated directory.
fn run_cadh_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cadh"))
        .current_dir(dir)
        .env("CAD_HISTORY_CONFIG", dir.join("config.json"))
        .env_remove("CAD_HISTORY_DATA")
        .env_remove("CAD_HISTORY_SHARE_URL")
        .args(args)
        .output()
        .expect("Failed to execute cadh command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// =============================================================================
// Graph Command Tests
// =============================================================================

#[test]
fn test_graph_json_uses_sample_by_default() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["graph", "--json"]);

    assert!(output.status.success(), "cadh graph should succeed");
    let value = json(&output);
    assert_eq!(value["commits"].as_array().unwrap().len(), 10);
    assert_eq!(value["edges"].as_array().unwrap().len(), 9);
    assert_eq!(value["bounds"]["width"], 650.0);
    assert_eq!(value["bounds"]["height"], 280.0);

    let first = &value["edges"][0];
    assert!(first["svg_path"].as_str().unwrap().starts_with("M "));
    assert!(first["color"].as_str().unwrap().starts_with('#'));
}

#[test]
fn test_graph_text_lists_commits() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["graph"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Robotic Arm Assembly: 10 commits, 9 edges"));
    assert!(text.contains("commit-1 -> commit-2"));
}

#[test]
fn test_layout_assigns_lanes() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["layout", "--json"]);

    assert!(output.status.success());
    let rows = json(&output);
    let row = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "commit-9")
        .unwrap();
    assert_eq!(row["lane"], 1);
    assert_eq!(row["generation"], 5);
    assert_eq!(row["x"], 550.0);
    assert_eq!(row["y"], 120.0);
}

#[test]
fn test_dangling_parent_fails_strict_load() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("broken.json");
    fs::write(
        &data,
        r#"{
            "project": { "id": "p", "name": "Broken", "branches": [] },
            "commits": [
                { "id": "a", "message": "m", "timestamp": "", "author": "",
                  "branch": "main", "x": 0, "y": 0, "parents": ["ghost"] }
            ]
        }"#,
    )
    .unwrap();

    let output = run_cadh_in_dir(
        temp.path(),
        &["graph", "--data", data.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ghost"));
}

// =============================================================================
// Tree Command Tests
// =============================================================================

#[test]
fn test_tree_starts_with_root_expanded() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["tree", "commit-8", "--json"]);

    assert!(output.status.success());
    let rows = json(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["path"], "RoboticArm_Assembly.SLDASM");
    assert_eq!(rows[0]["expanded"], true);
    assert_eq!(rows[1]["depth"], 1);
}

#[test]
fn test_tree_expand_flags() {
    let temp = TempDir::new().unwrap();

    let output = run_cadh_in_dir(
        temp.path(),
        &[
            "tree",
            "commit-8",
            "--expand",
            "RoboticArm_Assembly.SLDASM/Gripper_Assembly.SLDASM",
            "--json",
        ],
    );
    assert!(output.status.success());
    assert_eq!(json(&output).as_array().unwrap().len(), 8);

    let output = run_cadh_in_dir(temp.path(), &["tree", "commit-8", "--all", "--json"]);
    assert!(output.status.success());
    assert_eq!(json(&output).as_array().unwrap().len(), 14);
}

#[test]
fn test_tree_without_data() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["tree", "commit-2"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No assembly data for commit commit-2"));
}

#[test]
fn test_tree_unknown_commit_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["tree", "commit-42"]);
    assert!(!output.status.success());
}

// =============================================================================
// Action Command Tests
// =============================================================================

#[test]
fn test_download_part() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(
        temp.path(),
        &[
            "download",
            "commit-8",
            "RoboticArm_Assembly.SLDASM/Base_Assembly.SLDASM/Base_Plate.SLDPRT",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Downloading: Base_Plate.SLDPRT"));
    assert!(text.contains("Size:  2.4 MB"));
}

#[test]
fn test_download_individual_files() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(
        temp.path(),
        &["download", "commit-7", "--kind", "individual-files"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("individual-files of commit-7: 6 downloads"));
}

#[test]
fn test_fork_entire_project() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(
        temp.path(),
        &["fork", "commit-8", "entire-project", "--branch", "my-feature-branch"],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Created new branch: \"my-feature-branch\""));
    assert!(text.contains("Forked from: entire-project"));
}

#[test]
fn test_fork_rejects_blank_branch() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(
        temp.path(),
        &["fork", "commit-8", "entire-project", "--branch", "  "],
    );
    assert!(!output.status.success());
}

#[test]
fn test_share_link() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["share", "commit-5"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "http://localhost:3000/project/proj-1/commit/commit-5"
    );
}

#[test]
fn test_summary_json() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["summary", "--json"]);

    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["total_commits"], 10);
    assert_eq!(value["contributors"].as_array().unwrap().len(), 3);
    assert_eq!(value["branches"][0]["actual_commits"], 6);
}

#[test]
fn test_sample_output_can_be_loaded_back() {
    let temp = TempDir::new().unwrap();
    let output = run_cadh_in_dir(temp.path(), &["sample"]);
    assert!(output.status.success());

    let data = temp.path().join("sample.json");
    fs::write(&data, &output.stdout).unwrap();

    let output = run_cadh_in_dir(
        temp.path(),
        &["summary", "--json", "--data", data.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert_eq!(json(&output)["project_id"], "proj-1");
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_set_get_and_reset() {
    let temp = TempDir::new().unwrap();

    let output = run_cadh_in_dir(temp.path(), &["config", "set", "layout", "computed"]);
    assert!(output.status.success());
    assert!(temp.path().join("config.json").exists());

    let output = run_cadh_in_dir(temp.path(), &["config", "get", "layout"]);
    assert_eq!(stdout(&output).trim(), "computed");

    let output = run_cadh_in_dir(temp.path(), &["graph", "--json"]);
    assert_eq!(json(&output)["bounds"]["height"], 290.0);

    let output = run_cadh_in_dir(temp.path(), &["config", "reset"]);
    assert!(output.status.success());
    let output = run_cadh_in_dir(temp.path(), &["config", "get", "layout"]);
    assert_eq!(stdout(&output).trim(), "supplied");
}

#[test]
fn test_config_path_and_unknown_key() {
    let temp = TempDir::new().unwrap();

    let output = run_cadh_in_dir(temp.path(), &["config", "path"]);
    assert!(output.status.success());
    assert!(stdout(&output).trim().ends_with("config.json"));

    let output = run_cadh_in_dir(temp.path(), &["config", "get", "colour"]);
    assert!(!output.status.success());
}
