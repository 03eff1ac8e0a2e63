//! CLI argument parsing and command integration tests

mod support;

use std::fs;
use support::{lines, run_cli};
use tempfile::TempDir;

#[test]
fn test_cli_help_lists_commands() {
    let output = run_cli(&["--help"], None);

    assert_eq!(output.status, 0);
    assert!(output.stdout.contains("Usage:"));
    assert!(output.stdout.contains("analyze"));
    assert!(output.stdout.contains("generate"));
    assert!(output.stdout.contains("serve"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let output = run_cli(&["invalid-command"], None);

    assert_ne!(output.status, 0);
    assert!(
        output.stderr.contains("unrecognized subcommand") || output.stderr.contains("invalid")
    );
}

#[test]
fn test_analyze_missing_repository() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let output = run_cli(&["analyze", "--repo", missing.to_str().unwrap()], None);

    assert_ne!(output.status, 0);
    assert!(output.stderr.contains("does not exist"));
}

#[test]
fn test_analyze_missing_config_file() {
    let temp = TempDir::new().unwrap();

    let output = run_cli(
        &[
            "analyze",
            "--repo",
            temp.path().to_str().unwrap(),
            "--config",
            "nonexistent.yaml",
        ],
        None,
    );

    assert_ne!(output.status, 0);
    assert!(output.stderr.contains("Failed to read config file"));
}

#[test]
fn test_analyze_json_output_is_clean() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.py"), lines(8)).unwrap();

    let output = run_cli(
        &["analyze", "--repo", temp.path().to_str().unwrap(), "--json"],
        None,
    );

    assert_eq!(output.status, 0, "stderr: {}", output.stderr);
    let record: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(record["code"]["total_lines"], 8);
    assert_eq!(record["git"]["current_branch"], "unknown");
    assert_eq!(record["quality"]["project_age_days"], 1);
}

#[test]
fn test_generate_writes_report() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    let out = temp.path().join("site");
    fs::create_dir(&repo).unwrap();
    fs::write(repo.join("app.js"), lines(3)).unwrap();

    let output = run_cli(
        &[
            "generate",
            "--repo",
            repo.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
        None,
    );

    assert_eq!(output.status, 0, "stderr: {}", output.stderr);
    assert!(out.join("index.html").is_file());
    assert!(out.join("data.json").is_file());
    assert!(output.stdout.contains("Dashboard written to"));
}

#[test]
fn test_generate_rejects_invalid_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("repodash.yaml");
    fs::write(&config, "git_timeout_secs: 0\nport: 0\n").unwrap();

    let output = run_cli(
        &[
            "generate",
            "--repo",
            temp.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert_ne!(output.status, 0);
    assert!(output.stderr.contains("Invalid configuration"));
    assert!(output.stderr.contains("port"));
    assert!(output.stderr.contains("git_timeout_secs"));
}
