//! Common test support utilities and fixtures
//!
//! Shared by the integration tests; not every test binary uses every helper.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the repodash CLI with given arguments
pub fn run_cli(args: &[&str], cwd: Option<&Path>) -> CliOutput {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "--quiet", "--manifest-path"]);
    cmd.arg(&manifest);
    cmd.arg("--");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().expect("Failed to execute cargo run");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn git(path: &Path, args: &[&str]) -> std::io::Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }
    Ok(())
}

/// Initialize an empty git repository on branch `main`
pub fn init_git_repo(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;

    git(path, &["init"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    // Configure git (required for commits)
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;

    Ok(())
}

/// Stage everything and commit with both author and committer date set to
/// `date` (any format git accepts, e.g. RFC 3339)
pub fn commit_all_at(path: &Path, message: &str, date: &str) -> std::io::Result<()> {
    git(path, &["add", "-A"])?;

    let output = Command::new("git")
        .args(["commit", "--allow-empty", "-m", message])
        .current_dir(path)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }
    Ok(())
}

/// Create a branch at the current commit without switching to it
pub fn create_branch(path: &Path, name: &str) -> std::io::Result<()> {
    git(path, &["branch", name])
}

/// `n` lines of filler text
pub fn lines(n: usize) -> String {
    "x = 1\n".repeat(n)
}
