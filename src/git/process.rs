//! Timeout-bounded git subprocess execution

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Create a git `Command` isolated from inherited repository overrides
fn git_cmd(repo_root: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo_root)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .stdin(Stdio::null())
        .kill_on_drop(true);
    cmd
}

/// Run `git <args>` in `repo_root` and return its stdout.
///
/// Fails on spawn errors, on a non-zero exit, and when `timeout` elapses; the
/// child is killed in the last case. The call is attempted exactly once.
pub async fn run_git(repo_root: &Path, args: &[&str], timeout: Duration) -> Result<String> {
    let display = args.join(" ");

    let output = tokio::time::timeout(timeout, git_cmd(repo_root).args(args).output())
        .await
        .map_err(|_| anyhow!("git {} timed out after {:?}", display, timeout))?
        .with_context(|| format!("Failed to execute git {}", display))?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            display,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
