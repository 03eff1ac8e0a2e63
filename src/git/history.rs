//! Commit history collection
//!
//! The summary is assembled from five independent queries. Each query
//! returns its own `Result`; a failed query leaves only its field at the
//! default and never stops the remaining ones.

use super::process::run_git;
use crate::analysis::{CommitEntry, VcsSummary};
use crate::constants::git as git_consts;
use crate::utils::Logger;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The read-only history queries a VCS backend answers
#[async_trait]
pub trait HistoryQueries: Send + Sync {
    async fn commit_count(&self) -> Result<u64>;
    async fn current_branch(&self) -> Result<String>;
    async fn branches(&self) -> Result<Vec<String>>;
    async fn contributors(&self) -> Result<Vec<String>>;
    /// Newest-first log, at most `limit` entries
    async fn commit_log(&self, limit: usize) -> Result<Vec<CommitEntry>>;
}

/// History queries answered by the system `git` binary
pub struct GitCli {
    root: PathBuf,
    query_timeout: Duration,
    log_timeout: Duration,
}

impl GitCli {
    pub fn new(root: &Path, query_timeout: Duration, log_timeout: Duration) -> Self {
        Self {
            root: root.to_path_buf(),
            query_timeout,
            log_timeout,
        }
    }

    async fn query(&self, args: &[&str]) -> Result<String> {
        run_git(&self.root, args, self.query_timeout).await
    }
}

#[async_trait]
impl HistoryQueries for GitCli {
    async fn commit_count(&self) -> Result<u64> {
        let out = self.query(&["rev-list", "--count", "HEAD"]).await?;
        parse_commit_count(&out)
    }

    async fn current_branch(&self) -> Result<String> {
        let out = self.query(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        let branch = out.trim();
        if branch.is_empty() {
            anyhow::bail!("git rev-parse returned an empty branch name");
        }
        Ok(branch.to_string())
    }

    async fn branches(&self) -> Result<Vec<String>> {
        let out = self.query(&["branch", "-a"]).await?;
        Ok(parse_branches(&out))
    }

    async fn contributors(&self) -> Result<Vec<String>> {
        let out = self.query(&["log", "--pretty=format:%an"]).await?;
        Ok(parse_contributors(&out))
    }

    async fn commit_log(&self, limit: usize) -> Result<Vec<CommitEntry>> {
        let max_count = format!("--max-count={}", limit);
        let format = format!(
            "--pretty=format:%H{d}%aI{d}%s{d}%an",
            d = git_consts::LOG_FIELD_DELIMITER
        );
        let out = run_git(
            &self.root,
            &["log", &max_count, &format],
            self.log_timeout,
        )
        .await?;
        Ok(parse_commit_log(&out, limit))
    }
}

pub fn parse_commit_count(out: &str) -> Result<u64> {
    out.trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid commit count: '{}'", out.trim()))
}

/// Branch names from `git branch -a`, current-branch marker removed
pub fn parse_branches(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace("* ", ""))
        .collect()
}

/// Distinct author names, first-seen order preserved
pub fn parse_contributors(out: &str) -> Vec<String> {
    let mut contributors: Vec<String> = Vec::new();
    for name in out.lines().map(str::trim).filter(|n| !n.is_empty()) {
        if !contributors.iter().any(|existing| existing == name) {
            contributors.push(name.to_string());
        }
    }
    contributors
}

/// Parse `hash|date|subject|author` lines, skipping malformed ones.
///
/// The author field takes the remainder of the line.
pub fn parse_commit_log(out: &str, limit: usize) -> Vec<CommitEntry> {
    out.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.splitn(4, git_consts::LOG_FIELD_DELIMITER).collect();
            if parts.len() < 4 {
                return None;
            }
            Some(CommitEntry {
                short_hash: parts[0].chars().take(git_consts::SHORT_HASH_LEN).collect(),
                iso_date: parts[1].to_string(),
                subject: parts[2].to_string(),
                author: parts[3].to_string(),
            })
        })
        .take(limit)
        .collect()
}

fn field_or_default<T>(result: Result<T>, field: &str, default: T, logger: &Logger) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            logger.warn(&format!("git {} unavailable: {}", field, e));
            default
        }
    }
}

/// Assemble a summary from `source`, degrading field by field
pub async fn collect_summary(source: &dyn HistoryQueries, logger: &Logger) -> VcsSummary {
    let mut summary = VcsSummary {
        total_commits: field_or_default(source.commit_count().await, "commit count", 0, logger),
        ..VcsSummary::default()
    };

    summary.current_branch = field_or_default(
        source.current_branch().await,
        "current branch",
        git_consts::UNKNOWN_BRANCH.to_string(),
        logger,
    );
    summary.branches = field_or_default(source.branches().await, "branches", Vec::new(), logger);
    summary.contributors = field_or_default(
        source.contributors().await,
        "contributors",
        Vec::new(),
        logger,
    );

    let mut history = field_or_default(
        source.commit_log(git_consts::MAX_COMMIT_HISTORY).await,
        "commit log",
        Vec::new(),
        logger,
    );
    history.truncate(git_consts::MAX_COMMIT_HISTORY);

    summary.last_commit_date = history.first().map(|c| c.iso_date.clone());
    summary.first_commit_date = history.last().map(|c| c.iso_date.clone());
    summary.commit_history = history;

    summary
}

/// Read the history of the repository at `root`.
///
/// Without a `.git` entry at the root the default summary is returned and
/// git is never invoked.
pub async fn read_history(
    root: &Path,
    query_timeout: Duration,
    log_timeout: Duration,
    logger: &Logger,
) -> VcsSummary {
    if !root.join(git_consts::METADATA_DIR).exists() {
        return VcsSummary::default();
    }

    let git = GitCli::new(root, query_timeout, log_timeout);
    collect_summary(&git, logger).await
}
