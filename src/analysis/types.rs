//! The metrics record produced by one analysis run
//!
//! Every section derives `Default`, and the default is the value a pass
//! reports when it cannot analyze anything. A degraded section is therefore
//! indistinguishable from a genuinely empty one.

use crate::constants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name, location and time of a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    pub repo_name: String,
    pub repo_path: String,
    pub scanned_at: DateTime<Utc>,
}

/// One retained entry of the commit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub short_hash: String,
    pub iso_date: String,
    pub subject: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcsSummary {
    pub total_commits: u64,
    pub branches: Vec<String>,
    pub current_branch: String,
    /// Distinct author names in first-seen order
    pub contributors: Vec<String>,
    /// Newest first, capped at [`constants::git::MAX_COMMIT_HISTORY`]
    pub commit_history: Vec<CommitEntry>,
    /// Date of the oldest retained entry, not necessarily the root commit
    pub first_commit_date: Option<String>,
    pub last_commit_date: Option<String>,
}

impl Default for VcsSummary {
    fn default() -> Self {
        Self {
            total_commits: 0,
            branches: Vec::new(),
            current_branch: constants::git::UNKNOWN_BRANCH.to_string(),
            contributors: Vec::new(),
            commit_history: Vec::new(),
            first_commit_date: None,
            last_commit_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    pub file_count: u64,
    pub line_count: u64,
}

/// A non-test source file ranked by size in lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainFile {
    pub path: String,
    pub lines: u64,
    pub ext: String,
}

/// Lines of code split into mutually exclusive buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocBreakdown {
    pub source: u64,
    pub tests: u64,
    pub config: u64,
    pub docs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeSummary {
    pub files_by_extension: BTreeMap<String, ExtensionStats>,
    pub total_lines: u64,
    pub main_files: Vec<MainFile>,
    pub loc_breakdown: LocBreakdown,
}

impl CodeSummary {
    /// Extensions ordered by line count, largest first
    pub fn extensions_by_lines(&self) -> Vec<(&str, ExtensionStats)> {
        let mut ranked: Vec<(&str, ExtensionStats)> = self
            .files_by_extension
            .iter()
            .map(|(ext, stats)| (ext.as_str(), *stats))
            .collect();
        ranked.sort_by(|a, b| b.1.line_count.cmp(&a.1.line_count));
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFile {
    pub path: String,
    pub tests: u64,
    pub lines: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    pub total_tests: u64,
    pub test_files: Vec<TestFile>,
    pub test_frameworks: BTreeSet<String>,
    /// Line-ratio proxy in `0..=100`, not measured coverage
    pub test_coverage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencySummary {
    pub package_managers: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub total_deps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: String,
    pub size_kb: f64,
    pub ext: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInventory {
    pub total_files: u64,
    pub config_files: Vec<String>,
    pub documentation: Vec<String>,
    pub largest_files: Vec<LargeFile>,
    pub file_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiSummary {
    pub platforms: Vec<String>,
    pub config_files: Vec<String>,
    pub stages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub project_age_days: u64,
    pub commits_per_day: f64,
    pub refactoring_ratio: f64,
    pub code_organization_score: u32,
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self {
            project_age_days: 1,
            commits_per_day: 0.0,
            refactoring_ratio: 0.0,
            code_organization_score: constants::quality::CODE_ORGANIZATION_SCORE,
        }
    }
}

/// Complete output of one analysis run, handed to the renderer as a whole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(flatten)]
    pub identity: RepositoryIdentity,
    pub git: VcsSummary,
    pub code: CodeSummary,
    pub tests: TestSummary,
    pub dependencies: DependencySummary,
    pub files: FileInventory,
    pub ci: CiSummary,
    pub quality: QualityMetrics,
}
