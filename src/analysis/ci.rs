//! CI configuration detection
//!
//! Paths are probed in the fixed order of [`CI_PROBES`], so the reported
//! platforms do not depend on filesystem iteration order. Stage names are
//! extracted only from GitLab CI files.

use super::types::CiSummary;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Relative path (file or directory) and the platform it indicates
pub const CI_PROBES: &[(&str, &str)] = &[
    (".gitlab-ci.yml", "GitLab CI"),
    (".github/workflows", "GitHub Actions"),
    (".circleci/config.yml", "CircleCI"),
    ("azure-pipelines.yml", "Azure Pipelines"),
    (".travis.yml", "Travis CI"),
    ("Jenkinsfile", "Jenkins"),
];

const STAGE_SOURCE: &str = ".gitlab-ci.yml";

static STAGES_RE: OnceLock<Regex> = OnceLock::new();

fn stages_regex() -> &'static Regex {
    // The block runs until the next top-level key or the end of the file
    STAGES_RE.get_or_init(|| {
        Regex::new(r"(?s)stages:\s*\n(.*?)(?:\n\w+:|\z)").expect("stages pattern is valid")
    })
}

/// Stage names from the first `stages:` block, or `None` when there is none
pub fn extract_gitlab_stages(content: &str) -> Option<Vec<String>> {
    let captures = stages_regex().captures(content)?;
    let block = captures.get(1)?.as_str();

    Some(
        block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.replace("- ", ""))
            .collect(),
    )
}

pub fn read_ci_config(root: &Path) -> CiSummary {
    let mut summary = CiSummary::default();

    for (relative, platform) in CI_PROBES {
        if root.join(relative).exists() {
            summary.platforms.push(platform.to_string());
            summary.config_files.push(relative.to_string());
        }
    }

    let gitlab = root.join(STAGE_SOURCE);
    if gitlab.is_file() {
        summary.stages = fs::read_to_string(&gitlab)
            .ok()
            .and_then(|content| extract_gitlab_stages(&content))
            .unwrap_or_default();
    }

    summary
}
