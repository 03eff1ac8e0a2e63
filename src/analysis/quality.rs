//! Derived quality metrics
//!
//! Computed from the VCS summary alone. Because the commit log is capped, the
//! "first" commit is the oldest retained entry: age and refactoring ratio are
//! biased for repositories with more history than the cap. This is a known
//! limitation and is kept so results stay comparable across runs.

use super::types::{QualityMetrics, VcsSummary};
use crate::constants::quality as quality_consts;
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};

/// Parse a commit date in strict ISO 8601 (`%aI`) or git's default `%ai` form
pub fn parse_commit_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .with_context(|| format!("Invalid commit timestamp: '{}'", raw))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Whole days from `first` to `now`, never less than one
pub fn project_age_days(first: DateTime<FixedOffset>, now: DateTime<Utc>) -> u64 {
    let days = now.signed_duration_since(first).num_days();
    days.max(1) as u64
}

/// Share of retained commit subjects mentioning a refactor keyword, as a
/// percentage of `total_commits`
pub fn refactoring_ratio(vcs: &VcsSummary) -> f64 {
    if vcs.total_commits == 0 {
        return 0.0;
    }

    let refactors = vcs
        .commit_history
        .iter()
        .filter(|commit| {
            let subject = commit.subject.to_lowercase();
            quality_consts::REFACTOR_KEYWORDS
                .iter()
                .any(|keyword| subject.contains(keyword))
        })
        .count();

    round_to(refactors as f64 / vcs.total_commits as f64 * 100.0, 1)
}

/// Derive quality metrics as of `now`.
///
/// A missing or unparsable first-commit date leaves the age at its default
/// and commits-per-day at zero; the refactoring ratio is still computed.
pub fn derive(vcs: &VcsSummary, now: DateTime<Utc>) -> QualityMetrics {
    let mut metrics = QualityMetrics::default();

    let first = vcs
        .first_commit_date
        .as_deref()
        .map(parse_commit_timestamp);

    if let Some(Ok(first)) = first {
        metrics.project_age_days = project_age_days(first, now);
        metrics.commits_per_day = round_to(
            vcs.total_commits as f64 / metrics.project_age_days as f64,
            2,
        );
    }

    metrics.refactoring_ratio = refactoring_ratio(vcs);
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CommitEntry;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 11, 12, 0, 0).unwrap()
    }

    fn commit(subject: &str, date: &str) -> CommitEntry {
        CommitEntry {
            short_hash: "abc1234".to_string(),
            iso_date: date.to_string(),
            subject: subject.to_string(),
            author: "Ada".to_string(),
        }
    }

    fn summary(total: u64, subjects: &[&str], first: Option<&str>) -> VcsSummary {
        VcsSummary {
            total_commits: total,
            commit_history: subjects
                .iter()
                .map(|s| commit(s, first.unwrap_or("")))
                .collect(),
            first_commit_date: first.map(str::to_string),
            ..VcsSummary::default()
        }
    }

    #[test]
    fn test_parse_commit_timestamp_formats() {
        assert!(parse_commit_timestamp("2024-06-01T12:00:00+02:00").is_ok());
        assert!(parse_commit_timestamp("2024-06-01 12:00:00 +0200").is_ok());
        assert!(parse_commit_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_ten_day_old_repository() {
        let vcs = summary(3, &["init", "add feature", "fix"], Some("2024-06-01T12:00:00+00:00"));
        let metrics = derive(&vcs, now());

        assert_eq!(metrics.project_age_days, 10);
        assert_eq!(metrics.commits_per_day, 0.3);
        assert_eq!(metrics.refactoring_ratio, 0.0);
        assert_eq!(metrics.code_organization_score, 75);
    }

    #[test]
    fn test_same_day_age_clamped_to_one() {
        let first = (now() - Duration::hours(2)).to_rfc3339();
        let vcs = summary(5, &["a"], Some(&first));
        let metrics = derive(&vcs, now());

        assert_eq!(metrics.project_age_days, 1);
        assert_eq!(metrics.commits_per_day, 5.0);
    }

    #[test]
    fn test_future_first_commit_clamped_to_one() {
        let first = (now() + Duration::days(3)).to_rfc3339();
        assert_eq!(
            project_age_days(parse_commit_timestamp(&first).unwrap(), now()),
            1
        );
    }

    #[test]
    fn test_no_commits() {
        let metrics = derive(&VcsSummary::default(), now());
        assert_eq!(metrics, QualityMetrics::default());
    }

    #[test]
    fn test_unparsable_first_date_keeps_refactor_ratio() {
        let vcs = summary(4, &["Refactor parser", "cleanup", "feat", "fix"], Some("not a date"));
        let metrics = derive(&vcs, now());

        assert_eq!(metrics.project_age_days, 1);
        assert_eq!(metrics.commits_per_day, 0.0);
        assert_eq!(metrics.refactoring_ratio, 50.0);
    }

    #[test]
    fn test_refactoring_ratio_uses_total_commits() {
        // 2 of 3 retained subjects match, out of 6 total commits
        let vcs = summary(
            6,
            &["Rename module", "Update deps", "Add tests"],
            Some("2024-01-01T00:00:00+00:00"),
        );
        assert_eq!(refactoring_ratio(&vcs), 33.3);
    }

    #[test]
    fn test_commits_per_day_rounding() {
        let vcs = summary(2, &["a"], Some("2024-06-08T12:00:00+00:00"));
        let metrics = derive(&vcs, now());
        assert_eq!(metrics.project_age_days, 3);
        assert_eq!(metrics.commits_per_day, 0.67);
    }
}
