//! Template view of a metrics record
//!
//! Only reorders and slices record data for display; no metric is computed
//! here.

use crate::analysis::{MainFile, MetricsRecord, TestFile};
use crate::constants;
use serde::Serialize;
use std::path::Path;

const TEST_ROWS: usize = 8;
const MAIN_FILE_ROWS: usize = 5;
const CHART_EXTENSIONS: usize = 5;
const CONTRIBUTOR_PREVIEW: usize = 2;

const LOC_LABELS: [&str; 4] = ["Source", "Tests", "Config", "Docs"];
const HEALTH_LABELS: [&str; 6] = [
    "Test Coverage",
    "Code Quality",
    "Documentation",
    "CI/CD",
    "Dependencies",
    "Maintainability",
];

#[derive(Debug, Serialize)]
pub struct FileRow {
    pub name: String,
    pub path: String,
    pub lines: u64,
    pub ext: String,
}

#[derive(Debug, Serialize)]
pub struct TestRow {
    pub name: String,
    pub tests: u64,
    pub lines: u64,
}

/// Chart series serialized as JSON for the embedded scripts
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub commit_labels: String,
    pub commit_series: String,
    pub loc_labels: String,
    pub loc_series: String,
    pub extension_labels: String,
    pub extension_series: String,
    pub health_labels: String,
    pub health_series: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub record: &'a MetricsRecord,
    pub primary_extension: String,
    pub frameworks: String,
    pub platforms: String,
    pub contributor_count: usize,
    pub contributor_preview: String,
    pub coverage_good: bool,
    pub healthy_pace: bool,
    pub test_rows: Vec<TestRow>,
    pub test_rows_total: u64,
    pub main_rows: Vec<FileRow>,
    pub charts: ChartData,
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// JSON safe for inlining inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

fn join_or(items: impl IntoIterator<Item = String>, fallback: &str) -> String {
    let joined: Vec<String> = items.into_iter().collect();
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined.join(", ")
    }
}

fn test_row(file: &TestFile) -> TestRow {
    TestRow {
        name: file_name(&file.path),
        tests: file.tests,
        lines: file.lines,
    }
}

fn main_row(file: &MainFile) -> FileRow {
    FileRow {
        name: file_name(&file.path),
        path: file.path.clone(),
        lines: file.lines,
        ext: file.ext.clone(),
    }
}

impl<'a> DashboardView<'a> {
    pub fn new(record: &'a MetricsRecord) -> Self {
        let ranked_extensions = record.code.extensions_by_lines();
        let primary_extension = ranked_extensions
            .first()
            .map(|(ext, _)| ext.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        // Timeline shows the most recent retained commits, oldest first
        let recent: Vec<_> = record
            .git
            .commit_history
            .iter()
            .take(constants::report::TIMELINE_COMMITS)
            .rev()
            .collect();
        let commit_labels: Vec<String> = recent
            .iter()
            .map(|c| c.iso_date.chars().take(10).collect())
            .collect();
        let commit_series: Vec<usize> = (1..=recent.len()).collect();

        let loc = record.code.loc_breakdown;
        let top_extensions: Vec<_> = ranked_extensions.iter().take(CHART_EXTENSIONS).collect();
        let extension_labels: Vec<&str> = top_extensions.iter().map(|(ext, _)| *ext).collect();
        let extension_series: Vec<u64> = top_extensions
            .iter()
            .map(|(_, stats)| stats.line_count)
            .collect();

        let ci_score = if record.ci.platforms.is_empty() { 0 } else { 90 };
        let health_series = [record.tests.test_coverage, 75, 60, ci_score, 85, 75];

        let test_rows: Vec<TestRow> = record
            .tests
            .test_files
            .iter()
            .take(TEST_ROWS)
            .map(test_row)
            .collect();
        let test_rows_total = record.tests.test_files.iter().map(|t| t.tests).sum();

        Self {
            record,
            primary_extension,
            frameworks: join_or(
                record.tests.test_frameworks.iter().cloned(),
                "Not configured",
            ),
            platforms: join_or(record.ci.platforms.iter().cloned(), "None detected"),
            contributor_count: record.git.contributors.len(),
            contributor_preview: join_or(
                record
                    .git
                    .contributors
                    .iter()
                    .take(CONTRIBUTOR_PREVIEW)
                    .cloned(),
                "Solo",
            ),
            coverage_good: record.tests.test_coverage >= 60,
            healthy_pace: record.quality.commits_per_day >= 1.0,
            test_rows,
            test_rows_total,
            main_rows: record
                .code
                .main_files
                .iter()
                .take(MAIN_FILE_ROWS)
                .map(main_row)
                .collect(),
            charts: ChartData {
                commit_labels: script_json(&commit_labels),
                commit_series: script_json(&commit_series),
                loc_labels: script_json(&LOC_LABELS),
                loc_series: script_json(&[loc.source, loc.tests, loc.config, loc.docs]),
                extension_labels: script_json(&extension_labels),
                extension_series: script_json(&extension_series),
                health_labels: script_json(&HEALTH_LABELS),
                health_series: script_json(&health_series),
            },
        }
    }
}
