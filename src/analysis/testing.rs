//! Test artifact detection
//!
//! Heuristic only. Candidates are chosen by file name and location, test
//! cases are counted by plain substring markers, and frameworks are inferred
//! from literal signatures. Markers inside comments or strings are counted
//! too; that imprecision is accepted.

use super::types::{CodeSummary, LocBreakdown, TestFile, TestSummary};
use super::walker::{TreeWalker, WalkedFile, count_lines, rank_descending, read_text};
use crate::constants;
use glob::Pattern;
use std::collections::BTreeSet;
use std::path::Path;

const PRUNED_DIRS: &[&str] = &["node_modules", ".git", "coverage"];

const TEST_FILE_PATTERNS: &[&str] = &[
    "*.test.js",
    "*.spec.js",
    "*.test.ts",
    "*.spec.ts",
    "*.test.py",
    "test_*.py",
    "*_test.py",
    "*_test.go",
    "test_*.java",
];

const TEST_DIR_NAMES: &[&str] = &["__tests__"];

/// One declaration marker per supported test idiom
const TEST_MARKERS: &[&str] = &["it(", "test(", "describe(", "def test_", "func Test", "@Test"];

struct FrameworkSignature {
    name: &'static str,
    content: &'static [&'static str],
    path: &'static [&'static str],
}

const FRAMEWORK_SIGNATURES: &[FrameworkSignature] = &[
    FrameworkSignature {
        name: "Jest",
        content: &["jest"],
        path: &["jest"],
    },
    FrameworkSignature {
        name: "Mocha",
        content: &["mocha"],
        path: &[],
    },
    FrameworkSignature {
        name: "Pytest",
        content: &["pytest"],
        path: &[],
    },
    FrameworkSignature {
        name: "JUnit",
        content: &["@Test"],
        path: &[],
    },
    FrameworkSignature {
        name: "Go testing",
        content: &["testing.T"],
        path: &[],
    },
];

/// Whether a file should be inspected for test declarations
pub fn is_test_candidate(name: &str, relative: &str) -> bool {
    let by_pattern = TEST_FILE_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .any(|pattern| pattern.matches(name));

    let in_test_dir = Path::new(relative)
        .parent()
        .map(|parent| {
            parent.components().any(|c| {
                TEST_DIR_NAMES
                    .iter()
                    .any(|dir| c.as_os_str() == std::ffi::OsStr::new(dir))
            })
        })
        .unwrap_or(false);

    by_pattern || name.to_lowercase().contains("test") || in_test_dir
}

/// Sum of marker occurrences; overlapping idioms are not deduplicated
pub fn count_test_markers(content: &str) -> u64 {
    TEST_MARKERS
        .iter()
        .map(|marker| content.matches(marker).count() as u64)
        .sum()
}

/// Framework names whose signatures appear in `content` or `path`
pub fn detect_frameworks(content: &str, path: &str) -> BTreeSet<String> {
    FRAMEWORK_SIGNATURES
        .iter()
        .filter(|sig| {
            sig.content.iter().any(|s| content.contains(s))
                || sig.path.iter().any(|s| path.contains(s))
        })
        .map(|sig| sig.name.to_string())
        .collect()
}

/// `min(100, round(100 * tests / source))`, or 0 without source lines
pub fn coverage_proxy(loc: &LocBreakdown) -> u32 {
    if loc.source == 0 {
        return 0;
    }
    let ratio = (100.0 * loc.tests as f64 / loc.source as f64).round();
    ratio.min(100.0) as u32
}

pub struct TestDetector {
    walker: TreeWalker,
}

impl TestDetector {
    pub fn new(root: &Path, extra_ignored: &[String]) -> Self {
        Self {
            walker: TreeWalker::new(root, PRUNED_DIRS, extra_ignored),
        }
    }

    fn inspect(&self, file: &WalkedFile, summary: &mut TestSummary) -> Option<TestFile> {
        let content = read_text(&file.path)?;
        let tests = count_test_markers(&content);
        if tests == 0 {
            return None;
        }

        summary.total_tests += tests;
        summary
            .test_frameworks
            .extend(detect_frameworks(&content, &file.relative));

        Some(TestFile {
            path: file.relative.clone(),
            tests,
            lines: count_lines(&content),
        })
    }

    /// Detect test files; the coverage proxy is taken from `code`'s breakdown
    pub fn detect(&self, code: &CodeSummary) -> TestSummary {
        let mut summary = TestSummary::default();
        let mut test_files = Vec::new();

        for file in self.walker.files() {
            if !is_test_candidate(&file.name, &file.relative) {
                continue;
            }
            if let Some(test_file) = self.inspect(&file, &mut summary) {
                test_files.push(test_file);
            }
        }

        rank_descending(&mut test_files, constants::limits::MAX_TEST_FILES, |f| {
            f.tests
        });
        summary.test_files = test_files;
        summary.test_coverage = coverage_proxy(&code.loc_breakdown);

        summary
    }
}
