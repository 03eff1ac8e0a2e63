//! Code structure scanning
//!
//! Classification is a suffix table, not a language parser. A file's line
//! count lands in at most one LOC bucket; buckets are checked in the order of
//! [`LOC_RULES`] and the first matching suffix wins.

use super::types::{CodeSummary, LocBreakdown, MainFile};
use super::walker::{TreeWalker, count_lines, extension_key, rank_descending, read_text};
use crate::constants;
use std::path::Path;

const PRUNED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "coverage",
    "build",
    "dist",
    "venv",
    ".venv",
    ".next",
    "out",
    "public",
    "__pycache__",
    ".pytest_cache",
    ".env.local",
];

pub const SOURCE_SUFFIXES: &[&str] = &[".js", ".ts", ".tsx", ".jsx", ".py", ".java", ".go", ".rs"];

pub const TEST_SUFFIXES: &[&str] = &[".test.js", ".spec.js", ".test.ts", ".spec.ts", ".test.py"];

const DOC_SUFFIXES: &[&str] = &[".md"];

const CONFIG_SUFFIXES: &[&str] = &[".json", ".yaml", ".yml", ".toml", ".xml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocCategory {
    Tests,
    Docs,
    Config,
    Source,
}

/// Bucket precedence: tests, then docs, then config, then source
pub const LOC_RULES: &[(LocCategory, &[&str])] = &[
    (LocCategory::Tests, TEST_SUFFIXES),
    (LocCategory::Docs, DOC_SUFFIXES),
    (LocCategory::Config, CONFIG_SUFFIXES),
    (LocCategory::Source, SOURCE_SUFFIXES),
];

fn has_any_suffix(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix))
}

/// LOC bucket for a file name, or `None` when it belongs to no bucket
pub fn classify_loc(name: &str) -> Option<LocCategory> {
    LOC_RULES
        .iter()
        .find(|(_, suffixes)| has_any_suffix(name, suffixes))
        .map(|(category, _)| *category)
}

/// A main file has a source suffix and no test suffix
pub fn is_main_file(name: &str) -> bool {
    has_any_suffix(name, SOURCE_SUFFIXES) && !has_any_suffix(name, TEST_SUFFIXES)
}

impl LocBreakdown {
    pub fn add(&mut self, category: LocCategory, lines: u64) {
        match category {
            LocCategory::Tests => self.tests += lines,
            LocCategory::Docs => self.docs += lines,
            LocCategory::Config => self.config += lines,
            LocCategory::Source => self.source += lines,
        }
    }
}

pub struct CodeScanner {
    walker: TreeWalker,
}

impl CodeScanner {
    pub fn new(root: &Path, extra_ignored: &[String]) -> Self {
        Self {
            walker: TreeWalker::new(root, PRUNED_DIRS, extra_ignored),
        }
    }

    pub fn scan(&self) -> CodeSummary {
        let mut summary = CodeSummary::default();

        for file in self.walker.files() {
            // Unreadable or binary files are not counted anywhere
            let Some(content) = read_text(&file.path) else {
                continue;
            };
            let lines = count_lines(&content);
            let ext = extension_key(&file.name);

            let stats = summary.files_by_extension.entry(ext.clone()).or_default();
            stats.file_count += 1;
            stats.line_count += lines;
            summary.total_lines += lines;

            if is_main_file(&file.name) {
                summary.main_files.push(MainFile {
                    path: file.relative.clone(),
                    lines,
                    ext,
                });
            }

            if let Some(category) = classify_loc(&file.name) {
                summary.loc_breakdown.add(category, lines);
            }
        }

        rank_descending(
            &mut summary.main_files,
            constants::limits::MAX_MAIN_FILES,
            |f| f.lines,
        );

        summary
    }
}
