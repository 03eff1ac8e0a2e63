//! File inventory
//!
//! Counts every file outside the pruned directories, picks out known config
//! and documentation files, and ranks files by size.

use super::types::{FileInventory, LargeFile};
use super::walker::{TreeWalker, extension_key, rank_descending};
use crate::constants;
use std::fs;
use std::path::Path;

const PRUNED_DIRS: &[&str] = &["node_modules", ".git", "coverage", "build", "dist"];

/// Exact file names recognized as configuration
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "package.json",
    "tsconfig.json",
    "jest.config.js",
    ".gitlab-ci.yml",
    "Dockerfile",
    "docker-compose.yml",
    ".env.example",
    "setup.py",
    "pyproject.toml",
    "go.mod",
    "Cargo.toml",
    "pom.xml",
    ".eslintrc",
    ".prettierrc",
];

pub const DOC_SUFFIXES: &[&str] = &[".md", ".rst", ".txt"];

/// Size in kilobytes rounded to one decimal
pub fn size_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 10.0).round() / 10.0
}

pub struct InventoryBuilder {
    walker: TreeWalker,
}

impl InventoryBuilder {
    pub fn new(root: &Path, extra_ignored: &[String]) -> Self {
        Self {
            walker: TreeWalker::new(root, PRUNED_DIRS, extra_ignored),
        }
    }

    pub fn build(&self) -> FileInventory {
        let mut inventory = FileInventory::default();
        let mut sized: Vec<(u64, LargeFile)> = Vec::new();

        for file in self.walker.files() {
            inventory.total_files += 1;

            // A file whose metadata vanished is counted but not listed
            let Ok(metadata) = fs::metadata(&file.path) else {
                continue;
            };

            let ext = extension_key(&file.name);
            *inventory.file_distribution.entry(ext.clone()).or_default() += 1;

            if CONFIG_FILE_NAMES.contains(&file.name.as_str()) {
                inventory.config_files.push(file.relative.clone());
            }
            if DOC_SUFFIXES.iter().any(|suffix| file.name.ends_with(suffix)) {
                inventory.documentation.push(file.relative.clone());
            }

            sized.push((
                metadata.len(),
                LargeFile {
                    path: file.relative,
                    size_kb: size_kb(metadata.len()),
                    ext,
                },
            ));
        }

        rank_descending(&mut sized, constants::limits::MAX_LARGEST_FILES, |(bytes, _)| {
            *bytes
        });
        inventory.largest_files = sized.into_iter().map(|(_, file)| file).collect();

        inventory
    }
}
