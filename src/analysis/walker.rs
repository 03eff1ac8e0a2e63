//! Pruned directory walks shared by the filesystem passes
//!
//! Each pass owns its own deny-list of directory names; a pruned directory is
//! never descended into, so nothing beneath it is seen by that pass. Walks are
//! sorted by file name so discovery order is stable across platforms.

use crate::constants;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A regular file found by a walk
#[derive(Debug, Clone)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated on unix
    pub relative: String,
    pub name: String,
}

pub struct TreeWalker {
    root: PathBuf,
    pruned: Vec<String>,
}

impl TreeWalker {
    /// Create a walker that prunes `deny` plus any configured `extra` names
    pub fn new(root: &Path, deny: &[&str], extra: &[String]) -> Self {
        let pruned = deny
            .iter()
            .map(|name| name.to_string())
            .chain(extra.iter().cloned())
            .collect();

        Self {
            root: root.to_path_buf(),
            pruned,
        }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.pruned.iter().any(|p| p == name))
                .unwrap_or(false)
    }

    /// All files outside pruned directories, in discovery order
    pub fn files(&self) -> impl Iterator<Item = WalkedFile> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry))
            .filter_map(|e| e.ok())
            // Symlinks are listed when their target is a file; linked
            // directories are never descended into
            .filter(|entry| entry.path().is_file())
            .map(|entry| {
                let path = entry.path().to_path_buf();
                let relative = path
                    .strip_prefix(&self.root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .to_string();
                let name = entry.file_name().to_string_lossy().to_string();
                WalkedFile {
                    path,
                    relative,
                    name,
                }
            })
    }
}

/// Read a file as text, replacing invalid UTF-8.
///
/// Returns `None` when the file cannot be read or looks binary (a NUL byte in
/// its leading bytes). Callers skip such files entirely.
pub fn read_text(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    let sniff = &bytes[..bytes.len().min(constants::limits::BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Number of newline-delimited lines; a trailing partial line counts
pub fn count_lines(text: &str) -> u64 {
    text.lines().count() as u64
}

/// Extension key as observed (`".rs"`), or `"other"` when there is none
pub fn extension_key(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| "other".to_string())
}

/// Stable descending sort on `key` followed by truncation to `cap`.
///
/// Ties keep discovery order.
pub fn rank_descending<T, K: Ord>(items: &mut Vec<T>, cap: usize, key: impl Fn(&T) -> K) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items.truncate(cap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_walker_prunes_denied_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("src/vendor")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join("src/vendor/lib.js"), "x").unwrap();
        fs::write(root.join("src/main.js"), "x").unwrap();

        let walker = TreeWalker::new(root, &["node_modules"], &["vendor".to_string()]);
        let files: Vec<String> = walker.files().map(|f| f.relative).collect();
        assert_eq!(files, vec!["src/main.js"]);
    }

    #[test]
    fn test_walker_does_not_prune_files_named_like_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("build"), "not a dir").unwrap();

        let walker = TreeWalker::new(temp.path(), &["build"], &[]);
        assert_eq!(walker.files().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_lists_symlinked_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("pkg")).unwrap();
        fs::write(root.join("real.py"), "x = 1\n").unwrap();
        std::os::unix::fs::symlink(root.join("real.py"), root.join("link.py")).unwrap();
        std::os::unix::fs::symlink(root.join("pkg"), root.join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.py"), root.join("dangling.py")).unwrap();

        let walker = TreeWalker::new(root, &[], &[]);
        let files: Vec<String> = walker.files().map(|f| f.relative).collect();
        assert_eq!(files, vec!["link.py", "real.py"]);
    }

    #[test]
    fn test_read_text_skips_binary() {
        let temp = TempDir::new().unwrap();
        let binary = temp.path().join("blob.bin");
        fs::write(&binary, [0x89, 0x50, 0x00, 0x01]).unwrap();
        assert!(read_text(&binary).is_none());

        let latin1 = temp.path().join("latin1.txt");
        fs::write(&latin1, [b'a', 0xE9, b'\n', b'b']).unwrap();
        let text = read_text(&latin1).unwrap();
        assert_eq!(count_lines(&text), 2);

        assert!(read_text(&temp.path().join("missing.txt")).is_none());
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("one\ntwo\n"), 2);
        assert_eq!(count_lines("one\n\nthree"), 3);
    }

    #[test]
    fn test_extension_key() {
        assert_eq!(extension_key("main.rs"), ".rs");
        assert_eq!(extension_key("a.test.JS"), ".JS");
        assert_eq!(extension_key("Makefile"), "other");
        assert_eq!(extension_key(".gitignore"), "other");
    }

    #[test]
    fn test_rank_descending_keeps_ties_in_order() {
        let mut items = vec![("a", 1), ("b", 5), ("c", 5), ("d", 3)];
        rank_descending(&mut items, 3, |item| item.1);
        assert_eq!(items, vec![("b", 5), ("c", 5), ("d", 3)]);
    }
}
