//! File system utility functions

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    Ok(())
}

/// Resolve a repository root to an absolute directory path.
///
/// A missing path or a path that is not a directory is a fatal error.
pub fn resolve_repository_root(path: &Path) -> Result<PathBuf> {
    let resolved = path
        .canonicalize()
        .with_context(|| format!("Repository path does not exist: {}", path.display()))?;

    if !resolved.is_dir() {
        anyhow::bail!("Repository path is not a directory: {}", resolved.display());
    }

    Ok(resolved)
}
