//! Common utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolves a path to an absolute root path.
/// If the path is relative, it's joined with the current directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("cannot read the current directory")?;
        Ok(cwd.join(path))
    }
}

/// Path shown in output: relative to `base` when possible.
pub fn display_path(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}
