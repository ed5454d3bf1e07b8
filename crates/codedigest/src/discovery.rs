//! Source file discovery
//!
//! Walks a directory the way a developer would read it: gitignore honored,
//! hidden entries, dependency folders and oversized files left out.

use anyhow::Result;
use codedigest_parser::Language;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::commands::display_path;

/// Maximum file size in bytes (1MB)
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "vendor",
    ".next",
    "__pycache__",
    "venv",
    ".venv",
    "coverage",
    ".nyc_output",
    ".git",
    ".hg",
    ".svn",
    "out",
    ".output",
    ".nuxt",
    ".cache",
    ".parcel-cache",
    ".turbo",
];

/// Check if a directory entry name should be excluded (for WalkBuilder filter)
pub fn should_exclude_entry(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the walked root
    pub path: PathBuf,
    pub content: String,
}

/// Collect readable text files under `root` in a stable order.
///
/// Files without a grammar are skipped unless `include_unsupported` is set.
/// `root` may also be a single file.
pub fn discover(root: &Path, include_unsupported: bool) -> Result<Vec<SourceFile>> {
    if !root.exists() {
        anyhow::bail!("Path not found: {:?}", root);
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !should_exclude_entry(&name)
        })
        .build();

    let mut files = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let rel_path = display_path(path, root);
        if !include_unsupported && Language::from_path(path).is_none() {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > MAX_FILE_SIZE {
            debug!("Skipping {:?} (too large: {} bytes)", rel_path, size);
            continue;
        }

        match fs::read_to_string(path) {
            Ok(content) => files.push(SourceFile {
                path: rel_path,
                content,
            }),
            Err(e) => debug!("Skipping {:?}: {}", rel_path, e),
        }
    }

    Ok(files)
}
