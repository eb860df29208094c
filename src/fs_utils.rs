//! File-system probes used by rules and the context builder.
//!
//! Probes never fail: a missing or unreadable file is `None`/`false`/empty.
//! Only the writers used by fixes return errors.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;

use crate::error::{DoctorError, Result};

/// Directories never descended into when searching for files.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target", "dist", "build"];

#[must_use]
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

#[must_use]
pub fn directory_exists(path: &Path) -> bool {
    path.is_dir()
}

#[must_use]
pub fn read_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

#[must_use]
pub fn read_json(path: &Path) -> Option<serde_json::Value> {
    read_file(path).and_then(|content| serde_json::from_str(&content).ok())
}

#[must_use]
pub fn read_toml(path: &Path) -> Option<toml::Value> {
    read_file(path).and_then(|content| toml::from_str(&content).ok())
}

/// Recursively find files under `root` whose root-relative path (with `/`
/// separators) matches `pattern`. Results are sorted.
#[must_use]
pub fn find_files(root: &Path, pattern: &Regex) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .hidden(false)
        .parents(false)
        .filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !SKIPPED_DIRS.contains(&name))
        })
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|e| pattern.is_match(&relative_path(root, e.path())))
        .map(ignore::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// `path` relative to `root`, with forward slashes. `"."` for `root` itself.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let text = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if text.is_empty() { ".".to_string() } else { text }
}

/// Write `content` to `path`, creating parent directories.
///
/// # Errors
/// Returns an error if a directory or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| DoctorError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| DoctorError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write pretty-printed JSON with a trailing newline.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_file(path, &content)
}

#[cfg(test)]
#[path = "fs_utils_tests.rs"]
mod tests;
