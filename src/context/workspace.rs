//! Monorepo detection and workspace package discovery.
//!
//! Packages come from two sources, in this order:
//! 1. declared workspace globs (`package.json` `workspaces`, Cargo `[workspace] members`)
//! 2. conventional directories (`packages/`, `apps/`, `crates/`, `libs/`)
//!
//! A directory only counts as a package when it holds a manifest. Results are
//! de-duplicated by absolute path, keeping first-discovery order.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSetBuilder};
use indexmap::IndexSet;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::detect::{Ecosystem, has_manifest};
use super::manifest::Manifest;
use crate::fs_utils::relative_path;

pub const CONVENTIONAL_DIRS: &[&str] = &["packages", "apps", "crates", "libs"];

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target"];

/// Workspace glob patterns declared by the manifests in a directory.
#[must_use]
pub fn declared_patterns(manifests: &[Manifest]) -> Vec<String> {
    let mut patterns = Vec::new();
    for manifest in manifests {
        let declared = match manifest.ecosystem {
            Ecosystem::Node => manifest.get("workspaces").map(|w| match w {
                Value::Object(obj) => obj.get("packages").cloned().unwrap_or(Value::Null),
                other => other.clone(),
            }),
            Ecosystem::Rust => manifest
                .get("workspace")
                .and_then(|w| w.get("members"))
                .cloned(),
            Ecosystem::Go | Ecosystem::Python => None,
        };
        if let Some(Value::Array(items)) = declared {
            patterns.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    patterns
}

/// Immediate children of the conventional directories that hold a manifest.
#[must_use]
pub fn conventional_packages(root: &Path) -> Vec<PathBuf> {
    CONVENTIONAL_DIRS
        .iter()
        .map(|dir| root.join(dir))
        .filter(|dir| dir.is_dir())
        .flat_map(|dir| sorted_subdirs(&dir))
        .filter(|dir| has_manifest(dir))
        .collect()
}

/// A project is a monorepo when it declares at least one workspace pattern or
/// a conventional directory contains child manifests.
#[must_use]
pub fn is_monorepo(root: &Path, patterns: &[String]) -> bool {
    !patterns.is_empty() || !conventional_packages(root).is_empty()
}

/// Discover all workspace package directories under `root`.
#[must_use]
pub fn discover_package_dirs(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut found: IndexSet<PathBuf> = IndexSet::new();
    for dir in expand_patterns(root, patterns) {
        found.insert(dir);
    }
    for dir in conventional_packages(root) {
        found.insert(dir);
    }
    found.shift_remove(root);
    debug!(count = found.len(), "discovered workspace packages");
    found.into_iter().collect()
}

/// Expand workspace globs into manifest-holding directories. Patterns starting
/// with `!` exclude matches.
fn expand_patterns(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let (excludes, includes): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));

    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in &excludes {
        if let Some(glob) = compile(pattern.trim_start_matches('!')) {
            exclude_builder.add(glob);
        }
    }
    let exclude_set = exclude_builder.build().unwrap_or_default();

    let mut dirs = Vec::new();
    for pattern in includes {
        let Some(glob) = compile(pattern) else {
            continue;
        };
        let matcher = glob.compile_matcher();
        let max_depth = pattern_depth(pattern);
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.file_name()
                    .to_str()
                    .is_none_or(|name| !SKIPPED_DIRS.contains(&name))
            });
        for entry in walker.filter_map(std::result::Result::ok) {
            if !entry.file_type().is_dir() {
                continue;
            }
            let rel = relative_path(root, entry.path());
            if matcher.is_match(&rel) && !exclude_set.is_match(&rel) && has_manifest(entry.path())
            {
                dirs.push(entry.into_path());
            }
        }
    }
    dirs
}

fn compile(pattern: &str) -> Option<Glob> {
    let normalized = pattern.trim_start_matches("./").trim_end_matches('/');
    match Glob::new(normalized) {
        Ok(glob) => Some(glob),
        Err(e) => {
            warn!(pattern, error = %e, "skipping invalid workspace pattern");
            None
        }
    }
}

/// How deep a walk must go to match `pattern`; `**` means unbounded.
fn pattern_depth(pattern: &str) -> usize {
    if pattern.contains("**") {
        usize::MAX
    } else {
        pattern
            .trim_start_matches("./")
            .trim_end_matches('/')
            .split('/')
            .count()
    }
}

fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_none_or(|name| !SKIPPED_DIRS.contains(&name))
        })
        .collect();
    subdirs.sort();
    subdirs
}

/// Find the workspace root enclosing `cwd`, if `cwd` is a package inside one.
///
/// Walks ancestors looking for manifests that declare workspaces, stopping at
/// the first directory containing `.git`.
#[must_use]
pub fn discover_workspace_root(cwd: &Path) -> Option<PathBuf> {
    for ancestor in cwd.ancestors().skip(1) {
        let manifests: Vec<Manifest> = Ecosystem::ALL
            .into_iter()
            .filter_map(|eco| Manifest::load(ancestor, eco))
            .collect();
        let patterns = declared_patterns(&manifests);
        if !patterns.is_empty() && discover_package_dirs(ancestor, &patterns).iter().any(|p| p == cwd)
        {
            return Some(ancestor.to_path_buf());
        }
        if ancestor.join(".git").exists() {
            break;
        }
    }
    None
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
