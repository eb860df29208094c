//! Per-run project snapshot handed to every rule.
//!
//! [`ProjectFacts`] is gathered once per run by [`ContextBuilder`] and shared
//! behind an `Arc`. Each rule receives a [`ProjectContext`]: the shared facts
//! plus that rule's resolved severity and options.

mod builder;
mod detect;
mod manifest;
mod workspace;

pub use builder::ContextBuilder;
pub use detect::{
    Ecosystem, ProjectType, detect_ecosystems, detect_project_type, has_manifest,
    is_config_package_name,
};
pub use manifest::Manifest;
pub use workspace::{
    CONVENTIONAL_DIRS, declared_patterns, discover_package_dirs, discover_workspace_root,
    is_monorepo,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{DoctorConfig, Preset, RuleOptions, Severity};

/// One member of a multi-package project.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspacePackage {
    /// Manifest name, or the directory name when the manifest has none.
    pub name: String,
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated; `"."` for the root.
    pub relative_path: String,
    pub manifest: Option<Manifest>,
    pub ecosystem: Option<Ecosystem>,
    pub project_type: ProjectType,
    /// Root configuration with the package-local file merged over it.
    pub config: DoctorConfig,
}

/// Facts about the project, computed once per run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFacts {
    pub cwd: PathBuf,
    /// Primary manifest: the first one found in `Ecosystem::ALL` order.
    pub manifest: Option<Manifest>,
    pub manifests: Vec<Manifest>,
    pub config: DoctorConfig,
    pub preset: Preset,
    pub is_monorepo: bool,
    pub packages: Vec<WorkspacePackage>,
    pub workspace_patterns: Vec<String>,
    /// Set when `cwd` is a package inside a larger workspace.
    pub workspace_root: Option<PathBuf>,
    pub ecosystems: Vec<Ecosystem>,
    pub project_type: ProjectType,
    /// The project publishes config packages consumed by other projects.
    pub is_shared_config_source: bool,
}

impl ProjectFacts {
    /// Empty facts for `cwd`: no manifest, not a monorepo, default config.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            manifest: None,
            manifests: Vec::new(),
            config: DoctorConfig::default(),
            preset: Preset::default(),
            is_monorepo: false,
            packages: Vec::new(),
            workspace_patterns: Vec::new(),
            workspace_root: None,
            ecosystems: Vec::new(),
            project_type: ProjectType::Unknown,
            is_shared_config_source: false,
        }
    }

    /// Set the primary manifest; keeps `manifests` and `ecosystems` consistent.
    #[must_use]
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        if !self.ecosystems.contains(&manifest.ecosystem) {
            self.ecosystems.insert(0, manifest.ecosystem);
        }
        self.manifests.insert(0, manifest.clone());
        self.manifest = Some(manifest);
        self
    }
}

/// What a rule sees: shared project facts plus its own severity and options.
///
/// Cloning is cheap; the facts are reference-counted.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    facts: Arc<ProjectFacts>,
    severity: Severity,
    options: RuleOptions,
}

impl ProjectContext {
    /// Base context with a placeholder `Off` severity and no options.
    #[must_use]
    pub fn new(facts: Arc<ProjectFacts>) -> Self {
        Self {
            facts,
            severity: Severity::Off,
            options: RuleOptions::default(),
        }
    }

    /// A copy of this context carrying one rule's severity and options.
    #[must_use]
    pub fn for_rule(&self, severity: Severity, options: RuleOptions) -> Self {
        Self {
            facts: Arc::clone(&self.facts),
            severity,
            options,
        }
    }

    #[must_use]
    pub fn facts(&self) -> &ProjectFacts {
        &self.facts
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn options(&self) -> &RuleOptions {
        &self.options
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.facts.cwd
    }

    /// `rel` resolved against the working directory.
    #[must_use]
    pub fn path(&self, rel: &str) -> PathBuf {
        self.facts.cwd.join(rel)
    }

    #[must_use]
    pub fn manifest(&self) -> Option<&Manifest> {
        self.facts.manifest.as_ref()
    }

    #[must_use]
    pub fn manifest_for(&self, ecosystem: Ecosystem) -> Option<&Manifest> {
        self.facts.manifests.iter().find(|m| m.ecosystem == ecosystem)
    }

    #[must_use]
    pub fn config(&self) -> &DoctorConfig {
        &self.facts.config
    }

    #[must_use]
    pub fn preset(&self) -> Preset {
        self.facts.preset
    }

    #[must_use]
    pub fn is_monorepo(&self) -> bool {
        self.facts.is_monorepo
    }

    #[must_use]
    pub fn packages(&self) -> &[WorkspacePackage] {
        &self.facts.packages
    }

    #[must_use]
    pub fn workspace_patterns(&self) -> &[String] {
        &self.facts.workspace_patterns
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.facts.workspace_root.as_deref()
    }

    /// Primary ecosystem of the root directory.
    #[must_use]
    pub fn ecosystem(&self) -> Option<Ecosystem> {
        self.facts.ecosystems.first().copied()
    }

    /// Whether the root or any workspace package belongs to `ecosystem`.
    #[must_use]
    pub fn has_ecosystem(&self, ecosystem: Ecosystem) -> bool {
        self.facts.ecosystems.contains(&ecosystem)
            || self
                .facts
                .packages
                .iter()
                .any(|p| p.ecosystem == Some(ecosystem))
    }

    #[must_use]
    pub fn project_type(&self) -> ProjectType {
        self.facts.project_type
    }

    #[must_use]
    pub fn is_shared_config_source(&self) -> bool {
        self.facts.is_shared_config_source
    }

    /// The root package (when it has a manifest) followed by every workspace
    /// package in discovery order.
    #[must_use]
    pub fn all_packages(&self) -> Vec<WorkspacePackage> {
        let facts = &self.facts;
        let root = facts.manifest.as_ref().map(|manifest| WorkspacePackage {
            name: manifest
                .name()
                .map_or_else(|| dir_name(&facts.cwd), str::to_string),
            path: facts.cwd.clone(),
            relative_path: ".".to_string(),
            manifest: Some(manifest.clone()),
            ecosystem: Some(manifest.ecosystem),
            project_type: facts.project_type,
            config: facts.config.clone(),
        });
        root.into_iter()
            .chain(facts.packages.iter().cloned())
            .collect()
    }
}

pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| ".".to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
