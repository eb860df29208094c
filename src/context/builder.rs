use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use super::detect::{Ecosystem, detect_ecosystems, detect_project_type, is_config_package_name};
use super::manifest::Manifest;
use super::workspace::{declared_patterns, discover_package_dirs, is_monorepo};
use super::{ProjectFacts, WorkspacePackage, dir_name};
use crate::config::{ConfigLoader, DoctorConfig, Preset, merge_configs};
use crate::fs_utils::relative_path;

/// Gathers [`ProjectFacts`] for one directory.
///
/// Every probe tolerates absence: a project with no manifest at all still
/// yields a valid snapshot.
pub struct ContextBuilder<'a, L: ConfigLoader + Sync> {
    loader: &'a L,
}

impl<'a, L: ConfigLoader + Sync> ContextBuilder<'a, L> {
    #[must_use]
    pub const fn new(loader: &'a L) -> Self {
        Self { loader }
    }

    /// Build the snapshot for `cwd` with an already-resolved root config.
    #[must_use]
    pub fn build(
        &self,
        cwd: &Path,
        workspace_root: Option<PathBuf>,
        config: DoctorConfig,
        preset: Preset,
    ) -> ProjectFacts {
        let manifests = load_manifests(cwd);
        let ecosystems = detect_ecosystems(cwd);
        let manifest = manifests.first().cloned();
        let workspace_patterns = declared_patterns(&manifests);
        let monorepo = is_monorepo(cwd, &workspace_patterns);

        let packages = if monorepo {
            discover_package_dirs(cwd, &workspace_patterns)
                .par_iter()
                .map(|dir| self.build_package(cwd, dir, &config))
                .collect()
        } else {
            Vec::new()
        };

        let project_type = detect_project_type(cwd, manifest.as_ref());
        let is_shared_config_source = detect_shared_config_source(manifest.as_ref(), &packages);

        debug!(
            cwd = %cwd.display(),
            monorepo,
            packages = packages.len(),
            project_type = project_type.name(),
            shared_config = is_shared_config_source,
            "built project context"
        );

        ProjectFacts {
            cwd: cwd.to_path_buf(),
            manifest,
            manifests,
            config,
            preset,
            is_monorepo: monorepo,
            packages,
            workspace_patterns,
            workspace_root,
            ecosystems,
            project_type,
            is_shared_config_source,
        }
    }

    fn build_package(&self, root: &Path, dir: &Path, root_config: &DoctorConfig) -> WorkspacePackage {
        let ecosystem = detect_ecosystems(dir).first().copied();
        let manifest = ecosystem.and_then(|eco| Manifest::load(dir, eco));
        let name = manifest
            .as_ref()
            .and_then(Manifest::name)
            .map_or_else(|| dir_name(dir), str::to_string);
        let config = self
            .loader
            .load_local(dir)
            .map_or_else(|| root_config.clone(), |local| merge_configs(root_config, &local));

        WorkspacePackage {
            name,
            path: dir.to_path_buf(),
            relative_path: relative_path(root, dir),
            project_type: detect_project_type(dir, manifest.as_ref()),
            manifest,
            ecosystem,
            config,
        }
    }
}

fn load_manifests(dir: &Path) -> Vec<Manifest> {
    Ecosystem::ALL
        .into_iter()
        .filter_map(|eco| Manifest::load(dir, eco))
        .collect()
}

/// A project is a shared config source when it opts in explicitly
/// (`"doctor": {"shared": true}`) or it or one of its packages is named like a
/// config package.
fn detect_shared_config_source(manifest: Option<&Manifest>, packages: &[WorkspacePackage]) -> bool {
    let opted_in = manifest
        .and_then(|m| m.get("doctor"))
        .and_then(|d| d.get("shared"))
        .and_then(Value::as_bool)
        == Some(true);
    opted_in
        || manifest
            .and_then(Manifest::name)
            .is_some_and(is_config_package_name)
        || packages.iter().any(|p| is_config_package_name(&p.name))
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
