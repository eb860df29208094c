//! Rules for projects that publish shared configuration packages.

use serde_json::Value;

use super::list_names;
use crate::context::{Ecosystem, ProjectContext, WorkspacePackage, is_config_package_name};
use crate::error::Result;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::{RuleOutcome, RuleSpec};

/// Tools a config package configures; consumers must bring their own copy.
const CONFIGURED_TOOLS: &[&str] = &[
    "eslint",
    "prettier",
    "typescript",
    "stylelint",
    "@commitlint/cli",
    "jest",
    "vitest",
];

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("sharing", "Shared config", "Packaging of shared configuration")
            .enabled_when(ProjectContext::is_shared_config_source),
        vec![
            RuleSpec::new(
                "sharing/peer-dependencies",
                "Config packages take their tools as peer dependencies",
                check_peer_dependencies,
            ),
            RuleSpec::new(
                "sharing/files-field",
                "Config packages declare what they publish",
                check_files_field,
            ),
        ],
    )
}

/// Node packages that publish configuration: every config-named package, plus
/// the root of a single-package project.
fn config_packages(ctx: &ProjectContext) -> Vec<WorkspacePackage> {
    ctx.all_packages()
        .into_iter()
        .filter(|p| p.ecosystem == Some(Ecosystem::Node))
        .filter(|p| {
            is_config_package_name(&p.name) || (p.relative_path == "." && ctx.packages().is_empty())
        })
        .collect()
}

fn dependency_names(package: &WorkspacePackage, section: &str) -> Vec<String> {
    package
        .manifest
        .as_ref()
        .and_then(|m| m.get(section))
        .and_then(Value::as_object)
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default()
}

fn check_peer_dependencies(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let packages = config_packages(ctx);
    if packages.is_empty() {
        return Ok(RuleOutcome::skip("No Node config packages"));
    }
    let mut offenders = Vec::new();
    for package in &packages {
        let deps = dependency_names(package, "dependencies");
        for tool in CONFIGURED_TOOLS {
            if deps.iter().any(|d| d == tool) {
                offenders.push(format!("{} -> {tool}", package.name));
            }
        }
    }
    Ok(if offenders.is_empty() {
        RuleOutcome::pass("Configured tools are peer dependencies")
    } else {
        RuleOutcome::fail(format!(
            "Tools listed as regular dependencies: {}",
            list_names(&offenders)
        ))
        .with_hint("Move them to \"peerDependencies\"")
    })
}

fn check_files_field(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let packages = config_packages(ctx);
    if packages.is_empty() {
        return Ok(RuleOutcome::skip("No Node config packages"));
    }
    let missing: Vec<String> = packages
        .iter()
        .filter(|p| !p.manifest.as_ref().is_some_and(|m| m.has_field("files")))
        .map(|p| p.name.clone())
        .collect();
    Ok(if missing.is_empty() {
        RuleOutcome::pass("Config packages declare \"files\"")
    } else {
        RuleOutcome::fail(format!("No \"files\" field in: {}", list_names(&missing)))
            .with_hint("List the published config files in \"files\"")
    })
}

#[cfg(test)]
#[path = "sharing_tests.rs"]
mod tests;
