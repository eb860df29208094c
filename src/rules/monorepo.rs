//! Rules for multi-package workspaces. The module only runs when the project
//! is a monorepo.

use indexmap::IndexMap;
use serde_json::{Value, json};

use super::{list_names, node_manifest};
use crate::context::{ProjectContext, WorkspacePackage};
use crate::error::Result;
use crate::fs_utils;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::builders::JsonConfig;
use crate::rule::{RuleCheck, RuleOutcome, RuleSpec};

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("monorepo", "Monorepo", "Workspace package conventions")
            .enabled_when(ProjectContext::is_monorepo),
        vec![
            RuleSpec::new("monorepo/package-names", "Every package has a name", check_package_names),
            RuleSpec::new("monorepo/unique-names", "Package names are unique", check_unique_names),
            RuleSpec::new("monorepo/private-root", "The workspace root is private", check_private_root)
                .fixable(),
            RuleSpec::new(
                "monorepo/package-readmes",
                "Every package has a README",
                check_package_readmes,
            ),
        ],
    )
}

fn has_declared_name(package: &WorkspacePackage) -> bool {
    package.manifest.as_ref().and_then(|m| m.name()).is_some()
}

fn check_package_names(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let unnamed: Vec<String> = ctx
        .packages()
        .iter()
        .filter(|p| !has_declared_name(p))
        .map(|p| p.relative_path.clone())
        .collect();
    Ok(if unnamed.is_empty() {
        RuleOutcome::pass(format!("All {} packages are named", ctx.packages().len()))
    } else {
        RuleOutcome::fail(format!("Packages without a name: {}", list_names(&unnamed)))
            .with_hint("Give each package manifest a name")
    })
}

fn check_unique_names(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let packages = ctx.all_packages();
    let mut by_name: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for package in packages.iter().filter(|p| has_declared_name(p)) {
        by_name
            .entry(package.name.as_str())
            .or_default()
            .push(package.relative_path.as_str());
    }
    let duplicates: Vec<String> = by_name
        .iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| format!("{name} ({})", paths.join(", ")))
        .collect();
    Ok(if duplicates.is_empty() {
        RuleOutcome::pass("Package names are unique")
    } else {
        RuleOutcome::fail(format!("Duplicate package names: {}", list_names(&duplicates)))
            .with_hint("Rename packages so each name is used once")
    })
}

fn check_private_root(ctx: &ProjectContext) -> Result<RuleOutcome> {
    if let Err(outcome) = node_manifest(ctx) {
        return Ok(outcome);
    }
    JsonConfig::new("package.json", |pkg| {
        if pkg.get("private").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err("The workspace root package.json is not private".to_string())
        }
    })
    .with_repair(|pkg| {
        if let Some(obj) = pkg.as_object_mut() {
            obj.insert("private".to_string(), json!(true));
        }
    })
    .with_pass_message("The workspace root is private")
    .check(ctx)
}

fn check_package_readmes(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let missing: Vec<String> = ctx
        .packages()
        .iter()
        .filter(|p| !fs_utils::file_exists(&p.path.join("README.md")))
        .map(|p| p.relative_path.clone())
        .collect();
    Ok(if missing.is_empty() {
        RuleOutcome::pass("Every package has a README.md")
    } else {
        RuleOutcome::fail(format!("Packages without README.md: {}", list_names(&missing)))
            .with_hint("Document each package in its own README.md")
    })
}

#[cfg(test)]
#[path = "monorepo_tests.rs"]
mod tests;
