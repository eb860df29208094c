//! Rules for projects consumed by others. Enabled for library projects.

use serde_json::Value;

use super::node_manifest;
use crate::config::Severity;
use crate::context::{Ecosystem, Manifest, ProjectContext, ProjectType};
use crate::error::Result;
use crate::fs_utils;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::{Hook, RuleOutcome, RuleSpec};

const ENTRY_FIELDS: &[&str] = &["main", "module", "exports"];
const TYPE_FIELDS: &[&str] = &["types", "typings"];

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("library", "Library", "Entry points and packaging for libraries")
            .enabled_when(|ctx| ctx.project_type() == ProjectType::Library),
        vec![
            RuleSpec::new("library/entry-point", "The library declares an entry point", check_entry_point),
            RuleSpec::new("library/types", "The library ships type declarations", check_types),
            RuleSpec::new(
                "library/files-field",
                "package.json limits what gets published",
                check_files_field,
            )
            .hooks(&[Hook::PrePublish]),
        ],
    )
}

fn check_entry_point(ctx: &ProjectContext) -> Result<RuleOutcome> {
    if ctx.manifest_for(Ecosystem::Rust).is_some() && ctx.manifest_for(Ecosystem::Node).is_none() {
        return Ok(if fs_utils::file_exists(&ctx.path("src/lib.rs")) {
            RuleOutcome::pass("src/lib.rs is the crate root")
        } else {
            RuleOutcome::fail("No src/lib.rs").with_hint("Add src/lib.rs or a [lib] path")
        });
    }
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    Ok(match ENTRY_FIELDS.iter().find(|f| pkg.has_field(f)) {
        Some(field) => match pkg.get(field) {
            Some(Value::String(target)) if !fs_utils::file_exists(&ctx.path(target)) => {
                RuleOutcome::fail(format!("\"{field}\" points at missing file {target}"))
                    .with_severity(ctx.severity().min(Severity::Warn))
                    .with_hint("Build the package or fix the path")
            }
            _ => RuleOutcome::pass(format!("Entry point declared in \"{field}\"")),
        },
        None => RuleOutcome::fail("package.json declares no main, module or exports")
            .with_hint("Add \"exports\" (or \"main\") to package.json"),
    })
}

fn declares_types(pkg: &Manifest) -> bool {
    TYPE_FIELDS.iter().any(|f| pkg.has_field(f))
        || pkg
            .get("exports")
            .is_some_and(|exports| exports.to_string().contains("\"types\""))
}

fn check_types(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    if declares_types(pkg) {
        return Ok(RuleOutcome::pass("Type declarations are declared"));
    }
    if fs_utils::file_exists(&ctx.path("index.d.ts")) {
        return Ok(RuleOutcome::pass("index.d.ts ships with the package"));
    }
    Ok(RuleOutcome::fail("No type declarations found")
        .with_hint("Set \"types\" in package.json or ship index.d.ts"))
}

fn check_files_field(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    if pkg.has_field("files") {
        return Ok(RuleOutcome::pass("package.json has a \"files\" allow-list"));
    }
    if fs_utils::file_exists(&ctx.path(".npmignore")) {
        return Ok(RuleOutcome::pass(".npmignore limits published files"));
    }
    Ok(RuleOutcome::fail("Everything in the directory would be published")
        .with_hint("Add a \"files\" array to package.json"))
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
