//! `package.json` metadata rules.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::node_manifest;
use crate::context::{Ecosystem, ProjectContext};
use crate::error::Result;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::{RuleOutcome, RuleSpec};
use crate::rule::builders::JsonConfig;

/// The placeholder `npm init` writes.
const NPM_DEFAULT_TEST: &str = "echo \"Error: no test specified\" && exit 1";

const DEFAULT_NODE_ENGINE: &str = ">=18";

static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$").expect("Invalid regex")
});

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("manifest", "Package manifest", "Metadata in package.json")
            .requires(Ecosystem::Node),
        vec![
            RuleSpec::new("manifest/name", "package.json declares a name", |ctx| {
                required_field(ctx, "name")
            }),
            RuleSpec::new("manifest/version", "package.json declares a semver version", check_version),
            RuleSpec::new("manifest/description", "package.json declares a description", |ctx| {
                required_field(ctx, "description")
            }),
            RuleSpec::new("manifest/license", "package.json declares a license", |ctx| {
                required_field(ctx, "license")
            }),
            RuleSpec::new("manifest/repository", "package.json links the source repository", |ctx| {
                required_field(ctx, "repository")
            }),
            RuleSpec::new("manifest/keywords", "package.json lists keywords for discovery", check_keywords),
            RuleSpec::with_check(
                "manifest/engines",
                "package.json declares supported Node versions",
                JsonConfig::new("package.json", |pkg| {
                    if pkg.pointer("/engines/node").and_then(Value::as_str).is_some() {
                        Ok(())
                    } else {
                        Err("package.json has no engines.node".to_string())
                    }
                })
                .with_repair(|pkg| {
                    if let Some(obj) = pkg.as_object_mut() {
                        let engines = obj.entry("engines").or_insert_with(|| json!({}));
                        if let Some(engines) = engines.as_object_mut() {
                            engines.insert("node".to_string(), json!(DEFAULT_NODE_ENGINE));
                        }
                    }
                })
                .with_pass_message("package.json declares engines.node"),
            )
            .fixable(),
            RuleSpec::new("manifest/test-script", "package.json defines a real test script", check_test_script),
        ],
    )
}

fn required_field(ctx: &ProjectContext, field: &str) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    Ok(if pkg.has_field(field) {
        RuleOutcome::pass(format!("package.json has a {field}"))
    } else {
        RuleOutcome::fail(format!("package.json is missing \"{field}\""))
            .with_hint(format!("Add a \"{field}\" field to package.json"))
    })
}

fn check_version(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    Ok(match pkg.version() {
        Some(version) if SEMVER.is_match(version) => {
            RuleOutcome::pass(format!("Version {version} is valid semver"))
        }
        Some(version) => RuleOutcome::fail(format!("Version \"{version}\" is not valid semver"))
            .with_hint("Use MAJOR.MINOR.PATCH, e.g. 1.0.0"),
        None => RuleOutcome::fail("package.json is missing \"version\"")
            .with_hint("Add \"version\": \"0.1.0\" to package.json"),
    })
}

fn check_keywords(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    if pkg.get("private").and_then(Value::as_bool) == Some(true) {
        return Ok(RuleOutcome::skip("Private packages are not published"));
    }
    let min = ctx.options().min_or(1);
    let count = pkg
        .get("keywords")
        .and_then(Value::as_array)
        .map_or(0, Vec::len) as u64;
    Ok(if count >= min {
        RuleOutcome::pass(format!("{count} keyword(s) declared"))
    } else {
        RuleOutcome::fail(format!("{count} keyword(s) declared, at least {min} expected"))
            .with_hint("Add a \"keywords\" array to package.json")
    })
}

fn check_test_script(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let pkg = match node_manifest(ctx) {
        Ok(pkg) => pkg,
        Err(outcome) => return Ok(outcome),
    };
    let script = pkg.get("scripts").and_then(|s| s.get("test")).and_then(Value::as_str);
    Ok(match script.map(str::trim) {
        Some(s) if !s.is_empty() && s != NPM_DEFAULT_TEST => {
            RuleOutcome::pass("package.json defines a test script")
        }
        Some(_) => RuleOutcome::fail("The test script is the npm placeholder")
            .with_hint("Point scripts.test at your test runner"),
        None => RuleOutcome::fail("package.json has no test script")
            .with_hint("Add scripts.test to package.json"),
    })
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
