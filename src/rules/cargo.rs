//! Rust crate rules. Checks read the root `Cargo.toml`; a virtual workspace
//! manifest (no `[package]`) skips the per-package checks.

use serde_json::Value;

use crate::context::{Ecosystem, Manifest, ProjectContext, ProjectType};
use crate::error::Result;
use crate::fs_utils;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::builders::CommandSuccess;
use crate::rule::{Hook, RuleCheck, RuleOutcome, RuleSpec};

const METADATA_FIELDS: &[&str] = &["description", "license", "repository"];
const MIN_EDITION: u32 = 2021;

pub(super) fn module() -> RuleModule {
    let fmt = CommandSuccess::new("cargo", &["fmt", "--all", "--check"])
        .with_fix_args(&["fmt", "--all"])
        .with_hint("Run `cargo fmt --all`");
    let clippy = CommandSuccess::new("cargo", &["clippy", "--quiet", "--", "-D", "warnings"])
        .with_hint("Run `cargo clippy` and address the warnings");

    define_module(
        ModuleMeta::new("cargo", "Cargo", "Rust crate hygiene").requires(Ecosystem::Rust),
        vec![
            RuleSpec::new("cargo/metadata", "Cargo.toml carries publishing metadata", check_metadata),
            RuleSpec::new("cargo/edition", "The crate uses a current Rust edition", check_edition),
            RuleSpec::new("cargo/lockfile", "Applications commit Cargo.lock", check_lockfile),
            RuleSpec::new("cargo/fmt", "Sources are formatted with rustfmt", move |ctx| {
                with_root_crate(ctx, |_| fmt.check(ctx))
            })
            .fixable()
            .hooks(&[Hook::PreCommit]),
            RuleSpec::new("cargo/clippy", "Clippy reports no warnings", move |ctx| {
                with_root_crate(ctx, |_| clippy.check(ctx))
            })
            .hooks(&[Hook::PrePush]),
        ],
    )
}

/// Run `f` with the root `Cargo.toml`, or skip when the root is not a crate
/// or workspace.
fn with_root_crate(
    ctx: &ProjectContext,
    f: impl FnOnce(&Manifest) -> Result<RuleOutcome>,
) -> Result<RuleOutcome> {
    match ctx.manifest_for(Ecosystem::Rust) {
        Some(manifest) => f(manifest),
        None => Ok(RuleOutcome::skip("No Cargo.toml at the project root")),
    }
}

/// Field of `[package]`, accepting `field.workspace = true` inheritance.
fn package_field<'a>(manifest: &'a Manifest, key: &str) -> Option<&'a Value> {
    manifest.field(key).filter(|v| match v {
        Value::String(s) => !s.trim().is_empty(),
        Value::Object(o) => o.get("workspace").and_then(Value::as_bool) == Some(true),
        _ => true,
    })
}

fn check_metadata(ctx: &ProjectContext) -> Result<RuleOutcome> {
    with_root_crate(ctx, |manifest| {
        if manifest.get("package").is_none() {
            return Ok(RuleOutcome::skip("Virtual workspace manifest"));
        }
        let missing: Vec<&str> = METADATA_FIELDS
            .iter()
            .copied()
            .filter(|key| {
                package_field(manifest, key).is_none()
                    && !(*key == "license" && package_field(manifest, "license-file").is_some())
            })
            .collect();
        Ok(if missing.is_empty() {
            RuleOutcome::pass("Cargo.toml has description, license and repository")
        } else {
            RuleOutcome::fail(format!("Cargo.toml is missing: {}", missing.join(", ")))
                .with_hint("Fill in the [package] metadata fields")
        })
    })
}

fn check_edition(ctx: &ProjectContext) -> Result<RuleOutcome> {
    with_root_crate(ctx, |manifest| {
        let edition = match manifest.field("edition") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(o)) if o.get("workspace").and_then(Value::as_bool) == Some(true) => {
                match manifest
                    .get("workspace")
                    .and_then(|w| w.pointer("/package/edition"))
                    .and_then(Value::as_str)
                {
                    Some(s) => s.to_string(),
                    None => return Ok(RuleOutcome::pass("Edition is inherited from the workspace")),
                }
            }
            _ if manifest.get("package").is_none() => {
                return Ok(RuleOutcome::skip("Virtual workspace manifest"));
            }
            _ => "2015".to_string(),
        };
        Ok(match edition.parse::<u32>() {
            Ok(year) if year >= MIN_EDITION => RuleOutcome::pass(format!("Edition {edition}")),
            _ => RuleOutcome::fail(format!("Edition {edition} is older than {MIN_EDITION}"))
                .with_hint("Set edition = \"2021\" or later and run `cargo fix --edition`"),
        })
    })
}

fn check_lockfile(ctx: &ProjectContext) -> Result<RuleOutcome> {
    with_root_crate(ctx, |_| {
        if ctx.project_type() == ProjectType::Library {
            return Ok(RuleOutcome::skip("Libraries may leave Cargo.lock uncommitted"));
        }
        let lock = ctx.workspace_root().unwrap_or_else(|| ctx.cwd()).join("Cargo.lock");
        Ok(if fs_utils::file_exists(&lock) {
            RuleOutcome::pass("Cargo.lock is present")
        } else {
            RuleOutcome::fail("Cargo.lock is missing")
                .with_hint("Run `cargo generate-lockfile` and commit the result")
        })
    })
}

#[cfg(test)]
#[path = "cargo_tests.rs"]
mod tests;
