//! CI workflow rules.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::list_names;
use crate::context::{Ecosystem, ProjectContext};
use crate::error::Result;
use crate::fs_utils;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::{RuleOutcome, RuleSpec};

const CI_WORKFLOW: &str = ".github/workflows/ci.yml";

static WORKFLOW_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.github/workflows/[^/]+\.ya?ml$").expect("Invalid regex")
});

static USES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:-\s*)?uses:\s*["']?([^\s"'#]+)"#).expect("Invalid regex")
});

static FULL_SHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").expect("Invalid regex"));

/// Refs that move under the workflow's feet.
const FLOATING_REFS: &[&str] = &["main", "master", "latest", "HEAD"];

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("workflows", "CI workflows", "Continuous integration setup"),
        vec![
            RuleSpec::new("workflows/ci", "A CI workflow runs on every push", check_ci).fixable(),
            RuleSpec::new(
                "workflows/pinned-actions",
                "Workflow actions are pinned to a release or commit",
                check_pinned_actions,
            ),
        ],
    )
}

fn workflow_files(ctx: &ProjectContext) -> Vec<PathBuf> {
    fs_utils::find_files(ctx.cwd(), &WORKFLOW_FILE)
}

fn check_ci(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let files = workflow_files(ctx);
    if !files.is_empty() {
        return Ok(RuleOutcome::pass(format!("{} workflow file(s) found", files.len())));
    }
    if fs_utils::file_exists(&ctx.path(".gitlab-ci.yml")) {
        return Ok(RuleOutcome::pass("GitLab CI is configured"));
    }

    let path = ctx.path(CI_WORKFLOW);
    let content = ci_template(ctx);
    Ok(RuleOutcome::fail("No CI workflow found")
        .with_hint(format!("Add {CI_WORKFLOW}"))
        .with_fix(move || fs_utils::write_file(&path, &content)))
}

fn ci_template(ctx: &ProjectContext) -> String {
    let steps = if ctx.has_ecosystem(Ecosystem::Rust) && !ctx.has_ecosystem(Ecosystem::Node) {
        "      - uses: dtolnay/rust-toolchain@stable
      - run: cargo test --all
"
    } else if ctx.has_ecosystem(Ecosystem::Node) {
        "      - uses: actions/setup-node@v4
        with:
          node-version: 20
      - run: npm ci
      - run: npm test
"
    } else {
        "      - run: echo \"add build and test steps\"
"
    };
    format!(
        "name: CI

on:
  push:
    branches: [main]
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
{steps}"
    )
}

/// Why `reference` (the value of a `uses:` key) is unpinned, if it is.
fn unpinned_reason(reference: &str, require_sha: bool) -> Option<&'static str> {
    if reference.starts_with("./") || reference.starts_with("docker://") {
        return None;
    }
    let Some((_, git_ref)) = reference.rsplit_once('@') else {
        return Some("no ref");
    };
    if FLOATING_REFS.contains(&git_ref) {
        Some("branch ref")
    } else if require_sha && !FULL_SHA.is_match(git_ref) {
        Some("not a commit SHA")
    } else {
        None
    }
}

fn check_pinned_actions(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let files = workflow_files(ctx);
    if files.is_empty() {
        return Ok(RuleOutcome::skip("No workflow files"));
    }
    let require_sha = ctx.options().get_bool("require-sha").unwrap_or(false);

    let mut unpinned = Vec::new();
    for file in &files {
        let Some(content) = fs_utils::read_file(file) else {
            continue;
        };
        for capture in USES.captures_iter(&content) {
            let reference = &capture[1];
            if let Some(reason) = unpinned_reason(reference, require_sha) {
                unpinned.push(format!("{reference} ({reason})"));
            }
        }
    }

    Ok(if unpinned.is_empty() {
        RuleOutcome::pass("All actions are pinned")
    } else {
        RuleOutcome::fail(format!(
            "{} unpinned action(s): {}",
            unpinned.len(),
            list_names(&unpinned)
        ))
        .with_hint("Pin each action to a release tag or commit SHA")
    })
}

#[cfg(test)]
#[path = "workflows_tests.rs"]
mod tests;
