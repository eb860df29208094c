//! Built-in rule modules, registered once per process.

mod cargo;
mod files;
mod git;
mod library;
mod manifest;
mod monorepo;
mod sharing;
#[cfg(test)]
mod test_fixtures;
mod workflows;

use std::sync::LazyLock;

use crate::context::{Ecosystem, Manifest, ProjectContext};
use crate::registry::RuleModule;
use crate::rule::RuleOutcome;

static BUILTIN_MODULES: LazyLock<Vec<RuleModule>> = LazyLock::new(|| {
    vec![
        files::module(),
        manifest::module(),
        cargo::module(),
        workflows::module(),
        git::module(),
        monorepo::module(),
        library::module(),
        sharing::module(),
    ]
});

/// Every built-in module in registration order.
#[must_use]
pub fn builtin_modules() -> &'static [RuleModule] {
    &BUILTIN_MODULES
}

/// Ecosystems of the root and every workspace package, in detection order.
fn project_ecosystems(ctx: &ProjectContext) -> Vec<Ecosystem> {
    Ecosystem::ALL
        .into_iter()
        .filter(|eco| ctx.has_ecosystem(*eco))
        .collect()
}

/// The root `package.json`. Without one the rule skips; an unparsable one fails.
fn node_manifest(ctx: &ProjectContext) -> Result<&Manifest, RuleOutcome> {
    ctx.manifest_for(Ecosystem::Node).ok_or_else(|| {
        if ctx.path("package.json").is_file() {
            RuleOutcome::fail("package.json is not valid JSON")
                .with_hint("Fix the syntax errors in package.json")
        } else {
            RuleOutcome::skip("No package.json at the project root")
        }
    })
}

/// "a, b and 2 more" style listing for failure messages.
fn list_names(names: &[String]) -> String {
    const SHOWN: usize = 3;
    if names.len() <= SHOWN {
        names.join(", ")
    } else {
        format!("{} and {} more", names[..SHOWN].join(", "), names.len() - SHOWN)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
