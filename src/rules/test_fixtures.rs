//! Shared fixtures for the built-in rule tests.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::{DoctorConfig, FileConfigLoader, Preset, RuleOptions, Severity};
use crate::context::{ContextBuilder, ProjectContext};
use crate::registry::RuleModule;
use crate::rule::{CheckResult, Rule};

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A temp project populated with `files` (`(relative path, content)` pairs).
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (rel, content) in files {
        write(temp.path(), rel, content);
    }
    temp
}

/// Base context for `root`, as the engine would build it.
pub fn context(root: &Path) -> ProjectContext {
    let loader = FileConfigLoader::new();
    let facts = ContextBuilder::new(&loader).build(root, None, DoctorConfig::default(), Preset::Dev);
    ProjectContext::new(Arc::new(facts))
}

pub fn rule<'a>(module: &'a RuleModule, name: &str) -> &'a Rule {
    module
        .rules()
        .iter()
        .find(|r| r.name() == name)
        .unwrap_or_else(|| panic!("no rule {name}"))
}

/// Run one rule of `module` at `error` severity with the given options.
pub fn run_with(module: &RuleModule, name: &str, root: &Path, options: RuleOptions) -> CheckResult {
    let ctx = context(root).for_rule(Severity::Error, options);
    rule(module, name).run(&ctx).unwrap()
}

pub fn run(module: &RuleModule, name: &str, root: &Path) -> CheckResult {
    run_with(module, name, root, RuleOptions::default())
}

/// Apply the result's fix, then re-run the rule.
pub fn fix_and_rerun(module: &RuleModule, name: &str, root: &Path) -> CheckResult {
    let first = run(module, name, root);
    assert!(first.fixable(), "{name} offered no fix: {}", first.message);
    first.fix().unwrap().apply().unwrap();
    run(module, name, root)
}
