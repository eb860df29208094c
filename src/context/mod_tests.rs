use std::sync::Arc;

use serde_json::json;

use super::*;

fn package(name: &str, rel: &str) -> WorkspacePackage {
    WorkspacePackage {
        name: name.to_string(),
        path: PathBuf::from("/repo").join(rel),
        relative_path: rel.to_string(),
        manifest: None,
        ecosystem: Some(Ecosystem::Node),
        project_type: ProjectType::Unknown,
        config: DoctorConfig::default(),
    }
}

fn monorepo_facts() -> ProjectFacts {
    let mut facts = ProjectFacts::new("/repo").with_manifest(Manifest::from_value(
        "/repo/package.json",
        Ecosystem::Node,
        json!({"name": "root-pkg"}),
    ));
    facts.is_monorepo = true;
    facts.packages = vec![package("a", "packages/a"), package("b", "packages/b")];
    facts
}

#[test]
fn all_packages_lists_root_first() {
    let ctx = ProjectContext::new(Arc::new(monorepo_facts()));

    let all = ctx.all_packages();

    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, "root-pkg");
    assert_eq!(all[0].relative_path, ".");
    assert_eq!(all[0].path, PathBuf::from("/repo"));
    assert_eq!(all[1].name, "a");
    assert_eq!(all[2].name, "b");
}

#[test]
fn all_packages_without_root_manifest_omits_root() {
    let mut facts = ProjectFacts::new("/repo");
    facts.packages = vec![package("a", "packages/a")];
    let ctx = ProjectContext::new(Arc::new(facts));

    let all = ctx.all_packages();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "a");
}

#[test]
fn base_context_has_placeholder_severity() {
    let ctx = ProjectContext::new(Arc::new(ProjectFacts::new("/repo")));
    assert_eq!(ctx.severity(), Severity::Off);
    assert_eq!(ctx.options(), &RuleOptions::default());
}

#[test]
fn for_rule_shares_facts_and_overrides_severity() {
    let base = ProjectContext::new(Arc::new(monorepo_facts()));
    let options = RuleOptions {
        min: Some(3),
        ..RuleOptions::default()
    };

    let ruled = base.for_rule(Severity::Warn, options);

    assert_eq!(ruled.severity(), Severity::Warn);
    assert_eq!(ruled.options().min, Some(3));
    assert!(std::ptr::eq(base.facts(), ruled.facts()));
    assert_eq!(base.severity(), Severity::Off);
}

#[test]
fn has_ecosystem_checks_root_and_packages() {
    let mut facts = ProjectFacts::new("/repo");
    let mut rust_pkg = package("engine", "crates/engine");
    rust_pkg.ecosystem = Some(Ecosystem::Rust);
    facts.packages = vec![rust_pkg];
    let ctx = ProjectContext::new(Arc::new(facts));

    assert!(ctx.has_ecosystem(Ecosystem::Rust));
    assert!(!ctx.has_ecosystem(Ecosystem::Node));
    assert_eq!(ctx.ecosystem(), None);
}

#[test]
fn manifest_for_finds_secondary_manifests() {
    let facts = ProjectFacts::new("/repo")
        .with_manifest(Manifest::from_value(
            "/repo/Cargo.toml",
            Ecosystem::Rust,
            json!({"package": {"name": "tool"}}),
        ))
        .with_manifest(Manifest::from_value(
            "/repo/package.json",
            Ecosystem::Node,
            json!({"name": "tool-js"}),
        ));
    let ctx = ProjectContext::new(Arc::new(facts));

    assert_eq!(ctx.manifest().and_then(Manifest::name), Some("tool-js"));
    assert_eq!(
        ctx.manifest_for(Ecosystem::Rust).and_then(Manifest::name),
        Some("tool")
    );
    assert_eq!(ctx.ecosystem(), Some(Ecosystem::Node));
}
