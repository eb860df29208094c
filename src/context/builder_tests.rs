use std::fs;

use tempfile::TempDir;

use super::*;
use crate::config::{FileConfigLoader, Severity};
use crate::context::ProjectType;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn build(root: &Path) -> ProjectFacts {
    let loader = FileConfigLoader::new();
    ContextBuilder::new(&loader).build(root, None, DoctorConfig::default(), Preset::Dev)
}

#[test]
fn empty_directory_yields_empty_snapshot() {
    let temp = TempDir::new().unwrap();
    let facts = build(temp.path());

    assert!(facts.manifest.is_none());
    assert!(!facts.is_monorepo);
    assert!(facts.packages.is_empty());
    assert!(facts.ecosystems.is_empty());
    assert_eq!(facts.project_type, ProjectType::Unknown);
    assert!(!facts.is_shared_config_source);
}

#[test]
fn single_package_project() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "package.json", r#"{"name": "web", "private": true}"#);

    let facts = build(temp.path());

    assert_eq!(facts.manifest.as_ref().and_then(Manifest::name), Some("web"));
    assert_eq!(facts.ecosystems, vec![Ecosystem::Node]);
    assert_eq!(facts.project_type, ProjectType::Application);
    assert!(!facts.is_monorepo);
}

#[test]
fn monorepo_packages_carry_merged_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "package.json",
        r#"{"name": "root", "private": true, "workspaces": ["packages/*"]}"#,
    );
    write(root, "packages/a/package.json", r#"{"name": "@acme/a", "main": "index.js"}"#);
    write(root, "packages/b/Cargo.toml", "[package]\nname = \"b\"\n");
    write(
        root,
        "packages/a/.repo-doctor.toml",
        "preset = \"stable\"\n[rules]\n\"files/readme\" = \"off\"\n",
    );
    let mut root_config = DoctorConfig::default();
    root_config
        .rules
        .insert("files/license".to_string(), Severity::Warn);

    let loader = FileConfigLoader::new();
    let facts = ContextBuilder::new(&loader).build(root, None, root_config, Preset::Dev);

    assert!(facts.is_monorepo);
    assert_eq!(facts.workspace_patterns, vec!["packages/*".to_string()]);
    assert_eq!(facts.packages.len(), 2);

    let a = &facts.packages[0];
    assert_eq!(a.name, "@acme/a");
    assert_eq!(a.relative_path, "packages/a");
    assert_eq!(a.ecosystem, Some(Ecosystem::Node));
    assert_eq!(a.project_type, ProjectType::Library);
    assert_eq!(a.config.preset, Some(Preset::Stable));
    assert_eq!(a.config.rules.get("files/readme"), Some(&Severity::Off));
    assert_eq!(a.config.rules.get("files/license"), Some(&Severity::Warn));

    let b = &facts.packages[1];
    assert_eq!(b.name, "b");
    assert_eq!(b.ecosystem, Some(Ecosystem::Rust));
    assert_eq!(b.config.preset, Some(Preset::Dev));
}

#[test]
fn package_without_name_uses_directory_name() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "apps/site/package.json", "{}");

    let facts = build(temp.path());

    assert!(facts.is_monorepo);
    assert_eq!(facts.packages[0].name, "site");
}

#[test]
fn shared_config_source_by_name_or_opt_in() {
    let named = TempDir::new().unwrap();
    write(named.path(), "package.json", r#"{"name": "eslint-config-acme"}"#);
    assert!(build(named.path()).is_shared_config_source);

    let opted = TempDir::new().unwrap();
    write(
        opted.path(),
        "package.json",
        r#"{"name": "tooling", "doctor": {"shared": true}}"#,
    );
    assert!(build(opted.path()).is_shared_config_source);

    let member = TempDir::new().unwrap();
    write(member.path(), "package.json", r#"{"name": "root", "workspaces": ["packages/*"]}"#);
    write(member.path(), "packages/cfg/package.json", r#"{"name": "@acme/tsconfig"}"#);
    assert!(build(member.path()).is_shared_config_source);
}
