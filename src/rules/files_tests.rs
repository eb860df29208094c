use std::fs;

use super::*;
use crate::rules::test_fixtures::{context, fix_and_rerun, project, run};

#[test]
fn readme_found_in_any_casing() {
    let temp = project(&[("readme.md", "# x")]);
    assert!(run(&module(), "files/readme", temp.path()).passed);
}

#[test]
fn readme_fix_uses_manifest_metadata() {
    let temp = project(&[(
        "package.json",
        r#"{"name": "widget", "description": "Makes widgets"}"#,
    )]);
    let result = fix_and_rerun(&module(), "files/readme", temp.path());

    assert!(result.passed);
    let readme = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert_eq!(readme, "# widget\n\nMakes widgets\n");
}

#[test]
fn license_has_no_fix() {
    let temp = project(&[]);
    let result = run(&module(), "files/license", temp.path());
    assert!(!result.passed);
    assert!(!result.fixable());
}

#[test]
fn gitignore_content_covers_detected_ecosystems() {
    let temp = project(&[("package.json", "{}"), ("Cargo.toml", "[package]\nname = \"x\"\n")]);
    let content = gitignore_content(&context(temp.path()));
    assert!(content.starts_with("node_modules/\ntarget/\n"));
    assert!(content.ends_with(".env\n"));
}

#[test]
fn editorconfig_and_changelog_are_fixable() {
    let temp = project(&[]);
    for name in ["files/editorconfig", "files/changelog", "files/gitignore"] {
        assert!(fix_and_rerun(&module(), name, temp.path()).passed, "{name}");
    }
    assert!(temp.path().join("CHANGELOG.md").is_file());
}
