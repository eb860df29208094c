//! Integration tests for the repo-doctor binary.

mod common;

use common::TestFixture;
use predicates::prelude::*;

// =============================================================================
// check
// =============================================================================

#[test]
fn check_passes_on_complete_project() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    repo_doctor!()
        .args(["check", &fixture.arg(), "--no-upgrade-hint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files/readme"))
        .stdout(predicate::str::contains("(preset: init"));
}

#[test]
fn check_fails_when_readme_is_missing() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");
    std::fs::remove_file(fixture.path().join("README.md")).unwrap();

    repo_doctor!()
        .args(["check", &fixture.arg()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing README.md"))
        .stdout(predicate::str::contains("(fixable with --fix)"));
}

#[test]
fn check_fix_creates_missing_readme() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");
    std::fs::remove_file(fixture.path().join("README.md")).unwrap();

    repo_doctor!()
        .args(["check", &fixture.arg(), "--fix", "--no-upgrade-hint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 fixed"));

    assert!(fixture.read("README.md").starts_with("# demo"));
}

#[test]
fn check_json_output_has_summary() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    let output = repo_doctor!()
        .args(["check", &fixture.arg(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["preset"], "init");
    assert_eq!(json["summary"]["failed"], 0);
    assert!(json["results"].as_array().is_some_and(|r| !r.is_empty()));
}

#[test]
fn check_preset_flag_overrides_config() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    repo_doctor!()
        .args(["check", &fixture.arg(), "--preset", "stable"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(preset: stable"));
}

#[test]
fn check_rejects_unknown_preset() {
    let fixture = TestFixture::new();

    repo_doctor!()
        .args(["check", &fixture.arg(), "--preset", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
}

#[test]
fn check_missing_explicit_config_exits_with_config_error() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("nope.toml");

    repo_doctor!()
        .args(["check", &fixture.arg(), "--config", missing.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn check_json_errors_are_machine_readable() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("nope.toml");

    let output = repo_doctor!()
        .args(["check", &fixture.arg(), "--format", "json"])
        .args(["--config", missing.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"]["type"], "Config");
}

#[test]
fn check_missing_directory_exits_with_config_error() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("absent");

    repo_doctor!()
        .args(["check", missing.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn check_ignore_patterns_skip_rules() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\nignore = [\"files/*\"]\n");
    std::fs::remove_file(fixture.path().join("README.md")).unwrap();

    repo_doctor!()
        .args(["check", &fixture.arg(), "--no-upgrade-hint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files/readme").not());
}

#[test]
fn check_quiet_prints_nothing() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    repo_doctor!()
        .args(["--quiet", "check", &fixture.arg()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn clean_check_prints_upgrade_tip() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    repo_doctor!()
        .args(["check", &fixture.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tip:"));
}

// =============================================================================
// hook
// =============================================================================

#[test]
fn hook_runs_only_blocking_rules() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");
    std::fs::remove_file(fixture.path().join("LICENSE")).unwrap();

    repo_doctor!()
        .args(["hook", "pre-commit", &fixture.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("files/license").not());
}

#[test]
fn hook_fails_on_blocking_rule() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");
    std::fs::remove_file(fixture.path().join("README.md")).unwrap();

    repo_doctor!()
        .args(["hook", "pre-push", &fixture.arg()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing README.md"));
}

#[test]
fn hook_rejects_unknown_name() {
    repo_doctor!()
        .args(["hook", "post-merge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown hook"));
}

// =============================================================================
// upgrade
// =============================================================================

#[test]
fn upgrade_reports_blockers_for_next_preset() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"init\"\n");

    repo_doctor!()
        .args(["upgrade", &fixture.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("would score"));
}

#[test]
fn upgrade_json_at_stable_has_no_next_preset() {
    let fixture = TestFixture::new();
    fixture.create_node_project();
    fixture.create_config("preset = \"stable\"\n");

    let output = repo_doctor!()
        .args(["upgrade", &fixture.arg(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ready"], true);
    assert!(json["next_preset"].is_null());
    assert_eq!(json["blockers"].as_array().map(Vec::len), Some(0));
}

// =============================================================================
// rules / init
// =============================================================================

#[test]
fn rules_lists_registered_rules() {
    repo_doctor!()
        .args(["rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files/readme"))
        .stdout(predicate::str::contains("cargo/fmt"))
        .stdout(predicate::str::contains("stable="));
}

#[test]
fn init_creates_config_file() {
    let fixture = TestFixture::new();

    repo_doctor!()
        .args(["init", &fixture.arg(), "--preset", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(fixture.read(".repo-doctor.toml").contains("preset = \"dev\""));
}

#[test]
fn init_fails_if_config_exists() {
    let fixture = TestFixture::new();
    fixture.create_config("# existing config\n");

    repo_doctor!()
        .args(["init", &fixture.arg()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let fixture = TestFixture::new();
    fixture.create_config("# existing config\n");

    repo_doctor!()
        .args(["init", &fixture.arg(), "--force"])
        .assert()
        .success();

    assert!(fixture.read(".repo-doctor.toml").contains("preset = \"init\""));
}
