use std::fs;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::Commands;
use crate::config::Severity;
use crate::registry::{ModuleMeta, define_module};
use crate::rule::{Hook, RuleOutcome, RuleSpec};

fn demo_module() -> Vec<RuleModule> {
    vec![define_module(
        ModuleMeta::new("demo", "Demo", ""),
        vec![
            RuleSpec::new("demo/marker", "", |ctx| {
                Ok(if ctx.path("MARKER").exists() {
                    RuleOutcome::pass("Found MARKER")
                } else {
                    RuleOutcome::fail("Missing MARKER")
                })
            }),
            RuleSpec::new("demo/style", "", |_| Ok(RuleOutcome::fail("Style drift")))
                .hooks(&[Hook::PrePush]),
        ],
    )]
}

fn write_config(dir: &TempDir, marker: Severity, style: Severity) -> String {
    let path = dir.path().join("doctor.toml");
    let content = format!(
        "[rules]\n\"demo/marker\" = \"{}\"\n\"demo/style\" = \"{}\"\n",
        marker.as_str(),
        style.as_str()
    );
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn parse(argv: &[&str]) -> Cli {
    let mut full = vec!["repo-doctor", "--quiet"];
    full.extend_from_slice(argv);
    Cli::parse_from(full)
}

fn check(cli: &Cli) -> Result<i32> {
    let Commands::Check(args) = &cli.command else {
        panic!("expected check");
    };
    run_check_impl(args, cli, &demo_module())
}

#[test]
fn failing_error_rule_exits_with_checks_failed() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, Severity::Error, Severity::Off);
    let root = dir.path().to_string_lossy().into_owned();

    let cli = parse(&["check", &root, "--config", &config]);
    assert_eq!(check(&cli).unwrap(), EXIT_CHECKS_FAILED);
}

#[test]
fn warnings_do_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, Severity::Warn, Severity::Warn);
    let root = dir.path().to_string_lossy().into_owned();

    let cli = parse(&["check", &root, "--config", &config]);
    assert_eq!(check(&cli).unwrap(), EXIT_SUCCESS);
}

#[test]
fn passing_run_exits_successfully() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("MARKER"), "").unwrap();
    let config = write_config(&dir, Severity::Error, Severity::Off);
    let root = dir.path().to_string_lossy().into_owned();

    let cli = parse(&["check", &root, "--config", &config, "--no-upgrade-hint"]);
    assert_eq!(check(&cli).unwrap(), EXIT_SUCCESS);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let missing = dir.path().join("absent.toml").to_string_lossy().into_owned();

    let cli = parse(&["check", &root, "--config", &missing]);
    assert!(check(&cli).is_err());
}

#[test]
fn hook_filter_limits_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("MARKER"), "").unwrap();
    let config = write_config(&dir, Severity::Error, Severity::Error);
    let root = dir.path().to_string_lossy().into_owned();

    let all = parse(&["check", &root, "--config", &config]);
    assert_eq!(check(&all).unwrap(), EXIT_CHECKS_FAILED);

    let commit = parse(&["check", &root, "--config", &config, "--hook", "pre-commit"]);
    assert_eq!(check(&commit).unwrap(), EXIT_SUCCESS);
}

#[test]
fn exit_code_follows_failed_count() {
    let mut report = CheckReport::new(crate::config::Preset::Dev);
    assert_eq!(exit_code(&report), EXIT_SUCCESS);
    report.failed = 1;
    assert_eq!(exit_code(&report), EXIT_CHECKS_FAILED);
}

#[test]
fn clean_means_no_failures_or_warnings() {
    let mut report = CheckReport::new(crate::config::Preset::Dev);
    assert!(is_clean(&report));
    report.warnings = 1;
    assert!(!is_clean(&report));
}

#[test]
fn hook_flag_matches_hook_subcommand() {
    let cli = parse(&["check", "proj", "--hook", "pre-push", "--fix"]);
    let Commands::Check(args) = &cli.command else {
        panic!("expected check");
    };
    let options = run_options(args);

    assert_eq!(options.hook, Some(Hook::PrePush));
    assert!(options.blocking_only);
    assert!(options.fix);
}

#[test]
fn plain_check_keeps_warnings() {
    let cli = parse(&["check", "proj"]);
    let Commands::Check(args) = &cli.command else {
        panic!("expected check");
    };
    let options = run_options(args);

    assert_eq!(options.hook, None);
    assert!(!options.blocking_only);
}
