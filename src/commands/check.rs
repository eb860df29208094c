use tracing::debug;

use crate::cli::{CheckArgs, Cli, HookArgs};
use crate::engine::{CheckReport, RunOptions, check_upgrade_readiness, run_checks};
use crate::output::OutputFormat;
use crate::registry::RuleModule;
use crate::rules::builtin_modules;
use crate::{EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{load_explicit_config, make_formatter, report_error, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli, builtin_modules()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e, args.format);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Run the checks for `args` against `modules` and print the report.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or the run cannot start.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli, modules: &[RuleModule]) -> Result<i32> {
    let mut options = run_options(args);
    if let Some(config) = load_explicit_config(args.config.as_deref())? {
        options = options.with_config(config);
    }

    let report = run_checks(&options, modules)?;
    let formatter = make_formatter(args.format, cli.color, cli.verbose);
    write_output(&formatter.format(&report)?, cli.quiet);

    let hint_wanted = !args.no_upgrade_hint
        && args.hook.is_none()
        && args.format == OutputFormat::Text
        && !cli.quiet;
    if hint_wanted && is_clean(&report) {
        print_upgrade_hint(&options, modules);
    }

    Ok(exit_code(&report))
}

/// `--hook` scopes the run the same way the `hook` subcommand does.
fn run_options(args: &CheckArgs) -> RunOptions {
    let base = match args.hook {
        Some(hook) => RunOptions::for_hook(&args.path, hook),
        None => RunOptions::new(&args.path),
    };
    base.with_fix(args.fix).with_preset(args.preset)
}

#[must_use]
pub fn run_hook(args: &HookArgs, cli: &Cli) -> i32 {
    match run_hook_impl(args, cli, builtin_modules()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Run only the blocking rules registered for a git hook.
///
/// # Errors
/// Returns an error if the run cannot start.
pub fn run_hook_impl(args: &HookArgs, cli: &Cli, modules: &[RuleModule]) -> Result<i32> {
    let report = run_checks(&RunOptions::for_hook(&args.path, args.hook), modules)?;
    let formatter = make_formatter(OutputFormat::Text, cli.color, cli.verbose);
    write_output(&formatter.format(&report)?, cli.quiet);
    Ok(exit_code(&report))
}

const fn is_clean(report: &CheckReport) -> bool {
    report.failed == 0 && report.warnings == 0
}

pub(crate) const fn exit_code(report: &CheckReport) -> i32 {
    if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_CHECKS_FAILED
    }
}

/// Probe the next preset after a clean run. Failures only cost the hint.
fn print_upgrade_hint(options: &RunOptions, modules: &[RuleModule]) {
    let probe = RunOptions {
        fix: false,
        ..options.clone()
    };
    match check_upgrade_readiness(&probe, modules) {
        Ok(readiness) => {
            if let Some(next) = readiness.next_preset
                && readiness.ready
            {
                println!(
                    "Tip: this project already passes the {next} preset. \
                     Set preset = \"{next}\" in .repo-doctor.toml to lock it in."
                );
            } else if let Some(next) = readiness.next_preset {
                println!(
                    "Tip: {} issue(s) stand between this project and the {next} preset. \
                     Run `repo-doctor upgrade` for details.",
                    readiness.blockers.len()
                );
            }
        }
        Err(e) => debug!(path = %options.cwd.display(), error = %e, "upgrade probe failed"),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
