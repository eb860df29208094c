use crate::cli::{Cli, UpgradeArgs};
use crate::engine::{RunOptions, check_upgrade_readiness};
use crate::registry::RuleModule;
use crate::rules::builtin_modules;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{make_formatter, report_error, write_output};

#[must_use]
pub fn run_upgrade(args: &UpgradeArgs, cli: &Cli) -> i32 {
    match run_upgrade_impl(args, cli, builtin_modules()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e, args.format);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Report how the project scores under its preset and the next stricter one.
/// The probe is informational and exits successfully whether or not it is ready.
///
/// # Errors
/// Returns an error if either run cannot start.
pub fn run_upgrade_impl(args: &UpgradeArgs, cli: &Cli, modules: &[RuleModule]) -> Result<i32> {
    let readiness = check_upgrade_readiness(&RunOptions::new(&args.path), modules)?;
    let formatter = make_formatter(args.format, cli.color, cli.verbose);
    write_output(&formatter.format_upgrade(&readiness)?, cli.quiet);
    Ok(EXIT_SUCCESS)
}
