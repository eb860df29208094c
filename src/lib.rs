pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod fs_utils;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;

pub use engine::{
    CheckReport, RunOptions, UpgradeReadiness, check_upgrade_readiness, run_checks, run_hook,
};
pub use error::{DoctorError, Result};
pub use registry::{ModuleMeta, RuleModule, define_module};
pub use rule::{CheckResult, Hook, Rule, RuleOutcome, RuleSpec};
pub use rules::builtin_modules;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECKS_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
