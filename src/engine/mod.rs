//! Rule execution: selection, parallel evaluation, and the sequential fix pass.

mod report;
mod upgrade;

pub use report::CheckReport;
pub use upgrade::{
    Blocker, UpgradeReadiness, check_upgrade_readiness, check_upgrade_readiness_with_loader,
};

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{
    ConfigLoader, DoctorConfig, FileConfigLoader, IgnoreMatcher, Preset, Severity,
    resolve_severity,
};
use crate::context::{ContextBuilder, ProjectContext, discover_workspace_root};
use crate::error::{DoctorError, Result};
use crate::registry::RuleModule;
use crate::rule::{CheckResult, Hook, Rule};

/// Parameters of one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cwd: PathBuf,
    /// Apply fixes for failing fixable results, then re-verify.
    pub fix: bool,
    /// Overrides the configured preset.
    pub preset: Option<Preset>,
    /// Used instead of loading configuration from disk.
    pub config: Option<DoctorConfig>,
    /// Only run rules eligible under this hook.
    pub hook: Option<Hook>,
    /// Drop rules resolved to `warn`; hook runs only surface blocking issues.
    pub blocking_only: bool,
}

impl RunOptions {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Options for a hook-scoped run: hook filter plus blocking rules only.
    #[must_use]
    pub fn for_hook(cwd: impl Into<PathBuf>, hook: Hook) -> Self {
        Self {
            hook: Some(hook),
            blocking_only: true,
            ..Self::new(cwd)
        }
    }

    #[must_use]
    pub const fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    #[must_use]
    pub const fn with_preset(mut self, preset: Option<Preset>) -> Self {
        self.preset = preset;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DoctorConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// A rule queued for evaluation with its own context.
struct Queued<'a> {
    rule: &'a Rule,
    ctx: ProjectContext,
}

/// Run every applicable rule of `modules` against `options.cwd`, loading
/// configuration from disk when none is given.
///
/// # Errors
/// Returns an error if `cwd` cannot be resolved or the configuration's ignore
/// patterns are invalid. Rule errors and panics never fail the run.
pub fn run_checks(options: &RunOptions, modules: &[RuleModule]) -> Result<CheckReport> {
    run_checks_with_loader(options, modules, &FileConfigLoader::new())
}

/// [`run_checks`] with an injected configuration loader.
///
/// # Errors
/// See [`run_checks`].
pub fn run_checks_with_loader<L: ConfigLoader + Sync>(
    options: &RunOptions,
    modules: &[RuleModule],
    loader: &L,
) -> Result<CheckReport> {
    let cwd = dunce::canonicalize(&options.cwd).map_err(|source| DoctorError::FileRead {
        path: options.cwd.clone(),
        source,
    })?;
    let workspace_root = discover_workspace_root(&cwd);
    let config = resolve_config(options, loader, &cwd, workspace_root.as_deref());
    let preset = options.preset.or(config.preset).unwrap_or_default();
    let ignore = config.ignore_matcher()?;

    let facts = ContextBuilder::new(loader).build(&cwd, workspace_root, config, preset);
    let base = ProjectContext::new(Arc::new(facts));

    let queue = select_rules(&base, modules, options, &ignore);
    info!(
        cwd = %cwd.display(),
        preset = %preset,
        rules = queue.len(),
        hook = options.hook.map(Hook::as_str),
        "running checks"
    );

    let results: Vec<CheckResult> = queue
        .par_iter()
        .map(|item| evaluate(item.rule, &item.ctx))
        .collect();

    Ok(reconcile(preset, &queue, results, options.fix))
}

/// Hook-scoped run used by git hook integrations.
///
/// # Errors
/// See [`run_checks`].
pub fn run_hook(cwd: &Path, hook: Hook, modules: &[RuleModule]) -> Result<CheckReport> {
    run_checks(&RunOptions::for_hook(cwd, hook), modules)
}

fn resolve_config<L: ConfigLoader>(
    options: &RunOptions,
    loader: &L,
    cwd: &Path,
    workspace_root: Option<&Path>,
) -> DoctorConfig {
    if let Some(config) = &options.config {
        return config.clone();
    }
    let loaded = loader.load(cwd, workspace_root);
    match &loaded.source {
        Some(path) => debug!(path = %path.display(), "loaded configuration"),
        None => debug!("no configuration file, using defaults"),
    }
    loaded.config
}

/// Queue `(rule, context)` pairs in registration order.
fn select_rules<'a>(
    base: &ProjectContext,
    modules: &'a [RuleModule],
    options: &RunOptions,
    ignore: &IgnoreMatcher,
) -> Vec<Queued<'a>> {
    let config = base.config();
    let mut queue = Vec::new();

    for module in modules {
        if let Some(reason) = module.gate(base) {
            debug!(module = module.id(), %reason, "module skipped");
            continue;
        }
        for rule in module.rules() {
            if !rule.runs_under(options.hook) {
                debug!(rule = rule.name(), "rule skipped: not part of this hook");
                continue;
            }
            if ignore.is_ignored(rule.name()) {
                debug!(rule = rule.name(), "rule skipped: ignored by configuration");
                continue;
            }
            let severity = resolve_severity(rule.name(), base.preset(), Some(&config.rules));
            if severity == Severity::Off {
                debug!(rule = rule.name(), "rule skipped: off");
                continue;
            }
            if options.blocking_only && severity == Severity::Warn {
                debug!(rule = rule.name(), "rule skipped: warn in blocking-only run");
                continue;
            }
            queue.push(Queued {
                rule,
                ctx: base.for_rule(severity, config.rule_options(rule.name())),
            });
        }
    }
    queue
}

thread_local! {
    /// Nesting depth of rule code running on this thread.
    static RULE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static PANIC_FILTER: Once = Once::new();

/// Panics raised by rule code are reported through the crashed result and a
/// `warn!` event; the default hook only sees panics from everywhere else.
fn install_panic_filter() {
    PANIC_FILTER.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if RULE_DEPTH.with(Cell::get) > 0 {
                debug!(%info, "panic inside rule code");
            } else {
                previous(info);
            }
        }));
    });
}

/// Run rule code (a check or a fix), catching panics without printing them.
fn contained<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    install_panic_filter();
    RULE_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    RULE_DEPTH.with(|depth| depth.set(depth.get() - 1));
    outcome
}

/// Run one rule, turning errors and panics into crashed results.
fn evaluate(rule: &Rule, ctx: &ProjectContext) -> CheckResult {
    match contained(|| rule.run(ctx)) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!(rule = rule.name(), error = %e, "rule crashed");
            CheckResult::crashed(rule, ctx.severity(), &e.to_string())
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!(rule = rule.name(), %reason, "rule panicked");
            CheckResult::crashed(rule, ctx.severity(), &reason)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic".to_string())
}

/// Count results in registration order, applying fixes one at a time.
fn reconcile(
    preset: Preset,
    queue: &[Queued<'_>],
    results: Vec<CheckResult>,
    fix: bool,
) -> CheckReport {
    let mut report = CheckReport::new(preset);
    for (item, result) in queue.iter().zip(results) {
        let result = if fix && result.fixable() && !result.passed {
            apply_fix(item.rule, &item.ctx, result)
        } else {
            result
        };
        report.push(result);
    }
    debug!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        warnings = report.warnings,
        fixed = report.fixed,
        "checks finished"
    );
    report
}

/// Apply a result's fix and re-run the same rule against the same context.
fn apply_fix(rule: &Rule, ctx: &ProjectContext, mut result: CheckResult) -> CheckResult {
    let Some(fix) = result.fix().cloned() else {
        return result;
    };

    let applied = match contained(|| fix.apply()) {
        Ok(outcome) => outcome.map_err(|e| e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    };
    if let Err(reason) = applied {
        warn!(rule = rule.name(), %reason, "fix failed");
        result.message = format!("{} (fix failed: {reason})", result.message);
        return result;
    }

    let recheck = evaluate(rule, ctx);
    if recheck.passed && !recheck.crashed {
        info!(rule = rule.name(), "fix applied");
        result.mark_fixed();
    } else {
        warn!(rule = rule.name(), message = %recheck.message, "fix applied but the check still fails");
        result.message = format!("{} (fix applied but the issue remains)", result.message);
    }
    result
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
