use serde::Serialize;

use super::Rule;
use super::outcome::{Fix, RuleOutcome};
use crate::config::Severity;

/// How a result is counted in the report summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Passed,
    /// Not applicable here; counted as passed.
    Skipped,
    /// Failed at `info`/`off` severity; counted as passed.
    Advisory,
    Warning,
    Failed,
}

impl ResultStatus {
    /// Whether the result counts toward the report's `passed` total.
    #[must_use]
    pub const fn counts_as_passed(self) -> bool {
        matches!(self, Self::Passed | Self::Skipped | Self::Advisory)
    }
}

/// The engine's normalized output for one rule.
///
/// The fix closure is private: a result is `fixable` exactly when it carries
/// one, and only results of rules declared fixable ever do.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub category: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
    pub hint: Option<String>,
    pub skipped: bool,
    /// The check function errored or panicked instead of returning an outcome.
    pub crashed: bool,
    /// A fix was applied and the re-check passed.
    pub fixed: bool,
    fix: Option<Fix>,
}

impl CheckResult {
    /// A plain result without a fix.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            passed,
            message: message.into(),
            severity,
            hint: None,
            skipped: false,
            crashed: false,
            fixed: false,
            fix: None,
        }
    }

    /// Normalize a rule's outcome: the outcome's severity override wins over
    /// `severity`, and the fix is kept only if the rule is declared fixable.
    #[must_use]
    pub fn from_outcome(rule: &Rule, severity: Severity, outcome: RuleOutcome) -> Self {
        Self {
            name: rule.name().to_string(),
            category: rule.category().to_string(),
            passed: outcome.passed,
            message: outcome.message,
            severity: outcome.severity_override.unwrap_or(severity),
            hint: outcome.hint,
            skipped: outcome.skipped,
            crashed: false,
            fixed: false,
            fix: if rule.is_fixable() { outcome.fix } else { None },
        }
    }

    /// Failing result for a check that errored or panicked.
    #[must_use]
    pub fn crashed(rule: &Rule, severity: Severity, reason: &str) -> Self {
        Self {
            crashed: true,
            ..Self::new(
                rule.name(),
                rule.category(),
                false,
                format!("Rule crashed: {reason}"),
                severity,
            )
        }
    }

    #[must_use]
    pub const fn fixable(&self) -> bool {
        self.fix.is_some()
    }

    #[must_use]
    pub const fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    /// Mark the result as repaired: passing, annotated, with no pending fix.
    pub fn mark_fixed(&mut self) {
        self.passed = true;
        self.fixed = true;
        self.fix = None;
        self.message = format!("{} (fixed)", self.message);
    }

    #[must_use]
    pub const fn status(&self) -> ResultStatus {
        if self.skipped {
            ResultStatus::Skipped
        } else if self.passed {
            ResultStatus::Passed
        } else {
            match self.severity {
                Severity::Off | Severity::Info => ResultStatus::Advisory,
                Severity::Warn => ResultStatus::Warning,
                Severity::Error => ResultStatus::Failed,
            }
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
