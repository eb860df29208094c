use crate::config::Preset;
use crate::rule::{CheckResult, ResultStatus};

/// Aggregated outcome of one run, in rule registration order.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub preset: Preset,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    /// Results repaired by the fix pass; already included in `passed`.
    pub fixed: usize,
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    #[must_use]
    pub const fn new(preset: Preset) -> Self {
        Self {
            preset,
            total: 0,
            passed: 0,
            failed: 0,
            warnings: 0,
            fixed: 0,
            results: Vec::new(),
        }
    }

    /// Append a result and count it by its status.
    pub fn push(&mut self, result: CheckResult) {
        self.total += 1;
        match result.status() {
            status if status.counts_as_passed() => self.passed += 1,
            ResultStatus::Warning => self.warnings += 1,
            _ => self.failed += 1,
        }
        if result.fixed {
            self.fixed += 1;
        }
        self.results.push(result);
    }

    /// Percentage of results counted as passed, rounded; 100 for an empty run.
    #[must_use]
    pub fn score(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        let rounded = (self.passed * 200 + self.total) / (self.total * 2);
        u32::try_from(rounded).unwrap_or(100)
    }

    /// No result failed at `error` severity. Warnings never fail a run.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Results counted in `failed`.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results
            .iter()
            .filter(|r| r.status() == ResultStatus::Failed)
    }

    /// Results counted in `warnings`.
    pub fn warning_results(&self) -> impl Iterator<Item = &CheckResult> {
        self.results
            .iter()
            .filter(|r| r.status() == ResultStatus::Warning)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
