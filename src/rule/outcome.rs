use std::fmt;
use std::sync::Arc;

use crate::config::Severity;
use crate::error::Result;

type FixFn = dyn Fn() -> Result<()> + Send + Sync;

/// Side-effecting remediation attached to a failing outcome.
///
/// Shared behind an `Arc` so results stay cloneable. Running it is the engine's
/// job, and only during the sequential fix pass.
#[derive(Clone)]
pub struct Fix(Arc<FixFn>);

impl Fix {
    pub fn new(f: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the remediation.
    ///
    /// # Errors
    /// Returns whatever error the remediation reports.
    pub fn apply(&self) -> Result<()> {
        (self.0)()
    }
}

impl fmt::Debug for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fix(..)")
    }
}

/// What a rule's check function returns.
#[derive(Debug, Clone, Default)]
pub struct RuleOutcome {
    pub passed: bool,
    pub message: String,
    /// Replaces the severity resolved from presets/overrides for this result.
    pub severity_override: Option<Severity>,
    /// Actionable remediation text.
    pub hint: Option<String>,
    /// Not applicable to this project; never counts as a failure.
    pub skipped: bool,
    pub fix: Option<Fix>,
}

impl RuleOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            skipped: true,
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity_override = Some(severity);
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        self.fix = Some(Fix::new(fix));
        self
    }
}
