//! Rule definition layer.
//!
//! A [`RuleSpec`] is the ad-hoc declaration (name, description, fixable flag,
//! hooks, check function). [`Rule::define`] turns it into an immutable [`Rule`]
//! whose [`Rule::run`] returns a normalized [`CheckResult`].

pub mod builders;
mod outcome;
mod result;

pub use outcome::{Fix, RuleOutcome};
pub use result::{CheckResult, ResultStatus};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::context::ProjectContext;
use crate::error::{DoctorError, Result};

/// Lifecycle point that can restrict which rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    PreCommit,
    PrePush,
    PrePublish,
}

impl Hook {
    pub const ALL: [Self; 3] = [Self::PreCommit, Self::PrePush, Self::PrePublish];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PrePush => "pre-push",
            Self::PrePublish => "pre-publish",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hook {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| DoctorError::UnknownHook(s.to_string()))
    }
}

/// A check function. Implemented for plain closures; the reusable shapes in
/// [`builders`] implement it directly.
pub trait RuleCheck: Send + Sync {
    /// Evaluate against a project. Must not have side effects: anything that
    /// writes belongs in the outcome's fix.
    ///
    /// # Errors
    /// An error means the check itself broke, not that the project failed it.
    fn check(&self, ctx: &ProjectContext) -> Result<RuleOutcome>;
}

impl<F> RuleCheck for F
where
    F: Fn(&ProjectContext) -> Result<RuleOutcome> + Send + Sync,
{
    fn check(&self, ctx: &ProjectContext) -> Result<RuleOutcome> {
        self(ctx)
    }
}

/// Declaration of a rule before it is registered.
pub struct RuleSpec {
    name: String,
    description: String,
    category: Option<String>,
    fixable: bool,
    hooks: Vec<Hook>,
    check: Arc<dyn RuleCheck>,
}

impl RuleSpec {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&ProjectContext) -> Result<RuleOutcome> + Send + Sync + 'static,
    {
        Self::with_check(name, description, check)
    }

    /// Declare a rule backed by any [`RuleCheck`] implementation.
    pub fn with_check(
        name: impl Into<String>,
        description: impl Into<String>,
        check: impl RuleCheck + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: None,
            fixable: false,
            hooks: Vec::new(),
            check: Arc::new(check),
        }
    }

    /// Allow the rule to report itself as auto-fixable.
    #[must_use]
    pub const fn fixable(mut self) -> Self {
        self.fixable = true;
        self
    }

    /// Only run under these hooks. Without hooks the rule runs under all of them.
    #[must_use]
    pub fn hooks(mut self, hooks: &[Hook]) -> Self {
        self.hooks = hooks.to_vec();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A registered rule. Immutable once defined.
#[derive(Clone)]
pub struct Rule {
    name: String,
    category: String,
    description: String,
    fixable: bool,
    hooks: Vec<Hook>,
    check: Arc<dyn RuleCheck>,
}

impl Rule {
    /// Normalize a spec; the category defaults to the name's first segment.
    #[must_use]
    pub fn define(spec: RuleSpec) -> Self {
        let category = spec
            .category
            .unwrap_or_else(|| category_of(&spec.name).to_string());
        Self {
            name: spec.name,
            category,
            description: spec.description,
            fixable: spec.fixable,
            hooks: spec.hooks,
            check: spec.check,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn is_fixable(&self) -> bool {
        self.fixable
    }

    #[must_use]
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Whether the rule is eligible under `hook` (`None` = a plain run).
    #[must_use]
    pub fn runs_under(&self, hook: Option<Hook>) -> bool {
        match hook {
            Some(hook) => self.hooks.is_empty() || self.hooks.contains(&hook),
            None => true,
        }
    }

    /// Evaluate and normalize. Errors from the check function propagate; the
    /// engine turns them into crashed results.
    ///
    /// # Errors
    /// Returns the check function's error.
    pub fn run(&self, ctx: &ProjectContext) -> Result<CheckResult> {
        let outcome = self.check.check(ctx)?;
        Ok(CheckResult::from_outcome(self, ctx.severity(), outcome))
    }

    pub(crate) fn with_category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("fixable", &self.fixable)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// Category part of a rule name: everything before the first `/`, `:` or `.`.
#[must_use]
pub fn category_of(name: &str) -> &str {
    name.split(['/', ':', '.']).next().unwrap_or(name)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
