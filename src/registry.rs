//! Rule modules: named groups of rules sharing a category and an optional
//! applicability gate.

use std::fmt;
use std::sync::Arc;

use crate::context::{Ecosystem, ProjectContext};
use crate::rule::{Rule, RuleSpec};

type EnabledFn = dyn Fn(&ProjectContext) -> bool + Send + Sync;

/// Module metadata, given to [`define_module`].
#[derive(Clone)]
pub struct ModuleMeta {
    pub id: String,
    pub label: String,
    pub description: String,
    pub ecosystem: Option<Ecosystem>,
    enabled: Option<Arc<EnabledFn>>,
}

impl ModuleMeta {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            ecosystem: None,
            enabled: None,
        }
    }

    /// Gate the module on the project (root or any package) using `ecosystem`.
    #[must_use]
    pub const fn requires(mut self, ecosystem: Ecosystem) -> Self {
        self.ecosystem = Some(ecosystem);
        self
    }

    /// Gate the module on a predicate over the base context.
    #[must_use]
    pub fn enabled_when(
        mut self,
        predicate: impl Fn(&ProjectContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.enabled = Some(Arc::new(predicate));
        self
    }
}

/// A registered group of rules.
#[derive(Clone)]
pub struct RuleModule {
    meta: ModuleMeta,
    rules: Vec<Rule>,
}

impl RuleModule {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.meta.label
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.meta.description
    }

    #[must_use]
    pub const fn ecosystem(&self) -> Option<Ecosystem> {
        self.meta.ecosystem
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the module's gates admit this project. The ecosystem requirement
    /// is checked first, then the `enabled` predicate.
    #[must_use]
    pub fn applies_to(&self, ctx: &ProjectContext) -> bool {
        self.gate(ctx).is_none()
    }

    /// Why the module does not apply, or `None` if it does.
    #[must_use]
    pub fn gate(&self, ctx: &ProjectContext) -> Option<String> {
        if let Some(eco) = self.meta.ecosystem
            && !ctx.has_ecosystem(eco)
        {
            return Some(format!("no {} manifest", eco.name()));
        }
        if let Some(enabled) = &self.meta.enabled
            && !enabled(ctx)
        {
            return Some("not enabled for this project".to_string());
        }
        None
    }
}

impl fmt::Debug for RuleModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleModule")
            .field("id", &self.meta.id)
            .field("ecosystem", &self.meta.ecosystem)
            .field("gated", &self.meta.enabled.is_some())
            .field("rules", &self.rules)
            .finish()
    }
}

/// Assemble a module. Every rule gets the module's id as its category,
/// whatever category its spec declared.
#[must_use]
pub fn define_module(meta: ModuleMeta, specs: Vec<RuleSpec>) -> RuleModule {
    let rules = specs
        .into_iter()
        .map(|spec| Rule::define(spec).with_category(&meta.id))
        .collect();
    RuleModule { meta, rules }
}

/// Look up a rule by name across `modules`.
#[must_use]
pub fn find_rule<'a>(modules: &'a [RuleModule], name: &str) -> Option<&'a Rule> {
    modules
        .iter()
        .flat_map(RuleModule::rules)
        .find(|rule| rule.name() == name)
}

/// Every rule of every module, in registration order.
pub fn all_rules(modules: &[RuleModule]) -> impl Iterator<Item = &Rule> {
    modules.iter().flat_map(RuleModule::rules)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
