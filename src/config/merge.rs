//! Root/package configuration merging.
//!
//! A workspace package may carry its own `.repo-doctor.toml`. It is layered over
//! the root configuration:
//! - `preset` and `ignore` replace the root's values when set on the child
//! - `rules` and `options` are shallow-merged, child keys winning

use super::model::DoctorConfig;

/// Merge a package-local config over its root. Child values take precedence.
#[must_use]
pub fn merge_configs(base: &DoctorConfig, child: &DoctorConfig) -> DoctorConfig {
    let mut rules = base.rules.clone();
    for (name, severity) in &child.rules {
        rules.insert(name.clone(), *severity);
    }

    // Per-rule option tables are replaced as a unit, not merged key by key.
    let mut options = base.options.clone();
    for (name, opts) in &child.options {
        options.insert(name.clone(), opts.clone());
    }

    DoctorConfig {
        preset: child.preset.or(base.preset),
        rules,
        options,
        ignore: child.ignore.clone().or_else(|| base.ignore.clone()),
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
