//! Built-in severity presets and the severity resolver.
//!
//! Every built-in rule has exactly one row in [`PRESET_TABLE`], which gives its
//! default severity under `init`, `dev` and `stable`. Each column is at least as
//! strict as the one before it.

use indexmap::IndexMap;

use super::model::{Preset, Severity};

use Severity::{Error, Info, Off, Warn};

/// One rule's default severity under each preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetRow {
    pub rule: &'static str,
    pub init: Severity,
    pub dev: Severity,
    pub stable: Severity,
}

impl PresetRow {
    const fn new(rule: &'static str, init: Severity, dev: Severity, stable: Severity) -> Self {
        Self {
            rule,
            init,
            dev,
            stable,
        }
    }

    #[must_use]
    pub const fn severity(&self, preset: Preset) -> Severity {
        match preset {
            Preset::Init => self.init,
            Preset::Dev => self.dev,
            Preset::Stable => self.stable,
        }
    }
}

pub const PRESET_TABLE: &[PresetRow] = &[
    // files
    PresetRow::new("files/readme", Error, Error, Error),
    PresetRow::new("files/license", Warn, Warn, Error),
    PresetRow::new("files/gitignore", Error, Error, Error),
    PresetRow::new("files/editorconfig", Off, Info, Warn),
    PresetRow::new("files/changelog", Off, Warn, Error),
    // manifest
    PresetRow::new("manifest/name", Error, Error, Error),
    PresetRow::new("manifest/version", Warn, Error, Error),
    PresetRow::new("manifest/description", Info, Warn, Error),
    PresetRow::new("manifest/license", Warn, Warn, Error),
    PresetRow::new("manifest/repository", Off, Warn, Error),
    PresetRow::new("manifest/keywords", Off, Info, Warn),
    PresetRow::new("manifest/engines", Off, Warn, Error),
    PresetRow::new("manifest/test-script", Info, Warn, Error),
    // cargo
    PresetRow::new("cargo/metadata", Info, Warn, Error),
    PresetRow::new("cargo/edition", Info, Warn, Error),
    PresetRow::new("cargo/lockfile", Off, Warn, Error),
    PresetRow::new("cargo/fmt", Off, Warn, Error),
    PresetRow::new("cargo/clippy", Off, Off, Warn),
    // workflows
    PresetRow::new("workflows/ci", Info, Warn, Error),
    PresetRow::new("workflows/pinned-actions", Off, Info, Warn),
    // git
    PresetRow::new("git/repository", Warn, Error, Error),
    PresetRow::new("git/ignores-deps", Warn, Error, Error),
    PresetRow::new("git/hooks", Off, Info, Warn),
    // monorepo
    PresetRow::new("monorepo/package-names", Error, Error, Error),
    PresetRow::new("monorepo/unique-names", Error, Error, Error),
    PresetRow::new("monorepo/private-root", Warn, Error, Error),
    PresetRow::new("monorepo/package-readmes", Off, Info, Warn),
    // library
    PresetRow::new("library/entry-point", Warn, Error, Error),
    PresetRow::new("library/types", Off, Warn, Error),
    PresetRow::new("library/files-field", Off, Warn, Error),
    // sharing
    PresetRow::new("sharing/peer-dependencies", Off, Warn, Error),
    PresetRow::new("sharing/files-field", Info, Warn, Error),
];

/// The complete rule -> severity map for one preset, in table order.
#[must_use]
pub fn preset_map(preset: Preset) -> IndexMap<&'static str, Severity> {
    PRESET_TABLE
        .iter()
        .map(|row| (row.rule, row.severity(preset)))
        .collect()
}

/// Default severity of `rule_name` under `preset`, or `Off` when the preset
/// has no entry for it.
#[must_use]
pub fn preset_severity(rule_name: &str, preset: Preset) -> Severity {
    PRESET_TABLE
        .iter()
        .find(|row| row.rule == rule_name)
        .map_or(Severity::Off, |row| row.severity(preset))
}

/// Effective severity of a rule: explicit override, else preset default,
/// else `Off`. Total over arbitrary rule names.
#[must_use]
pub fn resolve_severity(
    rule_name: &str,
    preset: Preset,
    overrides: Option<&IndexMap<String, Severity>>,
) -> Severity {
    overrides
        .and_then(|rules| rules.get(rule_name).copied())
        .unwrap_or_else(|| preset_severity(rule_name, preset))
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
