use std::fmt;
use std::str::FromStr;

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DoctorError, Result};

/// Blocking weight of a failing rule.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Off < Info < Warn < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Off,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Off, Self::Info, Self::Warn, Self::Error];

    /// Numeric rank used for strictness comparisons (`off=0` .. `error=3`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    /// Advisory severities never count as warnings or failures.
    #[must_use]
    pub const fn is_advisory(self) -> bool {
        matches!(self, Self::Off | Self::Info)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(DoctorError::Config(format!(
                "Unknown severity '{s}'. Expected one of: off, info, warn, error"
            ))),
        }
    }
}

/// Maturity level selecting a default severity for every rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Init,
    #[default]
    Dev,
    Stable,
}

impl Preset {
    /// All presets from least to most strict.
    pub const ALL: [Self; 3] = [Self::Init, Self::Dev, Self::Stable];

    /// The next stricter preset, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::Dev),
            Self::Dev => Some(Self::Stable),
            Self::Stable => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Dev => "dev",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "init" => Ok(Self::Init),
            "dev" => Ok(Self::Dev),
            "stable" => Ok(Self::Stable),
            _ => Err(DoctorError::UnknownPreset(s.to_string())),
        }
    }
}

/// Per-rule options from `[options."<rule>"]`.
///
/// `min`/`max` are the recognised numeric thresholds; any other key is kept
/// verbatim in `extra` for rule-specific use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl RuleOptions {
    #[must_use]
    pub fn min_or(&self, default: u64) -> u64 {
        self.min.unwrap_or(default)
    }

    #[must_use]
    pub fn max_or(&self, default: u64) -> u64 {
        self.max.unwrap_or(default)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.extra.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(toml::Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(toml::Value::as_bool)
    }

    /// String-array option, e.g. `files = ["dist", "README.md"]`.
    #[must_use]
    pub fn get_strings(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).and_then(toml::Value::as_array).map(|arr| {
            arr.iter()
                .filter_map(toml::Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }
}

/// Resolved configuration, as read from `.repo-doctor.toml`.
///
/// `preset` and `ignore` are optional so that a package-local file can tell
/// "not set" apart from "set to the default" when merged over the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Severity overrides keyed by rule name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rules: IndexMap<String, Severity>,

    /// Per-rule options keyed by rule name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, RuleOptions>,

    /// Rule-name glob patterns to skip, e.g. `"cargo/*"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            preset: Some(Preset::Dev),
            rules: IndexMap::new(),
            options: IndexMap::new(),
            ignore: None,
        }
    }
}

impl DoctorConfig {
    /// The configured preset, falling back to `dev`.
    #[must_use]
    pub fn effective_preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    /// Options for one rule; empty when none are configured.
    #[must_use]
    pub fn rule_options(&self, rule_name: &str) -> RuleOptions {
        self.options.get(rule_name).cloned().unwrap_or_default()
    }

    /// Compile the `ignore` patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn ignore_matcher(&self) -> Result<IgnoreMatcher> {
        IgnoreMatcher::new(self.ignore.as_deref().unwrap_or_default())
    }
}

/// Compiled rule-name ignore patterns.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    set: GlobSet,
    empty: bool,
}

impl IgnoreMatcher {
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| DoctorError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| DoctorError::InvalidPattern {
                pattern: patterns.join(", "),
                source,
            })?;
        Ok(Self {
            set,
            empty: patterns.is_empty(),
        })
    }

    #[must_use]
    pub fn is_ignored(&self, rule_name: &str) -> bool {
        !self.empty && self.set.is_match(rule_name)
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
            empty: true,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
