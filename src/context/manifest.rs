use std::path::{Path, PathBuf};

use serde_json::Value;

use super::detect::Ecosystem;
use crate::fs_utils;

/// A parsed package manifest (`package.json`, `Cargo.toml`, `go.mod`,
/// `pyproject.toml`), normalized to a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
    pub data: Value,
}

impl Manifest {
    /// Load the manifest of `ecosystem` from `dir`.
    ///
    /// Returns `None` when no marker file exists or it cannot be parsed.
    #[must_use]
    pub fn load(dir: &Path, ecosystem: Ecosystem) -> Option<Self> {
        ecosystem.markers().iter().find_map(|marker| {
            let path = dir.join(marker);
            if !path.is_file() {
                return None;
            }
            let data = parse_manifest(&path, marker)?;
            Some(Self {
                path,
                ecosystem,
                data,
            })
        })
    }

    /// Wrap an in-memory value; used for synthetic manifests in tests.
    #[must_use]
    pub fn from_value(path: impl Into<PathBuf>, ecosystem: Ecosystem, data: Value) -> Self {
        Self {
            path: path.into(),
            ecosystem,
            data,
        }
    }

    /// Raw top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Package metadata field, looked up where the ecosystem keeps it
    /// (`[package]` for Cargo, `[project]` for pyproject, top level otherwise).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        let section = match self.ecosystem {
            Ecosystem::Rust => self.data.get("package"),
            Ecosystem::Python => self.data.get("project").or_else(|| {
                self.data
                    .get("tool")
                    .and_then(|tool| tool.get("poetry"))
            }),
            Ecosystem::Node | Ecosystem::Go => Some(&self.data),
        };
        section.and_then(|s| s.get(key))
    }

    /// True when the field is present and not null or empty.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some_and(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        })
    }

    /// Non-empty string field.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.ecosystem {
            Ecosystem::Go => self.str_field("module"),
            _ => self.str_field("name"),
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }
}

fn parse_manifest(path: &Path, marker: &str) -> Option<Value> {
    match marker {
        "package.json" => fs_utils::read_json(path).filter(Value::is_object),
        "Cargo.toml" | "pyproject.toml" => {
            fs_utils::read_toml(path).and_then(|v| serde_json::to_value(v).ok())
        }
        "go.mod" => fs_utils::read_file(path).map(|content| parse_go_mod(&content)),
        _ => Some(Value::Object(serde_json::Map::new())),
    }
}

/// Extract the `module` and `go` directives from a `go.mod` file.
fn parse_go_mod(content: &str) -> Value {
    let mut data = serde_json::Map::new();
    for line in content.lines().map(str::trim) {
        if let Some(module) = line.strip_prefix("module ") {
            data.insert("module".to_string(), Value::String(module.trim().to_string()));
        } else if let Some(version) = line.strip_prefix("go ") {
            data.insert("go".to_string(), Value::String(version.trim().to_string()));
        }
    }
    Value::Object(data)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
