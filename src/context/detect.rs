use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::manifest::Manifest;

/// Language ecosystem, identified by its manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Node,
    Rust,
    Go,
    Python,
}

impl Ecosystem {
    /// Detection order. The first ecosystem found is the primary one.
    pub const ALL: [Self; 4] = [Self::Node, Self::Rust, Self::Go, Self::Python];

    /// Manifest files marking this ecosystem, in preference order.
    #[must_use]
    pub const fn markers(self) -> &'static [&'static str] {
        match self {
            Self::Node => &["package.json"],
            Self::Rust => &["Cargo.toml"],
            Self::Go => &["go.mod"],
            Self::Python => &["pyproject.toml", "setup.py"],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Python => "python",
        }
    }

    /// Dependency directories that should never be committed.
    #[must_use]
    pub const fn dependency_dirs(self) -> &'static [&'static str] {
        match self {
            Self::Node => &["node_modules"],
            Self::Rust => &["target"],
            Self::Go => &["vendor"],
            Self::Python => &["__pycache__", ".venv"],
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the project ships: something consumed by others, or something run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Library,
    Application,
    #[default]
    Unknown,
}

impl ProjectType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Application => "application",
            Self::Unknown => "unknown",
        }
    }
}

/// Ecosystems whose marker file exists in `dir`, in detection order.
#[must_use]
pub fn detect_ecosystems(dir: &Path) -> Vec<Ecosystem> {
    Ecosystem::ALL
        .into_iter()
        .filter(|eco| eco.markers().iter().any(|m| dir.join(m).is_file()))
        .collect()
}

/// True when `dir` holds a manifest of any known ecosystem.
#[must_use]
pub fn has_manifest(dir: &Path) -> bool {
    !detect_ecosystems(dir).is_empty()
}

const NODE_ENTRY_FIELDS: &[&str] = &["main", "module", "exports", "types", "typings"];

/// Classify a project as library or application from its manifest and layout.
#[must_use]
pub fn detect_project_type(dir: &Path, manifest: Option<&Manifest>) -> ProjectType {
    let Some(manifest) = manifest else {
        return ProjectType::Unknown;
    };
    match manifest.ecosystem {
        Ecosystem::Node => {
            if NODE_ENTRY_FIELDS.iter().any(|f| manifest.has_field(f)) {
                ProjectType::Library
            } else if manifest.has_field("bin")
                || manifest.get("private").and_then(serde_json::Value::as_bool) == Some(true)
            {
                ProjectType::Application
            } else {
                ProjectType::Unknown
            }
        }
        Ecosystem::Rust => {
            let has_main = dir.join("src/main.rs").is_file() || manifest.get("bin").is_some();
            if has_main {
                ProjectType::Application
            } else if dir.join("src/lib.rs").is_file() || manifest.get("lib").is_some() {
                ProjectType::Library
            } else {
                ProjectType::Unknown
            }
        }
        Ecosystem::Go => {
            if dir.join("main.go").is_file() || dir.join("cmd").is_dir() {
                ProjectType::Application
            } else {
                ProjectType::Library
            }
        }
        Ecosystem::Python => {
            let scripts = manifest
                .get("project")
                .and_then(|p| p.get("scripts"))
                .is_some();
            if scripts {
                ProjectType::Application
            } else {
                ProjectType::Library
            }
        }
    }
}

static CONFIG_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[^/]+/)?(.*-config(-.*)?|config(-.*)?|tsconfig.*)$")
        .expect("Invalid regex")
});

/// Whether a package name follows the shared-config naming convention
/// (`eslint-config-acme`, `@acme/config`, `@acme/prettier-config`, `tsconfig`).
#[must_use]
pub fn is_config_package_name(name: &str) -> bool {
    CONFIG_PACKAGE_NAME.is_match(name)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
