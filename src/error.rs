use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command `{program}` failed: {message}")]
    Command { program: String, message: String },

    #[error("Fix failed: {0}")]
    Fix(String),

    #[error("Unknown preset: '{0}'. Available presets: init, dev, stable")]
    UnknownPreset(String),

    #[error("Unknown hook: '{0}'. Available hooks: pre-commit, pre-push, pre-publish")]
    UnknownHook(String),
}

impl DoctorError {
    /// Short, stable tag for machine-readable output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::UnknownPreset(_) | Self::UnknownHook(_) => "Config",
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::Io(_) => "IO",
            Self::InvalidPattern { .. } | Self::InvalidRegex(_) => "Pattern",
            Self::TomlParse(_) | Self::TomlSerialize(_) | Self::Json(_) => "Format",
            Self::Command { .. } => "Command",
            Self::Fix(_) => "Fix",
        }
    }
}

pub type Result<T> = std::result::Result<T, DoctorError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
