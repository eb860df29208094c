mod json;
mod text;

pub use json::{JsonFormatter, format_error};
pub use text::{ColorMode, TextFormatter};

use crate::engine::{CheckReport, UpgradeReadiness};
use crate::error::Result;

/// Trait for rendering reports into an output format.
pub trait OutputFormatter {
    /// Format a check report into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &CheckReport) -> Result<String>;

    /// Format an upgrade-readiness probe into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_upgrade(&self, readiness: &UpgradeReadiness) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
