use serde::Serialize;

use crate::config::{Preset, Severity};
use crate::engine::{CheckReport, UpgradeReadiness};
use crate::error::{DoctorError, Result};
use crate::rule::{CheckResult, ResultStatus};

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    preset: Preset,
    score: u32,
    summary: Summary,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    passed: usize,
    warnings: usize,
    failed: usize,
    fixed: usize,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    name: &'a str,
    category: &'a str,
    status: ResultStatus,
    passed: bool,
    severity: Severity,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'a str>,
    fixable: bool,
    skipped: bool,
    crashed: bool,
    fixed: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        let output = JsonOutput {
            preset: report.preset,
            score: report.score(),
            summary: Summary {
                total: report.total,
                passed: report.passed,
                warnings: report.warnings,
                failed: report.failed,
                fixed: report.fixed,
            },
            results: report.results.iter().map(convert_result).collect(),
        };
        to_json(&output)
    }

    fn format_upgrade(&self, readiness: &UpgradeReadiness) -> Result<String> {
        to_json(readiness)
    }
}

fn to_json(value: &impl Serialize) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Machine-readable form of a command failure: `{"error": {"type", "message"}}`.
#[must_use]
pub fn format_error(error: &DoctorError) -> String {
    let value = serde_json::json!({
        "error": {
            "type": error.error_type(),
            "message": error.to_string(),
        }
    });
    format!("{value:#}\n")
}

fn convert_result(result: &CheckResult) -> JsonResult<'_> {
    JsonResult {
        name: &result.name,
        category: &result.category,
        status: result.status(),
        passed: result.passed,
        severity: result.severity,
        message: &result.message,
        hint: result.hint.as_deref(),
        fixable: result.fixable(),
        skipped: result.skipped,
        crashed: result.crashed,
        fixed: result.fixed,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
