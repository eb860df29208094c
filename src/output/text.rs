use std::fmt::Write;

use indexmap::IndexMap;

use crate::engine::{CheckReport, UpgradeReadiness};
use crate::error::Result;
use crate::rule::{CheckResult, ResultStatus};

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(status: ResultStatus) -> &'static str {
        match status {
            ResultStatus::Passed => "✓",
            ResultStatus::Skipped => "○",
            ResultStatus::Advisory => "ℹ",
            ResultStatus::Warning => "⚠",
            ResultStatus::Failed => "✗",
        }
    }

    const fn status_color(status: ResultStatus) -> &'static str {
        match status {
            ResultStatus::Passed => ansi::GREEN,
            ResultStatus::Skipped => ansi::DIM,
            ResultStatus::Advisory => ansi::CYAN,
            ResultStatus::Warning => ansi::YELLOW,
            ResultStatus::Failed => ansi::RED,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn is_visible(&self, result: &CheckResult) -> bool {
        !result.skipped || self.verbose >= 1
    }

    fn format_result(&self, result: &CheckResult, output: &mut String) {
        let status = result.status();
        let icon = self.paint(Self::status_icon(status), Self::status_color(status));
        let _ = write!(output, "  {icon} {}: {}", result.name, result.message);
        if result.fixable() && !result.passed {
            let _ = write!(output, " {}", self.paint("(fixable with --fix)", ansi::DIM));
        }
        output.push('\n');

        if !result.passed
            && let Some(hint) = &result.hint
        {
            let _ = writeln!(output, "      → {hint}");
        }
    }

    fn format_summary(&self, report: &CheckReport) -> String {
        let passed = self.paint(&report.passed.to_string(), ansi::GREEN);
        let warnings = self.paint(&report.warnings.to_string(), ansi::YELLOW);
        let failed = self.paint(&report.failed.to_string(), ansi::RED);

        let mut summary = format!(
            "Summary: {} checks, {passed} passed, {warnings} warnings, {failed} failed",
            report.total
        );
        if report.fixed > 0 {
            let _ = write!(summary, ", {} fixed", report.fixed);
        }
        let _ = write!(
            summary,
            " (preset: {}, score: {}%)",
            report.preset,
            report.score()
        );
        summary
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        let mut by_category: IndexMap<&str, Vec<&CheckResult>> = IndexMap::new();
        for result in &report.results {
            by_category
                .entry(result.category.as_str())
                .or_default()
                .push(result);
        }

        let mut output = String::new();
        for (category, results) in &by_category {
            if results.iter().all(|r| r.skipped) && self.verbose == 0 {
                continue;
            }
            let _ = writeln!(output, "{}", self.paint(category, ansi::BOLD));
            for result in results.iter().filter(|r| self.is_visible(r)) {
                self.format_result(result, &mut output);
            }
            output.push('\n');
        }

        output.push_str(&self.format_summary(report));
        output.push('\n');
        Ok(output)
    }

    fn format_upgrade(&self, readiness: &UpgradeReadiness) -> Result<String> {
        let mut output = String::new();
        let Some(next) = readiness.next_preset else {
            let _ = writeln!(
                output,
                "Already at the strictest preset ({}), score {}%.",
                readiness.current_preset, readiness.current_score
            );
            return Ok(output);
        };

        let _ = writeln!(
            output,
            "Preset {} scores {}%; {next} would score {}%.",
            readiness.current_preset, readiness.current_score, readiness.next_score
        );
        if readiness.ready {
            let line = format!("Ready to upgrade: set preset = \"{next}\" in .repo-doctor.toml");
            let _ = writeln!(output, "{}", self.paint(&line, ansi::GREEN));
            return Ok(output);
        }

        let _ = writeln!(
            output,
            "{} blocking {next}:",
            self.paint(&readiness.blockers.len().to_string(), ansi::RED)
        );
        for blocker in &readiness.blockers {
            let _ = writeln!(output, "  ✗ {}: {}", blocker.name, blocker.message);
            if let Some(hint) = &blocker.hint {
                let _ = writeln!(output, "      → {hint}");
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
