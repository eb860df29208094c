use std::fmt::Write;

use crate::cli::{Cli, RulesArgs};
use crate::config::{Preset, preset_severity};
use crate::registry::RuleModule;
use crate::rules::builtin_modules;
use crate::EXIT_SUCCESS;
use crate::rule::Hook;

use super::context::write_output;

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    write_output(&format_rules(builtin_modules(), args.preset), cli.quiet);
    EXIT_SUCCESS
}

/// One block per module, one line per rule with its severity in each preset
/// (or only in `preset` when given).
#[must_use]
pub fn format_rules(modules: &[RuleModule], preset: Option<Preset>) -> String {
    let presets: Vec<Preset> = preset.map_or_else(|| Preset::ALL.to_vec(), |p| vec![p]);
    let mut output = String::new();

    for module in modules {
        let _ = write!(output, "{} ({})", module.label(), module.id());
        if let Some(ecosystem) = module.ecosystem() {
            let _ = write!(output, " [{}]", ecosystem.name());
        }
        output.push('\n');

        for rule in module.rules() {
            let severities: Vec<String> = presets
                .iter()
                .map(|p| format!("{p}={}", preset_severity(rule.name(), *p)))
                .collect();
            let _ = write!(output, "  {:<28} {}", rule.name(), severities.join(" "));
            if rule.is_fixable() {
                output.push_str(" fixable");
            }
            if !rule.hooks().is_empty() {
                let hooks: Vec<&str> = rule.hooks().iter().copied().map(Hook::as_str).collect();
                let _ = write!(output, " hooks={}", hooks.join(","));
            }
            output.push('\n');
            if !rule.description().is_empty() {
                let _ = writeln!(output, "      {}", rule.description());
            }
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
