//! Reusable check shapes: file presence, JSON config validation, and external
//! command success. Each implements [`RuleCheck`] so the engine treats them
//! like any other check function.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::{RuleCheck, RuleOutcome};
use crate::context::ProjectContext;
use crate::error::{DoctorError, Result};
use crate::fs_utils;

type ContentFn = dyn Fn(&ProjectContext) -> String + Send + Sync;
type ValidateFn = dyn Fn(&Value) -> std::result::Result<(), String> + Send + Sync;
type RepairFn = dyn Fn(&mut Value) + Send + Sync;

/// Passes when any of the candidate files exists; can create the first one.
pub struct FilePresence {
    candidates: Vec<String>,
    default_content: Option<Box<ContentFn>>,
}

impl FilePresence {
    #[must_use]
    pub fn new(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
            default_content: None,
        }
    }

    /// Content written to the first candidate when the fix runs.
    #[must_use]
    pub fn with_default(
        mut self,
        content: impl Fn(&ProjectContext) -> String + Send + Sync + 'static,
    ) -> Self {
        self.default_content = Some(Box::new(content));
        self
    }

    fn primary(&self) -> &str {
        self.candidates.first().map_or("", String::as_str)
    }
}

impl RuleCheck for FilePresence {
    fn check(&self, ctx: &ProjectContext) -> Result<RuleOutcome> {
        if let Some(found) = self
            .candidates
            .iter()
            .find(|c| fs_utils::file_exists(&ctx.path(c)))
        {
            return Ok(RuleOutcome::pass(format!("Found {found}")));
        }

        let primary = self.primary();
        let outcome =
            RuleOutcome::fail(format!("Missing {primary}")).with_hint(format!("Create {primary}"));
        Ok(match &self.default_content {
            Some(content) => {
                let path = ctx.path(primary);
                let content = content(ctx);
                outcome.with_fix(move || fs_utils::write_file(&path, &content))
            }
            None => outcome,
        })
    }
}

/// Validates a JSON file with a predicate; can rewrite it with a repair
/// function. A missing file makes the rule inapplicable.
pub struct JsonConfig {
    file: String,
    validate: Box<ValidateFn>,
    repair: Option<std::sync::Arc<RepairFn>>,
    pass_message: String,
}

impl JsonConfig {
    pub fn new(
        file: &str,
        validate: impl Fn(&Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            file: file.to_string(),
            validate: Box::new(validate),
            repair: None,
            pass_message: format!("{file} is valid"),
        }
    }

    #[must_use]
    pub fn with_repair(mut self, repair: impl Fn(&mut Value) + Send + Sync + 'static) -> Self {
        self.repair = Some(std::sync::Arc::new(repair));
        self
    }

    #[must_use]
    pub fn with_pass_message(mut self, message: impl Into<String>) -> Self {
        self.pass_message = message.into();
        self
    }
}

impl RuleCheck for JsonConfig {
    fn check(&self, ctx: &ProjectContext) -> Result<RuleOutcome> {
        let path = ctx.path(&self.file);
        if !fs_utils::file_exists(&path) {
            return Ok(RuleOutcome::skip(format!("No {} found", self.file)));
        }
        let Some(value) = fs_utils::read_json(&path) else {
            return Ok(RuleOutcome::fail(format!("{} is not valid JSON", self.file)));
        };

        match (self.validate)(&value) {
            Ok(()) => Ok(RuleOutcome::pass(self.pass_message.clone())),
            Err(message) => {
                let outcome = RuleOutcome::fail(message);
                Ok(match &self.repair {
                    Some(repair) => {
                        let repair = std::sync::Arc::clone(repair);
                        outcome.with_fix(move || rewrite_json(&path, repair.as_ref()))
                    }
                    None => outcome,
                })
            }
        }
    }
}

/// Re-read the file at fix time so the repair applies to current content.
fn rewrite_json(path: &Path, repair: &RepairFn) -> Result<()> {
    let mut value = fs_utils::read_json(path).ok_or_else(|| {
        DoctorError::Fix(format!("{} is missing or not valid JSON", path.display()))
    })?;
    repair(&mut value);
    fs_utils::write_json(path, &value)
}

/// Passes when an external command exits successfully in the project root.
/// A program that is not installed makes the rule inapplicable.
pub struct CommandSuccess {
    program: String,
    args: Vec<String>,
    fix_args: Option<Vec<String>>,
    hint: Option<String>,
}

impl CommandSuccess {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            fix_args: None,
            hint: None,
        }
    }

    /// Arguments of a second invocation of the same program that repairs the issue.
    #[must_use]
    pub fn with_fix_args(mut self, args: &[&str]) -> Self {
        self.fix_args = Some(args.iter().map(|a| (*a).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RuleCheck for CommandSuccess {
    fn check(&self, ctx: &ProjectContext) -> Result<RuleOutcome> {
        let output = match Command::new(&self.program)
            .args(&self.args)
            .current_dir(ctx.cwd())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(RuleOutcome::skip(format!("{} is not installed", self.program)));
            }
            Err(e) => {
                return Err(DoctorError::Command {
                    program: self.display(),
                    message: e.to_string(),
                });
            }
        };

        if output.status.success() {
            return Ok(RuleOutcome::pass(format!("`{}` succeeded", self.display())));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let message = if detail.is_empty() {
            format!("`{}` failed ({})", self.display(), output.status)
        } else {
            format!("`{}` failed: {}", self.display(), detail.trim())
        };
        let mut outcome = RuleOutcome::fail(message);
        if let Some(hint) = &self.hint {
            outcome = outcome.with_hint(hint.clone());
        }
        if let Some(fix_args) = &self.fix_args {
            let program = self.program.clone();
            let args = fix_args.clone();
            let cwd = ctx.cwd().to_path_buf();
            outcome = outcome.with_fix(move || run_fix_command(&program, &args, &cwd));
        }
        Ok(outcome)
    }
}

fn run_fix_command(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| DoctorError::Command {
            program: program.to_string(),
            message: e.to_string(),
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(DoctorError::Command {
            program: format!("{program} {}", args.join(" ")),
            message: status.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "builders_tests.rs"]
mod tests;
