//! How close a project is to passing the next stricter preset.

use serde::Serialize;
use tracing::debug;

use super::{CheckReport, RunOptions, resolve_config, run_checks_with_loader};
use crate::config::{ConfigLoader, FileConfigLoader, Preset};
use crate::context::discover_workspace_root;
use crate::error::{DoctorError, Result};
use crate::registry::RuleModule;

/// A rule that fails under the next preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blocker {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeReadiness {
    /// Nothing would fail under the next preset.
    pub ready: bool,
    pub current_preset: Preset,
    /// `None` when already at the strictest preset.
    pub next_preset: Option<Preset>,
    pub current_score: u32,
    pub next_score: u32,
    pub blockers: Vec<Blocker>,
}

/// Run the current preset and the next stricter one, without fixing anything.
///
/// # Errors
/// See [`super::run_checks`].
pub fn check_upgrade_readiness(
    options: &RunOptions,
    modules: &[RuleModule],
) -> Result<UpgradeReadiness> {
    check_upgrade_readiness_with_loader(options, modules, &FileConfigLoader::new())
}

/// [`check_upgrade_readiness`] with an injected configuration loader.
///
/// # Errors
/// See [`super::run_checks`].
pub fn check_upgrade_readiness_with_loader<L: ConfigLoader + Sync>(
    options: &RunOptions,
    modules: &[RuleModule],
    loader: &L,
) -> Result<UpgradeReadiness> {
    let cwd = dunce::canonicalize(&options.cwd).map_err(|source| DoctorError::FileRead {
        path: options.cwd.clone(),
        source,
    })?;
    let workspace_root = discover_workspace_root(&cwd);
    let config = resolve_config(options, loader, &cwd, workspace_root.as_deref());
    let current_preset = options.preset.or(config.preset).unwrap_or_default();

    let base = RunOptions {
        cwd,
        fix: false,
        preset: Some(current_preset),
        config: Some(config),
        hook: None,
        blocking_only: false,
    };
    let current = run_checks_with_loader(&base, modules, loader)?;

    let Some(next_preset) = current_preset.next() else {
        return Ok(UpgradeReadiness {
            ready: true,
            current_preset,
            next_preset: None,
            current_score: current.score(),
            next_score: current.score(),
            blockers: Vec::new(),
        });
    };

    let next = run_checks_with_loader(
        &RunOptions {
            preset: Some(next_preset),
            ..base
        },
        modules,
        loader,
    )?;
    debug!(
        current = %current_preset,
        next = %next_preset,
        blockers = next.failed,
        "upgrade readiness"
    );
    Ok(readiness(current_preset, next_preset, &current, &next))
}

fn readiness(
    current_preset: Preset,
    next_preset: Preset,
    current: &CheckReport,
    next: &CheckReport,
) -> UpgradeReadiness {
    let blockers: Vec<Blocker> = next
        .failures()
        .map(|r| Blocker {
            name: r.name.clone(),
            message: r.message.clone(),
            hint: r.hint.clone(),
        })
        .collect();
    UpgradeReadiness {
        ready: blockers.is_empty(),
        current_preset,
        next_preset: Some(next_preset),
        current_score: current.score(),
        next_score: next.score(),
        blockers,
    }
}

#[cfg(test)]
#[path = "upgrade_tests.rs"]
mod tests;
