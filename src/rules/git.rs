use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{list_names, node_manifest, project_ecosystems};
use crate::context::ProjectContext;
use crate::error::{DoctorError, Result};
use crate::fs_utils;
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::{Hook, RuleOutcome, RuleSpec};

/// Hook managers recognised by `git/hooks`, by the file or directory they use.
const HOOK_MANAGERS: &[&str] = &[
    ".husky",
    "lefthook.yml",
    ".lefthook.yml",
    ".pre-commit-config.yaml",
    ".githooks",
];

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("git", "Git", "Version control setup"),
        vec![
            RuleSpec::new("git/repository", "The project is under git", check_repository),
            RuleSpec::new(
                "git/ignores-deps",
                ".gitignore excludes dependency and build directories",
                check_ignores_deps,
            )
            .fixable(),
            RuleSpec::new("git/hooks", "A pre-commit hook is installed", check_hooks)
                .hooks(&[Hook::PreCommit]),
        ],
    )
}

/// Nearest ancestor of `dir` (inclusive) containing `.git`.
fn find_git_dir(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|a| a.join(".git"))
        .find(|git| git.exists())
}

fn check_repository(ctx: &ProjectContext) -> Result<RuleOutcome> {
    Ok(match find_git_dir(ctx.cwd()) {
        Some(_) => RuleOutcome::pass("Project is a git repository"),
        None => RuleOutcome::fail("Project is not a git repository").with_hint("Run `git init`"),
    })
}

/// Whether a `.gitignore` line covers `dir` (`node_modules`, `/node_modules/`, ...).
fn ignores(lines: &[&str], dir: &str) -> bool {
    lines.iter().any(|line| {
        let entry = line.trim().trim_start_matches('/').trim_end_matches('/');
        entry == dir || entry == format!("**/{dir}")
    })
}

fn check_ignores_deps(ctx: &ProjectContext) -> Result<RuleOutcome> {
    let dirs: Vec<&str> = project_ecosystems(ctx)
        .into_iter()
        .flat_map(|eco| eco.dependency_dirs().iter().copied())
        .collect();
    if dirs.is_empty() {
        return Ok(RuleOutcome::skip("No ecosystem detected"));
    }

    let path = ctx.path(".gitignore");
    let content = fs_utils::read_file(&path).unwrap_or_default();
    let lines: Vec<&str> = content.lines().collect();
    let missing: Vec<String> = dirs
        .iter()
        .filter(|dir| !ignores(&lines, dir))
        .map(|dir| (*dir).to_string())
        .collect();

    if missing.is_empty() {
        return Ok(RuleOutcome::pass(".gitignore covers dependency directories"));
    }
    Ok(
        RuleOutcome::fail(format!(".gitignore does not exclude {}", list_names(&missing)))
            .with_hint("Add the directories to .gitignore")
            .with_fix(move || append_ignores(&path, &missing)),
    )
}

fn append_ignores(path: &Path, dirs: &[String]) -> Result<()> {
    let mut content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(DoctorError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let lines: Vec<&str> = content.lines().collect();
    let still_missing: Vec<&String> = dirs.iter().filter(|dir| !ignores(&lines, dir)).collect();
    if still_missing.is_empty() {
        return Ok(());
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for dir in still_missing {
        content.push_str(dir);
        content.push_str("/\n");
    }
    fs_utils::write_file(path, &content)
}

fn check_hooks(ctx: &ProjectContext) -> Result<RuleOutcome> {
    if let Some(manager) = HOOK_MANAGERS.iter().find(|m| ctx.path(m).exists()) {
        return Ok(RuleOutcome::pass(format!("Hooks managed by {manager}")));
    }
    let declared_in_manifest = node_manifest(ctx).is_ok_and(|pkg| {
        pkg.get("simple-git-hooks").is_some()
            || pkg
                .get("husky")
                .and_then(|h| h.get("hooks"))
                .is_some_and(Value::is_object)
    });
    if declared_in_manifest {
        return Ok(RuleOutcome::pass("Hooks declared in package.json"));
    }
    let installed = find_git_dir(ctx.cwd())
        .map(|git| git.join("hooks").join("pre-commit"))
        .is_some_and(|hook| hook.is_file());
    Ok(if installed {
        RuleOutcome::pass("A pre-commit hook is installed")
    } else {
        RuleOutcome::fail("No pre-commit hook found")
            .with_hint("Install one that runs `repo-doctor hook pre-commit`")
    })
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
