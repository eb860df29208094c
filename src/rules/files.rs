use super::project_ecosystems;
use crate::context::{ProjectContext, dir_name};
use crate::registry::{ModuleMeta, RuleModule, define_module};
use crate::rule::RuleSpec;
use crate::rule::builders::FilePresence;

const EDITORCONFIG: &str = "\
root = true

[*]
charset = utf-8
end_of_line = lf
indent_style = space
indent_size = 2
insert_final_newline = true
trim_trailing_whitespace = true

[*.md]
trim_trailing_whitespace = false
";

const CHANGELOG: &str = "\
# Changelog

All notable changes to this project are documented in this file.

## [Unreleased]
";

pub(super) fn module() -> RuleModule {
    define_module(
        ModuleMeta::new("files", "Project files", "Top-level files every repository should carry"),
        vec![
            RuleSpec::with_check(
                "files/readme",
                "A README describes the project",
                FilePresence::new(&["README.md", "readme.md", "README", "README.rst"])
                    .with_default(readme_content),
            )
            .fixable(),
            RuleSpec::with_check(
                "files/license",
                "A LICENSE file states the terms of use",
                FilePresence::new(&["LICENSE", "LICENSE.md", "LICENSE.txt", "LICENSE-MIT", "COPYING"]),
            ),
            RuleSpec::with_check(
                "files/gitignore",
                "A .gitignore keeps generated files out of version control",
                FilePresence::new(&[".gitignore"]).with_default(gitignore_content),
            )
            .fixable(),
            RuleSpec::with_check(
                "files/editorconfig",
                "An .editorconfig keeps formatting consistent across editors",
                FilePresence::new(&[".editorconfig"]).with_default(|_| EDITORCONFIG.to_string()),
            )
            .fixable(),
            RuleSpec::with_check(
                "files/changelog",
                "A CHANGELOG records notable changes",
                FilePresence::new(&["CHANGELOG.md", "CHANGELOG", "HISTORY.md"])
                    .with_default(|_| CHANGELOG.to_string()),
            )
            .fixable(),
        ],
    )
}

fn readme_content(ctx: &ProjectContext) -> String {
    let manifest = ctx.manifest();
    let name = manifest
        .and_then(|m| m.name())
        .map_or_else(|| dir_name(ctx.cwd()), str::to_string);
    match manifest.and_then(|m| m.str_field("description")) {
        Some(description) => format!("# {name}\n\n{description}\n"),
        None => format!("# {name}\n"),
    }
}

pub(super) fn gitignore_content(ctx: &ProjectContext) -> String {
    let mut lines: Vec<String> = project_ecosystems(ctx)
        .into_iter()
        .flat_map(|eco| eco.dependency_dirs())
        .map(|dir| format!("{dir}/"))
        .collect();
    lines.extend([".DS_Store".to_string(), "*.log".to_string(), ".env".to_string()]);
    lines.dedup();
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
