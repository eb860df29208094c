use std::path::PathBuf;

use crate::cli::{Cli, InitArgs};
use crate::config::{CONFIG_FILE_NAME, Preset, parse_config};
use crate::fs_utils::write_file;
use crate::{DoctorError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args) {
        Ok(path) => {
            if !cli.quiet {
                println!("Created configuration file: {}", path.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Write a starter `.repo-doctor.toml` into `args.path`.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<PathBuf> {
    let output_path = args.path.join(CONFIG_FILE_NAME);

    if output_path.exists() && !args.force {
        return Err(DoctorError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    let template = generate_config_template(args.preset);
    parse_config(&template)?;
    write_file(&output_path, &template)?;
    Ok(output_path)
}

#[must_use]
pub fn generate_config_template(preset: Preset) -> String {
    format!(
        r#"# repo-doctor configuration file

# Preset: init (essentials), dev (day-to-day hygiene) or stable (release ready)
preset = "{preset}"

# Rule-name globs to skip entirely
# ignore = ["cargo/*", "workflows/pinned-actions"]

# Per-rule severity overrides: off, info, warn or error
[rules]
# "files/changelog" = "off"
# "git/hooks" = "error"

# Per-rule options
# [options."manifest/keywords"]
# min = 3

# [options."workflows/pinned-actions"]
# require-sha = true
"#
    )
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
