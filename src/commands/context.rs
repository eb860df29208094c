use std::path::Path;

use crate::cli::ColorChoice;
use crate::config::{ConfigLoader, DoctorConfig, FileConfigLoader};
use crate::error::{DoctorError, Result};
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, format_error,
};

pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the file named by `--config`. Unlike discovery, failures here are fatal.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub(crate) fn load_explicit_config(path: Option<&Path>) -> Result<Option<DoctorConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let loaded = FileConfigLoader::new().load_from_path(path)?;
    Ok(Some(loaded.config))
}

pub(crate) fn make_formatter(
    format: OutputFormat,
    color: ColorChoice,
    verbose: u8,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::with_verbose(
            color_choice_to_mode(color),
            verbose,
        )),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Print a command failure: a JSON error object on stdout for `--format json`,
/// otherwise `Error: ...` on stderr.
pub(crate) fn report_error(error: &DoctorError, format: OutputFormat) {
    match format {
        OutputFormat::Json => print!("{}", format_error(error)),
        OutputFormat::Text => eprintln!("Error: {error}"),
    }
}

pub(crate) fn write_output(content: &str, quiet: bool) {
    if !quiet {
        print!("{content}");
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
