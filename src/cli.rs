use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Preset;
use crate::output::OutputFormat;
use crate::rule::Hook;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "repo-doctor")]
#[command(author, version, about = "Audit a repository against project standards")]
#[command(long_about = "Checks a repository's files, manifests and workflows against \
    named rules, grouped into presets of increasing strictness.\n\n\
    Exit codes:\n  \
    0 - No blocking failures\n  \
    1 - Checks failed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every applicable rule
    Check(CheckArgs),

    /// Run the blocking rules for a git hook
    Hook(HookArgs),

    /// Show how close the project is to the next preset
    Upgrade(UpgradeArgs),

    /// List registered rules and their preset severities
    Rules(RulesArgs),

    /// Generate a starter configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Apply available fixes and re-verify them
    #[arg(long)]
    pub fix: bool,

    /// Preset to check against (overrides the configuration)
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<Preset>,

    /// Configuration file to use instead of the discovered one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run the blocking rules that apply to this hook (same as `repo-doctor hook`)
    #[arg(long, value_parser = parse_hook)]
    pub hook: Option<Hook>,

    /// Do not probe the next preset after a clean run
    #[arg(long)]
    pub no_upgrade_hint: bool,
}

#[derive(Parser, Debug)]
pub struct HookArgs {
    /// Hook name: pre-commit, pre-push or pre-publish
    #[arg(value_parser = parse_hook)]
    pub hook: Hook,

    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct UpgradeArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Only show the severity under this preset
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<Preset>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Directory to write `.repo-doctor.toml` into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Preset for the generated file
    #[arg(long, value_parser = parse_preset, default_value = "init")]
    pub preset: Preset,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse().map_err(|e: crate::DoctorError| e.to_string())
}

fn parse_hook(s: &str) -> Result<Hook, String> {
    s.parse().map_err(|e: crate::DoctorError| e.to_string())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
