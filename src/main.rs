use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use repo_doctor::cli::{Cli, Commands};
use repo_doctor::commands::{run_check, run_hook, run_init, run_rules, run_upgrade};

/// Default log level from `-v`/`-q`; `RUST_LOG` overrides it.
const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose, cli.quiet)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Hook(args) => run_hook(args, &cli),
        Commands::Upgrade(args) => run_upgrade(args, &cli),
        Commands::Rules(args) => run_rules(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
    };

    std::process::exit(exit_code);
}
