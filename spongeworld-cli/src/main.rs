use clap::Parser;
use colored::*;
use std::process;

mod cli;

use crate::cli::settings::Settings;
use crate::cli::{Cli, Commands};
use spongeworld_core::{init_logging, SpongeError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<SpongeError>() {
            Some(SpongeError::Configuration(_)) => 2,
            Some(SpongeError::Io(_)) => 3,
            Some(SpongeError::Load(_)) => 4,
            Some(err) if err.is_client_error() => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(&cli)?;
    init_logging(&settings.config.logging)?;

    rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;

    if cli.verbose > 0 {
        eprintln!("Using {} threads", settings.threads);
    }

    match cli.command {
        Commands::Summary(args) => crate::cli::commands::summary::run(args, &settings),
        Commands::Fields(args) => crate::cli::commands::fields::run(args, &settings),
        Commands::Info(args) => crate::cli::commands::info::run(args, &settings),
        Commands::Annotate(args) => crate::cli::commands::annotate::run(args, &settings),
        Commands::Request(args) => crate::cli::commands::request::run(args, &settings),
    }
}
