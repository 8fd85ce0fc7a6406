//! c64dreams CLI
//!
//! Command-line interface for laying out the C64 Dreams collection on
//! SD2IEC, Pi1541, Kung Fu Flash and Ultimate devices.

mod cli_types;
mod commands;
mod error;
mod logging;
mod options;
mod spinner;

use clap::Parser;

use c64dreams_lib::load_settings;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;
use logging::LogConfig;
use options::RunOptions;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        quiet: cli.quiet,
        verbose: cli.verbose,
        json: cli.pipeline.json,
        logfile: cli.logfile.as_deref(),
    };
    if let Err(e) = logging::init(&log_config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let options = || -> Result<RunOptions, CliError> {
        Ok(RunOptions::resolve(&cli.pipeline, &load_settings()?))
    };

    match &cli.command {
        Commands::Ingest => commands::ingest::run_ingest(&options()?),
        Commands::Normalize => commands::normalize::run_normalize(&options()?),
        Commands::Scan => commands::scan::run_scan(&options()?),
        Commands::Build { verify_only } => {
            commands::build::run_build(&options()?, *verify_only, cli.quiet)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
