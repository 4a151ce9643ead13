//! logwarden -- offline web access and SSH auth log threat analyzer.
//!
//! Parses the CLI, loads `logwarden.toml`, initializes tracing and dispatches
//! to one of the command handlers. Errors are printed to stderr and mapped to
//! process exit codes by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use logwarden_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            use colored::Colorize;

            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    // `config validate` must still report a broken file, so a load failure is
    // only fatal for the commands that need the configuration.
    let loaded = commands::load_config(&cli.config).await;
    let general = match &loaded {
        Ok(l) => l.config.general.clone(),
        Err(_) => GeneralConfig::default(),
    };
    logging::init_tracing(&general, cli.log_level.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;
    logwarden_core::metrics::describe_all();

    match cli.command {
        Commands::Analyze(args) => {
            let loaded = loaded?;
            commands::analyze::execute(args, &loaded.config, &writer).await
        }
        Commands::Rules => {
            let loaded = loaded?;
            commands::rules::execute(&loaded.config, &writer)
        }
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
