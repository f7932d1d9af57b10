use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rider_cli::commands::production::Production;
use rider_cli::commands::{check, needs, peaks};
use rider_cli::{Cli, Commands, Config};

/// Load config and the production file; a positional FILE argument
/// overrides the configured path.
fn load_production(file: Option<&Path>, config_path: Option<&Path>) -> Result<Production> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = file.unwrap_or(&config.production_file);
    Production::load(path, &config.schedule_policy())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Check { file, json }) => {
            let production = load_production(file.as_deref(), cli.config.as_deref())?;
            check::run(&production, *json)?;
        }
        Some(Commands::Peaks { file, json, csv }) => {
            let production = load_production(file.as_deref(), cli.config.as_deref())?;
            let format = if *json {
                peaks::OutputFormat::Json
            } else if *csv {
                peaks::OutputFormat::Csv
            } else {
                peaks::OutputFormat::Human
            };
            peaks::run(&production, format)?;
        }
        Some(Commands::Needs { file, json }) => {
            let production = load_production(file.as_deref(), cli.config.as_deref())?;
            needs::run(&production, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
