//! dayrate CLI
//!
//! Command-line interface for dayrate - one rating per thing per day.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dayrate_core::{Config, RatingStore};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "dayrate")]
#[command(about = "dayrate - rate anything once a day, from 0 to 5")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate something for today
    Rate {
        /// What you are rating (e.g. "coffee")
        name: String,
        /// Score from 0 to 5
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// List rated items, most recent first
    #[command(alias = "ls")]
    List,
    /// Show an item's rating history
    Show {
        /// Item name
        name: String,
    },
    /// Delete an item and its history
    #[command(alias = "rm")]
    Delete {
        /// Item name
        name: String,
    },
    /// Show status (storage location, counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, utc_offset, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut store = RatingStore::open(&config)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::Rate { name, value } => commands::rate::rate(&mut store, name, value, &output),
        Commands::List => commands::item::list(&store, &output),
        Commands::Show { name } => commands::item::show(&store, name, &output),
        Commands::Delete { name } => commands::item::delete(&mut store, name, &output),
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
