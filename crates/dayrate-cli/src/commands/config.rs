//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use dayrate_core::{Calendar, Config};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "ratings_dir": config.ratings_dir(),
                    "utc_offset": config.utc_offset,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:   {}", config.data_dir.display());
            println!(
                "  utc_offset: {}",
                config.utc_offset.as_deref().unwrap_or("(local time)")
            );
            println!(
                "  log_file:   {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(stderr)".to_string())
            );
            println!();
            println!("Ratings:     {}", config.ratings_dir().display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let cleared = value.is_empty() || value == "none";

    match key {
        "data_dir" => {
            if cleared {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "utc_offset" => {
            config.utc_offset = if cleared || value.eq_ignore_ascii_case("local") {
                None
            } else {
                value
                    .parse::<Calendar>()
                    .with_context(|| format!("Invalid value for utc_offset: {}", value))?;
                Some(value.to_string())
            };
        }
        "log_file" => {
            config.log_file = if cleared { None } else { Some(value.into()) };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, utc_offset, log_file",
                key
            );
        }
    }

    Ok(())
}
