//! Logging setup
//!
//! Logging is off unless DAYRATE_LOG is set to a level (e.g. `debug`).
//! Output goes to `config.log_file` when configured, otherwise stderr.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dayrate_core::Config;

/// Environment variable holding the log level
const LOG_ENV: &str = "DAYRATE_LOG";

/// Initialize tracing for the CLI
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = EnvFilter::new(filter_directive(&log_level));

    let Some(log_path) = config.log_file.clone() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging to {:?}", log_path);
}

fn filter_directive(level: &str) -> String {
    format!("dayrate_core={},dayrate_cli={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive("debug"),
            "dayrate_core=debug,dayrate_cli=debug"
        );
    }
}
