//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/dayrate/config.toml)
//! 3. Environment variables (DAYRATE_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar::Calendar;

/// Environment variable prefix
const ENV_PREFIX: &str = "DAYRATE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (ratings directory, debug log)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Fixed UTC offset for the day boundary, e.g. "+02:00" (local time when unset)
    #[serde(default)]
    pub utc_offset: Option<String>,

    /// Log file (stderr when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            utc_offset: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (DAYRATE_DATA_DIR, DAYRATE_UTC_OFFSET, DAYRATE_LOG_FILE)
    /// 2. Config file (~/.config/dayrate/config.toml or DAYRATE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // DAYRATE_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // DAYRATE_UTC_OFFSET
        if let Ok(val) = std::env::var(format!("{}_UTC_OFFSET", ENV_PREFIX)) {
            self.utc_offset = if val.is_empty() { None } else { Some(val) };
        }

        // DAYRATE_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Calendar used for the one-rating-per-day rule
    pub fn calendar(&self) -> Result<Calendar> {
        match &self.utc_offset {
            Some(offset) => offset
                .parse()
                .with_context(|| format!("Invalid utc_offset in configuration: {:?}", offset)),
            None => Ok(Calendar::Local),
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DAYRATE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayrate")
            .join("config.toml")
    }

    /// Get the directory holding one record per rated item
    pub fn ratings_dir(&self) -> PathBuf {
        self.data_dir.join("ratings")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dayrate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "DAYRATE_DATA_DIR",
        "DAYRATE_UTC_OFFSET",
        "DAYRATE_LOG_FILE",
        "DAYRATE_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.utc_offset.is_none());
        assert!(config.log_file.is_none());
        assert!(config.data_dir.ends_with("dayrate"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config::default();
        assert!(config.ratings_dir().ends_with("dayrate/ratings"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAYRATE_DATA_DIR", "/tmp/dayrate-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/dayrate-test"));
        assert_eq!(
            config.ratings_dir(),
            PathBuf::from("/tmp/dayrate-test/ratings")
        );
    }

    #[test]
    fn test_env_override_utc_offset() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAYRATE_UTC_OFFSET", "+02:00");
        config.apply_env_overrides();
        assert_eq!(config.utc_offset, Some("+02:00".to_string()));

        // Empty string clears it
        env::set_var("DAYRATE_UTC_OFFSET", "");
        config.apply_env_overrides();
        assert!(config.utc_offset.is_none());
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DAYRATE_LOG_FILE", "/tmp/dayrate.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/dayrate.log")));
    }

    #[test]
    fn test_calendar() {
        let mut config = Config::default();
        assert_eq!(config.calendar().unwrap(), Calendar::Local);

        config.utc_offset = Some("+02:00".to_string());
        assert!(matches!(config.calendar().unwrap(), Calendar::Fixed(_)));

        config.utc_offset = Some("utc".to_string());
        assert_eq!(config.calendar().unwrap(), Calendar::utc());

        config.utc_offset = Some("noon".to_string());
        assert!(config.calendar().is_err());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/dayrate"),
            utc_offset: Some("-05:00".to_string()),
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("utc_offset"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_path() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            data_dir = "/custom/data"
            utc_offset = "+09:00"
        "#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.utc_offset, Some("+09:00".to_string()));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.utc_offset.is_none());
        assert!(config.data_dir.ends_with("dayrate"));
    }

    #[test]
    fn test_save_to_path_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            utc_offset: Some("+01:00".to_string()),
            log_file: Some(temp_dir.path().join("log.txt")),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("DAYRATE_CONFIG", "/etc/dayrate.toml");
        assert_eq!(Config::config_file_path(), PathBuf::from("/etc/dayrate.toml"));
    }
}
