//! Configuration management for hr-roster.
//!
//! Configuration is loaded with figment from defaults, an optional TOML file and
//! `HR_ROSTER_`-prefixed environment variables. Nested keys use a double underscore in the
//! environment, e.g. `HR_ROSTER_ALERTS__WINDOW_DAYS=14`.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::alerts::DEFAULT_WINDOW_DAYS;
use crate::error::{StoreError, StoreResult};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config/data dirs.
const APP_DIR_NAME: &str = "hr-roster";

/// Default snapshot file name.
const SNAPSHOT_FILE_NAME: &str = "hrSystemData.json";

/// Environment variable prefix.
const ENV_PREFIX: &str = "HR_ROSTER_";

/// Largest accepted alert window, in days.
const MAX_WINDOW_DAYS: u32 = 365;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HR_ROSTER_`)
/// 2. TOML config file at `~/.config/hr-roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file locations.
    pub data: DataConfig,
    /// Expiry alert settings.
    pub alerts: AlertsConfig,
    /// Workbook export settings.
    pub export: ExportConfig,
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory probed for the bundled `DB.*` files.
    pub data_dir: PathBuf,
    /// Snapshot file. Defaults to `~/.local/share/hr-roster/hrSystemData.json`.
    pub snapshot_path: Option<PathBuf>,
}

/// Expiry alert settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Days ahead of today that still raise an alert.
    pub window_days: u32,
}

/// Workbook export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory backups and templates are written to when no path is given.
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("db"),
            snapshot_path: None,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> StoreResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> StoreResult<()> {
        if self.data.data_dir.as_os_str().is_empty() {
            return Err(StoreError::ConfigValidation {
                message: "data_dir must not be empty".to_string(),
            });
        }

        if self.alerts.window_days > MAX_WINDOW_DAYS {
            return Err(StoreError::ConfigValidation {
                message: format!(
                    "window_days ({}) cannot be greater than {MAX_WINDOW_DAYS}",
                    self.alerts.window_days
                ),
            });
        }

        Ok(())
    }

    /// Get the snapshot path, resolving defaults if not set.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data
            .snapshot_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(SNAPSHOT_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.data.data_dir, PathBuf::from("db"));
        assert!(config.data.snapshot_path.is_none());
        assert_eq!(config.alerts.window_days, 30);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_window_too_large() {
        let mut config = Config::default();
        config.alerts.window_days = 400;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("window_days"));
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let mut config = Config::default();
        config.data.data_dir = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_dir"));
    }

    #[test]
    fn test_snapshot_path_default_and_custom() {
        let mut config = Config::default();
        assert!(config.snapshot_path().to_string_lossy().contains("hrSystemData.json"));

        config.data.snapshot_path = Some(PathBuf::from("/custom/snap.json"));
        assert_eq!(config.snapshot_path(), PathBuf::from("/custom/snap.json"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("hr-roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[data]\ndata_dir = \"/srv/hr\"\n\n[alerts]\nwindow_days = 14\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.data.data_dir, PathBuf::from("/srv/hr"));
        assert_eq!(config.alerts.window_days, 14);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[alerts]\nwindow_days = 1000\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, StoreError::ConfigValidation { .. }));
    }
}
