//! Configuration module for mtm
//!
//! Settings come from an optional TOML file in the user's config directory,
//! overridden by `MTM_*` environment variables. Command-line flags override
//! both and are applied by the binary.

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config/data directories
const APP_DIR: &str = "mtm";

/// Prefix of the environment variables read as settings (`MTM_DATABASE`, ...)
const ENV_PREFIX: &str = "MTM";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MtmConfig {
    /// Location of the index; the platform data directory when unset
    pub database: Option<PathBuf>,

    /// Print results only, without status lines
    pub quiet: bool,

    /// Default `env_logger` filter, used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for MtmConfig {
    fn default() -> Self {
        Self {
            database: None,
            quiet: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl MtmConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load the config file (if any) and the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load from `path` (missing is fine), then environment overrides
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the
    /// wrong type.
    pub fn load_from(path: &Path, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration as TOML at `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Where the index lives
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no database is configured and the platform
    /// data directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("index"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = MtmConfig::default();
        assert!(config.database.is_none());
        assert!(!config.quiet);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = MtmConfig::load_from(&dir.path().join("config.toml"), env(&[])).unwrap();
        assert_eq!(config, MtmConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database = \"/data/tags\"\nquiet = true\n").unwrap();

        let config = MtmConfig::load_from(&path, env(&[])).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/data/tags")));
        assert!(config.quiet);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database = \"/data/tags\"\n").unwrap();

        let config = MtmConfig::load_from(
            &path,
            env(&[("MTM_DATABASE", "/elsewhere/tags"), ("MTM_LOG_LEVEL", "debug")]),
        )
        .unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/elsewhere/tags")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unrelated_environment_ignored() {
        let dir = TempDir::new().unwrap();
        let config = MtmConfig::load_from(&dir.path().join("none.toml"), env(&[("DATABASE", "/nope")])).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = MtmConfig {
            database: Some(PathBuf::from("/data/tags")),
            quiet: true,
            log_level: "info".to_string(),
        };

        config.save_to(&path).unwrap();
        assert_eq!(MtmConfig::load_from(&path, env(&[])).unwrap(), config);
    }

    #[test]
    fn test_database_path_prefers_configured() {
        let config = MtmConfig {
            database: Some(PathBuf::from("/data/tags")),
            ..MtmConfig::default()
        };
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/data/tags"));
    }
}
