//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/buzz/config.toml`.
//! Every model and solver constant has a documented default and can be
//! overridden per field; a missing file means pure defaults.

use crate::params::{PkParams, SolverParams};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    /// Pharmacokinetic model overrides
    #[serde(default)]
    pub model: PkParams,

    /// Root-finder overrides
    #[serde(default)]
    pub solver: SolverParams,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("buzz")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("buzz").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.beta_percent_per_hour, 0.015);
        assert_eq!(config.solver.horizon_hours, 24.0);
        assert!(config.data.data_dir.ends_with("buzz"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.model, parsed.model);
        assert_eq!(config.solver, parsed.solver);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[model]
beta_percent_per_hour = 0.017

[solver]
tolerance_seconds = 10.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.beta_percent_per_hour, 0.017);
        assert_eq!(config.model.fasted.lag_minutes, 12.0); // default
        assert_eq!(config.solver.tolerance_seconds, 10.0);
        assert_eq!(config.solver.horizon_hours, 24.0); // default
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.model.beta_percent_per_hour = 0.012;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.model.beta_percent_per_hour, 0.012);
    }
}
