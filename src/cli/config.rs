//! Configuration management for HealthAI
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.healthai/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Verbosity;
use crate::errors::{HealthError, Result};
use crate::responses::LatencyProfile;

/// Largest accepted latency multiplier
pub const MAX_LATENCY_SCALE: f64 = 10.0;

/// Complete configuration for HealthAI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assistant: AssistantSettings,
    pub session: SessionSettings,
    pub display: DisplaySettings,
    pub paths: PathsConfig,
}

/// Canned assistant behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub simulate_latency: bool,
    pub latency_scale: f64,
    pub seed: Option<u64>,
}

/// In-memory session limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub max_history: usize,
}

/// Terminal display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub default_verbosity: String,
    pub show_spinner: bool,
    pub color_output: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub state_dir: String,
    pub history_file: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            latency_scale: 1.0,
            seed: None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { max_history: 200 }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            show_spinner: true,
            color_output: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.healthai".to_string(),
            history_file: "~/.healthai/history".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HealthError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| HealthError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".healthai").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.assistant.latency_scale.is_finite()
            || self.assistant.latency_scale < 0.0
            || self.assistant.latency_scale > MAX_LATENCY_SCALE
        {
            return Err(HealthError::ConfigError(format!(
                "latency_scale must be between 0.0 and {}",
                MAX_LATENCY_SCALE
            )));
        }

        if self.session.max_history == 0 {
            return Err(HealthError::ConfigError(
                "max_history must be greater than 0".to_string(),
            ));
        }

        if Verbosity::from_name(&self.display.default_verbosity).is_none() {
            return Err(HealthError::ConfigError(format!(
                "Invalid verbosity level: {}",
                self.display.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HealthError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HealthError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HealthError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, no_delay: bool, seed: Option<u64>) -> Self {
        if no_delay {
            self.assistant.simulate_latency = false;
        }
        if seed.is_some() {
            self.assistant.seed = seed;
        }
        self
    }

    /// Latency profile implied by the assistant settings
    pub fn latency_profile(&self) -> LatencyProfile {
        if self.assistant.simulate_latency {
            LatencyProfile::scaled(self.assistant.latency_scale)
        } else {
            LatencyProfile::instant()
        }
    }

    /// Configured default verbosity (validated on load)
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_name(&self.display.default_verbosity).unwrap_or(Verbosity::Normal)
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get state directory path
    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.state_dir)
    }

    /// Get REPL line-history file path
    pub fn history_file(&self) -> PathBuf {
        Self::expand_path(&self.paths.history_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.assistant.simulate_latency);
        assert_eq!(config.assistant.latency_scale, 1.0);
        assert_eq!(config.session.max_history, 200);
        assert_eq!(config.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_latency_scale() {
        let mut config = Config::default();
        config.assistant.latency_scale = -0.5;
        assert!(config.validate().is_err());
        config.assistant.latency_scale = 11.0;
        assert!(config.validate().is_err());
        config.assistant.latency_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_history() {
        let mut config = Config::default();
        config.session.max_history = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_verbosity() {
        let mut config = Config::default();
        config.display.default_verbosity = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\nlatency_scale = 0.25\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.assistant.latency_scale, 0.25);
        assert!(config.assistant.simulate_latency);
        assert_eq!(config.session.max_history, 200);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nmax_history = 0\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.assistant.seed = Some(42);
        config.display.color_output = false;
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(true, Some(5));
        assert!(!config.assistant.simulate_latency);
        assert_eq!(config.assistant.seed, Some(5));
        assert!(config.latency_profile().is_instant());
    }

    #[test]
    fn test_overrides_keep_file_seed() {
        let mut config = Config::default();
        config.assistant.seed = Some(8);
        let config = config.with_overrides(false, None);
        assert_eq!(config.assistant.seed, Some(8));
        assert!(!config.latency_profile().is_instant());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.healthai");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = "/absolute/path";
        assert_eq!(Config::expand_path(path).to_string_lossy(), path);
    }
}
