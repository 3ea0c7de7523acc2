//! Configuration for the driving harness.
//!
//! Only the harness is configurable: grid size, run lengths and reporting.
//! The engine's constants (neighbor radius, growth period range, grid
//! spacing) are fixed design constants in [`crate::network`], not options.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Side length of the square node grid (the network holds its square)
    pub grid_size: usize,
}

/// Run phases of the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Steps during which every node value is re-randomized before each step
    pub kickstart_steps: u64,
    /// Free-running steps after the kickstart
    pub steps: u64,
    /// Keep injecting a random value into the input node during the free run
    pub drive_input: bool,
}

/// Logging and reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Steps between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            run: RunConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { grid_size: 32 }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            kickstart_steps: 50,
            steps: 1024,
            drive_input: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 32,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.network.grid_size == 0 {
            return Err("grid_size must be > 0".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network.grid_size, 32);
        assert_eq!(config.run.kickstart_steps, 50);
        assert_eq!(config.run.steps, 1024);
        assert!(!config.run.drive_input);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.network.grid_size = 12;
        config.run.steps = 99;

        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded.network.grid_size, 12);
        assert_eq!(loaded.run.steps, 99);
        assert_eq!(loaded.logging.stats_interval, config.logging.stats_interval);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let mut config = Config::default();
        config.network.grid_size = 0;
        assert!(config.validate().is_err());
    }
}
