//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. The
//! forecast model constants are part of the configuration so deployments
//! can tune them without rebuilding; they are validated on load.

use crate::cluster::ClusterThreshold;
use crate::events::{
    GLUCOSE_CHECK_DEDUP_MINUTES, SENSOR_START_DEDUP_MINUTES, TreatmentKind,
};
use crate::forecast::Ar2Model;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: Ar2Model,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event-deduplication thresholds per noisy upstream stream
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    #[serde(default = "default_sensor_start_minutes")]
    pub sensor_start_minutes: i64,

    #[serde(default = "default_glucose_check_minutes")]
    pub glucose_check_minutes: i64,
}

fn default_sensor_start_minutes() -> i64 {
    SENSOR_START_DEDUP_MINUTES
}

fn default_glucose_check_minutes() -> i64 {
    GLUCOSE_CHECK_DEDUP_MINUTES
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            sensor_start_minutes: default_sensor_start_minutes(),
            glucose_check_minutes: default_glucose_check_minutes(),
        }
    }
}

impl ClusterConfig {
    /// The configured threshold for a kind, if the kind is deduplicated
    pub fn threshold_for(&self, kind: TreatmentKind) -> Option<ClusterThreshold> {
        match kind {
            TreatmentKind::SensorStart => {
                Some(ClusterThreshold::minutes(self.sensor_start_minutes))
            }
            TreatmentKind::GlucoseCheck => {
                Some(ClusterThreshold::minutes(self.glucose_check_minutes))
            }
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("glucocast").join("config.toml")),
            Some(PathBuf::from("/etc/glucocast/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check the loaded values for consistency
    fn validate(&self) -> Result<(), ConfigError> {
        self.forecast
            .validate()
            .map_err(|e| ConfigError::InvalidModel(e.to_string()))?;

        if self.cluster.sensor_start_minutes < 0 || self.cluster.glucose_check_minutes < 0 {
            return Err(ConfigError::InvalidModel(
                "dedup thresholds must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Logging overrides
        if let Ok(level) = std::env::var("GLUCOCAST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GLUCOCAST_LOG_FORMAT") {
            self.logging.format = format;
        }

        // Cluster overrides
        if let Ok(minutes) = std::env::var("GLUCOCAST_SENSOR_START_DEDUP") {
            if let Ok(m) = minutes.parse() {
                self.cluster.sensor_start_minutes = m;
            }
        }
        if let Ok(minutes) = std::env::var("GLUCOCAST_GLUCOSE_CHECK_DEDUP") {
            if let Ok(m) = minutes.parse() {
                self.cluster.glucose_check_minutes = m;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    InvalidModel(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Glucocast Configuration
#
# Environment variables override these settings:
# - GLUCOCAST_LOG_LEVEL
# - GLUCOCAST_LOG_FORMAT
# - GLUCOCAST_SENSOR_START_DEDUP
# - GLUCOCAST_GLUCOSE_CHECK_DEDUP

[forecast]
# AR(2) coefficients: the first weights the older log-value, the second
# the newer one
coefficients = [-0.723, 1.716]

# Baseline (mg/dL) converting between raw values and log space
reference = 140.0

# Clamp range for back-transformed values (mg/dL, inclusive)
min_mgdl = 36
max_mgdl = 400

# Forecast step spacing (minutes)
step_minutes = 5

# Per-step cone widths; the table length caps the cone horizon
cone_widths = [0.020, 0.041, 0.061, 0.081, 0.099, 0.116, 0.132, 0.146, 0.159, 0.171, 0.182, 0.192]

[cluster]
# Collapse sensor-start records closer together than this (minutes)
sensor_start_minutes = 3

# Collapse manual glucose checks closer together than this (minutes)
glucose_check_minutes = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/glucocast/glucocast.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.forecast.reference, 140.0);
        assert_eq!(config.cluster.sensor_start_minutes, 3);
        assert_eq!(config.cluster.glucose_check_minutes, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_threshold_for_kind() {
        let cluster = ClusterConfig {
            sensor_start_minutes: 5,
            glucose_check_minutes: 45,
        };

        assert_eq!(
            cluster.threshold_for(TreatmentKind::SensorStart),
            Some(ClusterThreshold::minutes(5))
        );
        assert_eq!(
            cluster.threshold_for(TreatmentKind::GlucoseCheck),
            Some(ClusterThreshold::minutes(45))
        );
        assert_eq!(cluster.threshold_for(TreatmentKind::Carbs), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[forecast]\nreference = 120.0\n\n[cluster]\nsensor_start_minutes = 2\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.forecast.reference, 120.0);
        assert_eq!(config.forecast.coefficients, [-0.723, 1.716]);
        assert_eq!(config.cluster.sensor_start_minutes, 2);
        assert_eq!(config.cluster.glucose_check_minutes, 30);
    }

    #[test]
    fn test_load_rejects_invalid_model() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[forecast]\nreference = -1.0\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModel(_)));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[forecast\nreference = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.forecast.cone_widths.len(), 12);
    }
}
