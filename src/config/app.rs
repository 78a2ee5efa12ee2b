//! Main application configuration
//!
//! This module defines the top-level configuration of the strength-estimator
//! binary: TOML file loading, environment variable overrides and validation.

use crate::config::rating::EstimatorConfig;
use crate::error::EstimatorError;
use crate::rating::scale::{Converter, DEFAULT_VOLATILITY};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub scale: ScaleSettings,
    pub estimator: EstimatorConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Rating scale settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSettings {
    /// Anchor rating/deviation/factor for scale conversion
    #[serde(flatten)]
    pub converter: Converter,
    /// Volatility assigned to unrated players
    pub default_volatility: f64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "strength-estimator".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            converter: Converter::default(),
            default_volatility: DEFAULT_VOLATILITY,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", name, value)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still
    /// override individual values
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Scale settings
        if let Some(rating) = parse_env("SCALE_RATING")? {
            self.scale.converter.rating = rating;
        }
        if let Some(deviation) = parse_env("SCALE_DEVIATION")? {
            self.scale.converter.deviation = deviation;
        }
        if let Some(factor) = parse_env("SCALE_FACTOR")? {
            self.scale.converter.factor = factor;
        }
        if let Some(volatility) = parse_env("DEFAULT_VOLATILITY")? {
            self.scale.default_volatility = volatility;
        }

        // Estimator settings
        if let Some(tau) = parse_env("ESTIMATOR_TAU")? {
            self.estimator.tau = tau;
        }
        if let Some(epsilon) = parse_env("ESTIMATOR_EPSILON")? {
            self.estimator.epsilon = epsilon;
        }
        if let Some(period) = parse_env("ESTIMATOR_PERIOD_SECONDS")? {
            self.estimator.period_seconds = period;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(EstimatorError::ConfigurationError {
                message: format!("Invalid log level: {}", config.service.log_level),
            }
            .into())
        }
    }

    config.scale.converter.validate()?;

    if !(config.scale.default_volatility > 0.0) {
        return Err(EstimatorError::ConfigurationError {
            message: "Default volatility must be positive".to_string(),
        }
        .into());
    }

    config.estimator.validate()
}
