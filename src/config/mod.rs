//! Configuration management for the strength estimator
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ScaleSettings, ServiceSettings};
pub use rating::{Bounds, EstimatorConfig};
