//! Strength Estimator - incremental Glicko-2 rating updates
//!
//! This crate updates a player's (strength, uncertainty, volatility) estimate
//! after every game instead of once per fixed rating period. Elapsed time
//! between updates is expressed as a fraction of a nominal period.

pub mod config;
pub mod error;
pub mod rating;
pub mod replay;
pub mod types;

// Re-export commonly used types and traits
pub use error::{EstimatorError, Result};
pub use types::*;

// Re-export key components
pub use config::{Bounds, EstimatorConfig};
pub use rating::{weigh, Converter, Estimator, Evidence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
