//! Glicko-2 strength estimation
//!
//! This module holds the numerical core: outcome weighting, evidence
//! aggregation, the volatility solver and the estimator that ties them
//! together, plus conversion to and from the human-facing rating scale.

pub mod aggregation;
pub mod estimator;
pub mod scale;
pub mod volatility;
pub mod weighting;

// Re-export commonly used types
pub use aggregation::{aggregate, Aggregate};
pub use estimator::Estimator;
pub use scale::Converter;
pub use volatility::VolatilitySolver;
pub use weighting::{weigh, Evidence};
