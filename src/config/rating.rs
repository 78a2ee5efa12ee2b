//! Estimator configuration
//!
//! Bounds and system constants are fixed at estimator construction and
//! validated once there, never on individual updates.

use crate::error::EstimatorError;
use crate::rating::scale::Converter;
use crate::rating::volatility::{DEFAULT_MAX_BRACKET_STEPS, DEFAULT_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};

/// Recommended volatility change constraint
pub const DEFAULT_TAU: f64 = 0.75;
/// Recommended convergence tolerance for the volatility solver
pub const DEFAULT_EPSILON: f64 = 0.000_001;
/// Nominal rating period: one week, in seconds
pub const DEFAULT_PERIOD_SECONDS: u64 = 60 * 60 * 24 * 7;

/// Inclusive bounds applied to every updated strength, internal scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_mu: f64,
    pub max_mu: f64,
    pub min_phi: f64,
    pub max_phi: f64,
    pub min_sigma: f64,
    pub max_sigma: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_rating_scale(&Converter::default(), (10.0, 5000.0), (50.0, 350.0), (0.04, 0.08))
    }
}

impl Bounds {
    /// Build bounds from human-facing `(min, max)` pairs for rating,
    /// deviation and volatility.
    pub fn from_rating_scale(
        converter: &Converter,
        rating: (f64, f64),
        deviation: (f64, f64),
        volatility: (f64, f64),
    ) -> Self {
        Self {
            min_mu: converter.rating_to_mu(rating.0),
            max_mu: converter.rating_to_mu(rating.1),
            min_phi: converter.deviation_to_phi(deviation.0),
            max_phi: converter.deviation_to_phi(deviation.1),
            min_sigma: volatility.0,
            max_sigma: volatility.1,
        }
    }

    /// Bounds that never bind, apart from keeping phi and sigma positive
    pub fn unbounded() -> Self {
        Self {
            min_mu: f64::NEG_INFINITY,
            max_mu: f64::INFINITY,
            min_phi: f64::MIN_POSITIVE,
            max_phi: f64::INFINITY,
            min_sigma: f64::MIN_POSITIVE,
            max_sigma: f64::INFINITY,
        }
    }

    /// Validate that every range is well formed
    pub fn validate(&self) -> crate::error::Result<()> {
        let ranges = [
            ("mu", self.min_mu, self.max_mu),
            ("phi", self.min_phi, self.max_phi),
            ("sigma", self.min_sigma, self.max_sigma),
        ];

        for (name, min, max) in ranges {
            if min.is_nan() || max.is_nan() {
                return Err(EstimatorError::ConfigurationError {
                    message: format!("Bounds for {} must not be NaN", name),
                }
                .into());
            }
            if min > max {
                return Err(EstimatorError::ConfigurationError {
                    message: format!("Minimum {} ({}) exceeds maximum ({})", name, min, max),
                }
                .into());
            }
        }

        if !(self.min_phi > 0.0 && self.min_sigma > 0.0) {
            return Err(EstimatorError::ConfigurationError {
                message: "Lower bounds for phi and sigma must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Configuration of the strength estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub bounds: Bounds,
    /// Volatility change constraint, reasonable values lie in 0.3..1.2
    pub tau: f64,
    /// Convergence tolerance of the volatility solver
    pub epsilon: f64,
    /// Cap on the downward bracket walk of the volatility solver
    pub max_bracket_steps: u32,
    /// Cap on refinement iterations of the volatility solver
    pub max_iterations: u32,
    /// Length of one nominal rating period in seconds
    pub period_seconds: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            tau: DEFAULT_TAU,
            epsilon: DEFAULT_EPSILON,
            max_bracket_steps: DEFAULT_MAX_BRACKET_STEPS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            period_seconds: DEFAULT_PERIOD_SECONDS,
        }
    }
}

impl EstimatorConfig {
    /// Create conservative configuration (volatility changes slowly)
    pub fn conservative() -> Self {
        Self {
            tau: 0.3,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (volatility reacts quickly)
    pub fn aggressive() -> Self {
        Self {
            tau: 1.2,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        self.bounds.validate()?;

        if !(self.tau > 0.0) || !self.tau.is_finite() {
            return Err(EstimatorError::ConfigurationError {
                message: "Tau must be positive and finite".to_string(),
            }
            .into());
        }

        if !(self.epsilon > 0.0) {
            return Err(EstimatorError::ConfigurationError {
                message: "Epsilon must be positive".to_string(),
            }
            .into());
        }

        if self.max_bracket_steps == 0 || self.max_iterations == 0 {
            return Err(EstimatorError::ConfigurationError {
                message: "Solver iteration caps must be greater than 0".to_string(),
            }
            .into());
        }

        if self.period_seconds == 0 {
            return Err(EstimatorError::ConfigurationError {
                message: "Rating period must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
