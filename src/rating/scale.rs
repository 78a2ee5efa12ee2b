//! Conversion between the human-facing rating scale and the internal scale
//!
//! All estimator arithmetic happens on the internal scale. This module is the
//! only place that knows about the 1500 / 350 / 173.7178 anchors.

use crate::types::{Outcome, Rating, Strength};
use serde::{Deserialize, Serialize};

/// Rating of an unrated player
pub const DEFAULT_RATING: f64 = 1500.0;
/// Deviation of an unrated player. Also the natural upper bound on deviation.
pub const DEFAULT_DEVIATION: f64 = 350.0;
/// Volatility of an unrated player
pub const DEFAULT_VOLATILITY: f64 = 0.06;
/// Ratio between the human-facing scale and the internal scale
pub const DEFAULT_FACTOR: f64 = 173.7178;

/// Converts values between the two rating scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Converter {
    /// Anchor rating, maps to `mu = 0`
    pub rating: f64,
    /// Anchor deviation of an unrated player
    pub deviation: f64,
    /// Scaling factor
    pub factor: f64,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            deviation: DEFAULT_DEVIATION,
            factor: DEFAULT_FACTOR,
        }
    }
}

impl Converter {
    pub fn rating_to_mu(&self, rating: f64) -> f64 {
        (rating - self.rating) / self.factor
    }

    pub fn deviation_to_phi(&self, deviation: f64) -> f64 {
        deviation / self.factor
    }

    pub fn mu_to_rating(&self, mu: f64) -> f64 {
        mu * self.factor + self.rating
    }

    pub fn phi_to_deviation(&self, phi: f64) -> f64 {
        phi * self.factor
    }

    /// Convert a human-facing rating into an internal strength
    pub fn to_strength(&self, rating: &Rating) -> Strength {
        Strength {
            mu: self.rating_to_mu(rating.rating),
            phi: self.deviation_to_phi(rating.deviation),
            sigma: rating.volatility,
        }
    }

    /// Convert an internal strength back to the human-facing scale
    pub fn to_rating(&self, strength: &Strength) -> Rating {
        Rating {
            rating: self.mu_to_rating(strength.mu),
            deviation: self.phi_to_deviation(strength.phi),
            volatility: strength.sigma,
        }
    }

    /// Strength of a player nobody has seen yet
    pub fn unrated(&self, volatility: f64) -> Strength {
        Strength {
            mu: 0.0,
            phi: self.deviation_to_phi(self.deviation),
            sigma: volatility,
        }
    }

    /// Build an outcome against an opponent given on the human-facing scale
    pub fn outcome(&self, opponent: &Rating, score: f64) -> Outcome {
        Outcome {
            opponent_mu: self.rating_to_mu(opponent.rating),
            opponent_phi: self.deviation_to_phi(opponent.deviation),
            score,
        }
    }

    /// Validate converter parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.factor > 0.0) {
            return Err(crate::error::EstimatorError::ConfigurationError {
                message: "Scale factor must be positive".to_string(),
            }
            .into());
        }

        if !(self.deviation > 0.0) {
            return Err(crate::error::EstimatorError::ConfigurationError {
                message: "Anchor deviation must be positive".to_string(),
            }
            .into());
        }

        if !self.rating.is_finite() {
            return Err(crate::error::EstimatorError::ConfigurationError {
                message: "Anchor rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
