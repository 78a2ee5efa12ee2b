//! Common types used throughout the strength estimator
//!
//! Values named `mu`, `phi` and `sigma` live on the internal Glicko-2 scale.
//! [`Rating`] is the human-facing counterpart used at the edges.

use serde::{Deserialize, Serialize};

/// A player's strength estimate on the internal scale.
///
/// Owned by the caller and mutated in place by the estimator, once per update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    /// Strength estimate
    pub mu: f64,
    /// Uncertainty (one standard deviation around `mu`)
    pub phi: f64,
    /// Volatility, the expected fluctuation of `mu` over time
    pub sigma: f64,
}

impl Strength {
    pub fn new(mu: f64, phi: f64, sigma: f64) -> Self {
        Self { mu, phi, sigma }
    }
}

/// Result of a single game from the acting player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Score awarded for this result
    pub fn score(self) -> f64 {
        match self {
            MatchResult::Win => 1.0,
            MatchResult::Draw => 0.5,
            MatchResult::Loss => 0.0,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Win => write!(f, "Win"),
            MatchResult::Draw => write!(f, "Draw"),
            MatchResult::Loss => write!(f, "Loss"),
        }
    }
}

/// A single game against an opponent, already converted to the internal scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub opponent_mu: f64,
    pub opponent_phi: f64,
    /// 0 for a loss, 0.5 for a draw, 1 for a win. Fractional results in
    /// between are accepted as-is.
    pub score: f64,
}

impl Outcome {
    pub fn new(opponent_mu: f64, opponent_phi: f64, score: f64) -> Self {
        Self {
            opponent_mu,
            opponent_phi,
            score,
        }
    }

    /// Create an outcome from a discrete game result
    pub fn from_result(opponent_mu: f64, opponent_phi: f64, result: MatchResult) -> Self {
        Self::new(opponent_mu, opponent_phi, result.score())
    }
}

/// Rating information on the human-facing ("Elo-style") scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            rating: crate::rating::scale::DEFAULT_RATING,
            deviation: crate::rating::scale::DEFAULT_DEVIATION,
            volatility: crate::rating::scale::DEFAULT_VOLATILITY,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} ± {:.2} (volatility {:.5})",
            self.rating, self.deviation, self.volatility
        )
    }
}
