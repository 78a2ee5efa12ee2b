//! Outcome weighting
//!
//! Turns a raw [`Outcome`] into [`Evidence`]: the opponent-reliability weight
//! `g` and the expected score `e` computed against the acting player's mu.

use crate::types::Outcome;
use std::f64::consts::PI;

/// Weight of an opponent with uncertainty `phi`. Decreases as `phi` grows.
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score of a player with strength `mu` against an opponent of
/// strength `opponent_mu`, given the opponent's weight `g`.
///
/// Kept strictly inside (0, 1): a saturated expectation would carry no
/// information and leave the estimated variance infinite.
pub fn expected_score(g: f64, mu: f64, opponent_mu: f64) -> f64 {
    let e = 1.0 / (1.0 + (-g * (mu - opponent_mu)).exp());
    e.clamp(f64::EPSILON, 1.0 - f64::EPSILON)
}

/// Weight and expected score against an opponent, as `(g, e)`.
///
/// Pure; callers may cache the result as long as `mu` does not change.
pub fn weigh(mu: f64, opponent_mu: f64, opponent_phi: f64) -> (f64, f64) {
    let g = g(opponent_phi);
    (g, expected_score(g, mu, opponent_mu))
}

/// An outcome weighted against a fixed player mu.
///
/// Fields are private so the opponent data cannot drift away from the
/// weighting that was derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    g: f64,
    e: f64,
    score: f64,
}

impl Evidence {
    /// Weigh `outcome` for a player currently at `mu`
    pub fn weigh(mu: f64, outcome: &Outcome) -> Self {
        let (g, e) = weigh(mu, outcome.opponent_mu, outcome.opponent_phi);
        Self {
            g,
            e,
            score: outcome.score,
        }
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}
