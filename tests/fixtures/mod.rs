//! Shared fixtures for integration testing
//!
//! The reference scenario is the worked example from Glickman's Glicko-2
//! paper: a 1500/200 player facing three opponents in one rating period.

#![allow(dead_code)]

use strength_estimator::config::{Bounds, EstimatorConfig};
use strength_estimator::rating::{Converter, Estimator};
use strength_estimator::types::{Outcome, Rating, Strength};

/// Estimator with the bounds used by the reference deployment
pub fn reference_estimator(tau: f64) -> Estimator {
    Estimator::new(EstimatorConfig {
        tau,
        ..EstimatorConfig::default()
    })
    .unwrap()
}

/// Estimator whose bounds never bind
pub fn unbounded_estimator(tau: f64) -> Estimator {
    Estimator::new(EstimatorConfig {
        bounds: Bounds::unbounded(),
        tau,
        ..EstimatorConfig::default()
    })
    .unwrap()
}

pub fn reference_player() -> Rating {
    Rating {
        rating: 1500.0,
        deviation: 200.0,
        volatility: 0.06,
    }
}

pub fn reference_start() -> Strength {
    Converter::default().to_strength(&reference_player())
}

/// Opponents as `(rating, deviation, score)`
pub const REFERENCE_GAMES: [(f64, f64, f64); 3] =
    [(1400.0, 30.0, 1.0), (1550.0, 100.0, 0.0), (1700.0, 300.0, 0.0)];

pub fn reference_outcomes() -> Vec<Outcome> {
    let converter = Converter::default();
    REFERENCE_GAMES
        .iter()
        .map(|&(rating, deviation, score)| {
            Outcome::new(
                converter.rating_to_mu(rating),
                converter.deviation_to_phi(deviation),
                score,
            )
        })
        .collect()
}
