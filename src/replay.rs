//! Match log replay
//!
//! Drives the estimator over a recorded list of games, either one update per
//! game or a single batched update, and reports the resulting ratings on the
//! human-facing scale.

use crate::error::EstimatorError;
use crate::rating::{Converter, Estimator};
use crate::types::{Outcome, Rating};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A player's starting rating and the games to replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    pub player: Rating,
    pub games: Vec<Game>,
}

/// One game against a rated opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub opponent: Rating,
    pub score: f64,
    /// Fraction of a rating period since the previous update
    #[serde(default = "default_elapsed_fraction")]
    pub elapsed_fraction: f64,
}

fn default_elapsed_fraction() -> f64 {
    1.0
}

/// How games are folded into updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayMode {
    /// One update per game
    Sequential,
    /// One update for all games
    Batch,
}

/// Rating after one update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Number of games folded into this update
    pub games: usize,
    pub rating: Rating,
}

/// Result of replaying a match log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub mode: ReplayMode,
    pub initial: Rating,
    pub final_rating: Rating,
    pub history: Vec<ReplayStep>,
}

impl MatchLog {
    /// Parse a match log from JSON
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let log: Self = serde_json::from_str(json)?;
        log.validate()?;
        Ok(log)
    }

    /// Reject games the estimator cannot interpret
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_rating("player", &self.player)?;

        for (index, game) in self.games.iter().enumerate() {
            if !(0.0..=1.0).contains(&game.score) {
                return Err(EstimatorError::InvalidOutcome {
                    reason: format!("game {}: score {} is outside [0, 1]", index, game.score),
                }
                .into());
            }
            validate_elapsed_fraction(&format!("game {}", index), game.elapsed_fraction)?;
            validate_rating(&format!("game {} opponent", index), &game.opponent)?;
        }

        Ok(())
    }
}

fn validate_elapsed_fraction(what: &str, elapsed_fraction: f64) -> crate::error::Result<()> {
    if !elapsed_fraction.is_finite() || elapsed_fraction < 0.0 {
        return Err(EstimatorError::InvalidOutcome {
            reason: format!(
                "{}: elapsed fraction {} must be finite and non-negative",
                what, elapsed_fraction
            ),
        }
        .into());
    }
    Ok(())
}

fn validate_rating(what: &str, rating: &Rating) -> crate::error::Result<()> {
    if !rating.rating.is_finite() || !rating.deviation.is_finite() || rating.deviation < 0.0 {
        return Err(EstimatorError::InvalidOutcome {
            reason: format!("{}: rating must be finite with a non-negative deviation", what),
        }
        .into());
    }
    if !(rating.volatility > 0.0) || !rating.volatility.is_finite() {
        return Err(EstimatorError::InvalidOutcome {
            reason: format!("{}: volatility must be positive", what),
        }
        .into());
    }
    Ok(())
}

/// Replay every game as its own update, in order
pub fn replay_sequential(
    estimator: &Estimator,
    converter: &Converter,
    log: &MatchLog,
) -> crate::error::Result<ReplayReport> {
    log.validate()?;

    let mut strength = converter.to_strength(&log.player);
    let mut history = Vec::with_capacity(log.games.len());

    for game in &log.games {
        let outcome = converter.outcome(&game.opponent, game.score);
        estimator.estimate(&mut strength, &outcome, game.elapsed_fraction)?;

        let rating = converter.to_rating(&strength);
        debug!("Game vs {:.0}: {} -> {}", game.opponent.rating, game.score, rating);
        history.push(ReplayStep { games: 1, rating });
    }

    let final_rating = converter.to_rating(&strength);
    info!(
        "Replayed {} games sequentially: {} -> {}",
        log.games.len(),
        log.player,
        final_rating
    );

    Ok(ReplayReport {
        mode: ReplayMode::Sequential,
        initial: log.player,
        final_rating,
        history,
    })
}

/// Replay all games as one batched update covering `elapsed_fraction` of a
/// rating period. Per-game elapsed fractions are ignored.
pub fn replay_batch(
    estimator: &Estimator,
    converter: &Converter,
    log: &MatchLog,
    elapsed_fraction: f64,
) -> crate::error::Result<ReplayReport> {
    validate_elapsed_fraction("batch", elapsed_fraction)?;
    log.validate()?;

    let mut strength = converter.to_strength(&log.player);
    let outcomes: Vec<Outcome> = log
        .games
        .iter()
        .map(|game| converter.outcome(&game.opponent, game.score))
        .collect();

    estimator.estimate_batch(&mut strength, &outcomes, elapsed_fraction)?;

    let final_rating = converter.to_rating(&strength);
    info!(
        "Replayed {} games as one batch: {} -> {}",
        log.games.len(),
        log.player,
        final_rating
    );

    Ok(ReplayReport {
        mode: ReplayMode::Batch,
        initial: log.player,
        final_rating,
        history: vec![ReplayStep {
            games: outcomes.len(),
            rating: final_rating,
        }],
    })
}
