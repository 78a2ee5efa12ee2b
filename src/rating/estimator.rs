//! Strength estimator
//!
//! Updates a caller-owned [`Strength`] in place after each game, or after a
//! batch of games, without requiring fixed rating periods. Elapsed time is
//! passed in as a fraction of one nominal period.
//!
//! Both entry points share the same pipeline: weigh outcomes, aggregate the
//! evidence, solve for the new volatility, then propagate and clamp.

use crate::config::rating::{Bounds, EstimatorConfig};
use crate::rating::aggregation::{aggregate, Aggregate};
use crate::rating::volatility::VolatilitySolver;
use crate::rating::weighting::Evidence;
use crate::types::{Outcome, Strength};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Performs calculations of a player's strength
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    solver: VolatilitySolver,
}

impl Estimator {
    /// Create a new estimator, validating the configuration once
    pub fn new(config: EstimatorConfig) -> crate::error::Result<Self> {
        config.validate()?;

        let solver = VolatilitySolver {
            tau: config.tau,
            epsilon: config.epsilon,
            max_bracket_steps: config.max_bracket_steps,
            max_iterations: config.max_iterations,
        };

        Ok(Self { config, solver })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    /// Update `strength` with the result of a single game.
    ///
    /// Calling this once per game gives the sequential mode: every game is
    /// weighted against the strength left by the previous one.
    pub fn estimate(
        &self,
        strength: &mut Strength,
        outcome: &Outcome,
        elapsed_fraction: f64,
    ) -> crate::error::Result<()> {
        let evidence = [Evidence::weigh(strength.mu, outcome)];
        self.update(strength, &evidence, elapsed_fraction)
    }

    /// Update `strength` with several games at once.
    ///
    /// All outcomes are weighted against the same pre-update strength and
    /// folded into a single update. An empty batch only grows uncertainty.
    pub fn estimate_batch(
        &self,
        strength: &mut Strength,
        outcomes: &[Outcome],
        elapsed_fraction: f64,
    ) -> crate::error::Result<()> {
        let evidence: Vec<Evidence> = outcomes
            .iter()
            .map(|outcome| Evidence::weigh(strength.mu, outcome))
            .collect();
        self.update(strength, &evidence, elapsed_fraction)
    }

    /// Grow uncertainty for a stretch of time without games.
    ///
    /// `mu` and `sigma` are left as they are (up to clamping).
    pub fn decay(&self, strength: &mut Strength, elapsed_fraction: f64) {
        strength.phi = pre_period_phi(strength.phi, strength.sigma, elapsed_fraction);
        self.clamp(strength);
    }

    /// Saturate all three components into the configured bounds
    pub fn clamp(&self, strength: &mut Strength) {
        let b = &self.config.bounds;
        let clamped = Strength {
            mu: strength.mu.clamp(b.min_mu, b.max_mu),
            phi: strength.phi.clamp(b.min_phi, b.max_phi),
            sigma: strength.sigma.clamp(b.min_sigma, b.max_sigma),
        };

        if clamped != *strength {
            debug!(?strength, ?clamped, "strength clamped to bounds");
        }
        *strength = clamped;
    }

    /// Fraction of the nominal rating period between two instants.
    ///
    /// Returns 0 if `now` precedes `last_update`.
    pub fn elapsed_fraction(&self, last_update: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = (now - last_update).num_milliseconds().max(0);
        elapsed_ms as f64 / (self.config.period_seconds as f64 * 1000.0)
    }

    fn update(
        &self,
        strength: &mut Strength,
        evidence: &[Evidence],
        elapsed_fraction: f64,
    ) -> crate::error::Result<()> {
        let Some(agg) = aggregate(evidence) else {
            self.decay(strength, elapsed_fraction);
            return Ok(());
        };

        let sigma = self.solver.solve(strength.phi, strength.sigma, &agg)?;
        let (mu, phi) = propagate(strength, &agg, sigma, elapsed_fraction);

        debug!(
            games = evidence.len(),
            v = agg.v,
            delta = agg.delta,
            mu,
            phi,
            sigma,
            "strength updated"
        );

        *strength = Strength { mu, phi, sigma };
        self.clamp(strength);
        Ok(())
    }
}

/// Uncertainty after `elapsed_fraction` of a period with volatility `sigma`.
/// A negative fraction counts as no elapsed time.
fn pre_period_phi(phi: f64, sigma: f64, elapsed_fraction: f64) -> f64 {
    (phi * phi + sigma * sigma * elapsed_fraction.max(0.0)).sqrt()
}

/// New `(mu, phi)` given the aggregated evidence and the solved volatility
fn propagate(
    strength: &Strength,
    agg: &Aggregate,
    sigma: f64,
    elapsed_fraction: f64,
) -> (f64, f64) {
    let phi_star = pre_period_phi(strength.phi, sigma, elapsed_fraction);
    let phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / agg.v).sqrt();
    let mu = strength.mu + phi * phi * agg.improvement;
    (mu, phi)
}
