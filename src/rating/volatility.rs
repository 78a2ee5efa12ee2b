//! Volatility solver
//!
//! Finds the new volatility by solving `f(x) = 0` for `x = ln(sigma'^2)` with
//! the Illinois variant of regula falsi, as described in step 5 of Glickman's
//! Glicko-2 paper. The bracket search and the refinement are both capped so a
//! pathological configuration surfaces as an error instead of a hang.

use crate::error::EstimatorError;
use crate::rating::aggregation::Aggregate;
use tracing::{trace, warn};

/// Default cap on the downward bracket walk
pub const DEFAULT_MAX_BRACKET_STEPS: u32 = 1_000;
/// Default cap on Illinois refinement iterations
pub const DEFAULT_MAX_ITERATIONS: u32 = 1_000;

/// Illinois-method root finder for the volatility equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySolver {
    /// Volatility change constraint
    pub tau: f64,
    /// Convergence tolerance on the bracket width
    pub epsilon: f64,
    pub max_bracket_steps: u32,
    pub max_iterations: u32,
}

/// Parameters of `f` that stay fixed for one solve
struct Equation {
    delta_sq: f64,
    phi_sq: f64,
    v: f64,
    a: f64,
    tau_sq: f64,
}

impl Equation {
    fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        let denom = self.phi_sq + self.v + ex;
        ex * (self.delta_sq - denom) / (2.0 * denom * denom) - (x - self.a) / self.tau_sq
    }
}

impl VolatilitySolver {
    pub fn new(tau: f64, epsilon: f64) -> Self {
        Self {
            tau,
            epsilon,
            max_bracket_steps: DEFAULT_MAX_BRACKET_STEPS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Solve for the new volatility of a player with uncertainty `phi` and
    /// volatility `sigma`, given the aggregated evidence of this update.
    pub fn solve(
        &self,
        phi: f64,
        sigma: f64,
        aggregate: &Aggregate,
    ) -> crate::error::Result<f64> {
        let eq = Equation {
            delta_sq: aggregate.delta * aggregate.delta,
            phi_sq: phi * phi,
            v: aggregate.v,
            a: (sigma * sigma).ln(),
            tau_sq: self.tau * self.tau,
        };

        let mut a = eq.a;
        let mut b = self.upper_bracket(&eq)?;
        let mut fa = eq.f(a);
        let mut fb = eq.f(b);

        let mut iterations = 0;
        while (b - a).abs() > self.epsilon {
            if iterations >= self.max_iterations {
                warn!(
                    "Volatility solver stopped after {} iterations, bracket [{}, {}]",
                    iterations, a, b
                );
                return Err(EstimatorError::SolverDidNotConverge {
                    iterations,
                    gap: (b - a).abs(),
                }
                .into());
            }

            let c = a + (a - b) * fa / (fb - fa);
            let fc = eq.f(c);

            if fc * fb <= 0.0 {
                a = b;
                fa = fb;
            } else {
                // Illinois step: keep the stale endpoint but halve its weight.
                fa /= 2.0;
            }

            b = c;
            fb = fc;
            iterations += 1;
            trace!(iterations, a, b, "volatility solver step");
        }

        Ok((a / 2.0).exp())
    }

    fn upper_bracket(&self, eq: &Equation) -> crate::error::Result<f64> {
        if eq.delta_sq > eq.phi_sq + eq.v {
            return Ok((eq.delta_sq - eq.phi_sq - eq.v).ln());
        }

        for k in 1..=self.max_bracket_steps {
            let b = eq.a - f64::from(k) * self.tau;
            if eq.f(b) > 0.0 {
                return Ok(b);
            }
        }

        warn!(
            "Volatility bracket search exhausted after {} steps with tau {}",
            self.max_bracket_steps, self.tau
        );
        Err(EstimatorError::BracketSearchExhausted {
            steps: self.max_bracket_steps,
            tau: self.tau,
        }
        .into())
    }
}
