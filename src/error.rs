//! Error types for the strength estimator
//!
//! The numerical core has no recoverable errors apart from a runaway volatility
//! search. Everything else here guards configuration and input parsing.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific estimation scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Volatility bracket search exhausted after {steps} steps (tau = {tau})")]
    BracketSearchExhausted { steps: u32, tau: f64 },

    #[error("Volatility solver did not converge after {iterations} iterations (gap = {gap})")]
    SolverDidNotConverge { iterations: u32, gap: f64 },

    #[error("Invalid outcome: {reason}")]
    InvalidOutcome { reason: String },
}
