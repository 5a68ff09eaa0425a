//! Error types for the crate.
//!
//! The model performs no I/O and no external calls, so the only failure
//! mode is a malformed input to a public operation. Every variant of
//! [`InvalidParameter`] carries the offending value; nothing is clamped
//! or silently corrected.

use rust_decimal::Decimal;
use thiserror::Error;

/// An out-of-range or malformed input to a model operation.
///
/// Returned by validating constructors and by the public operations of the
/// payout model, simulation engine, and scenario library. These errors are
/// surfaced immediately to the caller and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidParameter {
    /// Leg count outside the configured `1..=max` range.
    #[error("leg count must be in 1..={max}, got {leg_count}")]
    LegCountOutOfRange {
        /// The leg count that was provided.
        leg_count: u8,
        /// The configured maximum leg count.
        max: u8,
    },

    /// Stakes must be strictly positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The invalid stake that was provided.
        stake: Decimal,
    },

    /// A simulation must run at least one round.
    #[error("round count must be positive")]
    ZeroRoundCount,

    /// A weighted distribution needs a non-empty support.
    #[error("distribution support cannot be empty")]
    EmptyDistribution,

    /// Distribution weights must be finite and non-negative.
    #[error("distribution weight at index {index} is invalid: {weight}")]
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// The weight value that was rejected.
        weight: f64,
    },

    /// At least one distribution weight must be positive.
    #[error("distribution weights sum to zero")]
    ZeroWeightSum,

    /// The per-leg win probability must lie strictly inside (0, 1).
    #[error("leg win probability must be in (0, 1), got {probability}")]
    ProbabilityOutOfRange {
        /// The probability value that was rejected.
        probability: f64,
    },

    /// The parlay multiplier table violates a structural invariant.
    #[error("invalid multiplier table: {reason}")]
    InvalidMultiplierTable {
        /// Which invariant was violated.
        reason: String,
    },

    /// Revenue split fractions violate a structural invariant.
    #[error("invalid revenue split: {reason}")]
    InvalidRevenueSplit {
        /// Which invariant was violated.
        reason: String,
    },

    /// Pool limits violate a structural invariant.
    #[error("invalid pool limits: {reason}")]
    InvalidPoolLimits {
        /// Which invariant was violated.
        reason: String,
    },

    /// A scenario needs at least one trial or winner.
    #[error("scenario count must be positive")]
    ZeroScenarioCount,
}

/// Result type alias using [`InvalidParameter`].
pub type Result<T> = std::result::Result<T, InvalidParameter>;
