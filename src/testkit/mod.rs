//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests). Provides scripted random sources for forcing wins
//! and losses, plus canonical model and parameter builders.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::config::{ParlayConfig, PoolLimits};
use crate::domain::{PayoutModel, UniformSource, WeightedDistribution};
use crate::engine::SimulationParams;

/// A draw that loses against any leg count (the single-leg win
/// probability is the largest, at 1/3).
const LOSING_DRAW: f64 = 0.999_999;

/// Deterministic uniform source replaying scripted draws.
///
/// Once the script is exhausted, every draw returns `fallback`.
#[derive(Debug, Clone)]
pub struct FixedSource {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl FixedSource {
    /// Replay `draws` in order, then fall back to a losing draw.
    pub fn scripted(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: LOSING_DRAW,
        }
    }

    /// Every draw wins regardless of leg count.
    #[must_use]
    pub fn always_win() -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: 0.0,
        }
    }

    /// Every draw loses regardless of leg count.
    #[must_use]
    pub fn always_lose() -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: LOSING_DRAW,
        }
    }
}

impl UniformSource for FixedSource {
    fn draw(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

/// A payout model with the default (deployed) configuration.
#[must_use]
pub fn default_model() -> PayoutModel {
    PayoutModel::new(ParlayConfig::default(), PoolLimits::default())
        .expect("default configuration is valid")
}

/// Simulation parameters pinning every round to a single-leg bet.
#[must_use]
pub fn single_leg_params(round_count: u64, stake_per_round: Decimal) -> SimulationParams {
    SimulationParams {
        round_count,
        stake_per_round,
        leg_counts: WeightedDistribution::leg_counts(&[1.0])
            .expect("single-leg distribution is valid"),
    }
}
