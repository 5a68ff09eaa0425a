//! Per-trial wager outcome.

use rust_decimal::Decimal;
use serde::Serialize;

/// The settled result of a single parlay bet.
///
/// Produced once per trial by the payout model and folded into the
/// simulation accumulator immediately; outcomes are never retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WagerOutcome {
    /// Whether every leg of the parlay hit.
    pub won: bool,
    /// The amount wagered.
    pub stake: Decimal,
    /// Pool-funded payout before the parlay multiplier (zero on a loss).
    pub base_payout: Decimal,
    /// Payout after the parlay multiplier (zero on a loss).
    pub final_payout: Decimal,
    /// The portion of `final_payout` funded by protocol reserve rather
    /// than the losing pool: `base_payout * (multiplier - 1)`.
    pub reserve_bonus: Decimal,
}

impl WagerOutcome {
    /// A losing bet: the stake is fully forfeited to the pool.
    #[must_use]
    pub fn lost(stake: Decimal) -> Self {
        Self {
            won: false,
            stake,
            base_payout: Decimal::ZERO,
            final_payout: Decimal::ZERO,
            reserve_bonus: Decimal::ZERO,
        }
    }

    /// The bettor's profit on this wager (negative on a loss).
    #[must_use]
    pub fn profit(&self) -> Decimal {
        self.final_payout - self.stake
    }
}
