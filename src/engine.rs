//! Simulation engine.
//!
//! Drives independent trials through the payout model using a weighted
//! leg-count mix, folds each outcome into a run-local accumulator, and
//! derives the per-stakeholder P&L from the totals. Each run owns its
//! accumulator and random source, so concurrent runs never share state.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::config::{RevenueSplitConfig, SimulationConfig};
use crate::domain::{PayoutModel, UniformSource, WagerOutcome, WeightedDistribution};
use crate::error::{InvalidParameter, Result};

/// Parameters of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    /// Number of independent trials.
    pub round_count: u64,
    /// Stake placed on every trial.
    pub stake_per_round: Decimal,
    /// Weighted mix of parlay leg counts.
    pub leg_counts: WeightedDistribution<u8>,
}

/// Running totals across the trials of a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationAccumulator {
    pub total_staked: Decimal,
    pub total_paid_out: Decimal,
    pub total_reserve_bonus_paid: Decimal,
    pub total_losing_pool_revenue: Decimal,
    pub win_count: u64,
    pub round_count: u64,
}

impl SimulationAccumulator {
    /// Fold one settled wager into the totals.
    pub fn record(&mut self, outcome: &WagerOutcome) {
        self.round_count += 1;
        self.total_staked += outcome.stake;
        if outcome.won {
            self.win_count += 1;
            self.total_paid_out += outcome.final_payout;
            self.total_reserve_bonus_paid += outcome.reserve_bonus;
        } else {
            self.total_losing_pool_revenue += outcome.stake;
        }
    }

    /// Empirical win rate over the recorded rounds.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        if self.round_count == 0 {
            None
        } else {
            Some(self.win_count as f64 / self.round_count as f64)
        }
    }

    /// Average payout per winning round.
    #[must_use]
    pub fn average_winning_payout(&self) -> Decimal {
        if self.win_count == 0 {
            Decimal::ZERO
        } else {
            self.total_paid_out / Decimal::from(self.win_count)
        }
    }
}

/// Per-stakeholder P&L derived from a run's totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlBreakdown {
    /// Losing-pool proceeds minus the non-bonus portion of payouts.
    pub net_revenue: Decimal,
    pub protocol_revenue_share: Decimal,
    pub lp_revenue_share: Decimal,
    pub season_revenue_share: Decimal,
    /// Protocol earmark minus the bonuses it actually paid from reserve.
    pub protocol_pnl: Decimal,
    /// LPs take their revenue share and bear no direct bonus cost.
    pub lp_pnl: Decimal,
    /// Bettor-side P&L: payouts minus stakes.
    pub user_pnl: Decimal,
}

impl PnlBreakdown {
    /// Derive the split from a run's totals.
    ///
    /// The losing pool funds base payouts, so net revenue excludes the
    /// bonus portion (funded separately from reserve). The three sub-shares
    /// are each applied independently to net revenue; they overlap by
    /// design and must not be normalized into a clean partition.
    #[must_use]
    pub fn derive(accumulator: &SimulationAccumulator, splits: &RevenueSplitConfig) -> Self {
        let base_payouts =
            accumulator.total_paid_out - accumulator.total_reserve_bonus_paid;
        let net_revenue = accumulator.total_losing_pool_revenue - base_payouts;

        let protocol_revenue_share = net_revenue * splits.protocol_share_of_revenue;
        let lp_revenue_share = net_revenue * splits.lp_share_of_protocol;
        let season_revenue_share = net_revenue * splits.season_share_of_revenue;

        Self {
            net_revenue,
            protocol_revenue_share,
            lp_revenue_share,
            season_revenue_share,
            protocol_pnl: protocol_revenue_share - accumulator.total_reserve_bonus_paid,
            lp_pnl: lp_revenue_share,
            user_pnl: accumulator.total_paid_out - accumulator.total_staked,
        }
    }
}

/// The result of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub accumulator: SimulationAccumulator,
    pub pnl: PnlBreakdown,
}

/// Runs Monte Carlo trials against a fixed pool configuration.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    model: PayoutModel,
    splits: RevenueSplitConfig,
}

impl SimulationEngine {
    /// Build an engine, validating the whole configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.splits.validate()?;
        let model = PayoutModel::new(config.parlay, config.limits)?;
        Ok(Self {
            model,
            splits: config.splits,
        })
    }

    /// The payout model this engine settles bets with.
    #[must_use]
    pub fn model(&self) -> &PayoutModel {
        &self.model
    }

    /// Run `params.round_count` independent trials.
    ///
    /// A single deterministic pass given a seeded `source`; no retries.
    pub fn run(
        &self,
        params: &SimulationParams,
        source: &mut dyn UniformSource,
    ) -> Result<SimulationReport> {
        if params.round_count == 0 {
            return Err(InvalidParameter::ZeroRoundCount);
        }

        let mut accumulator = SimulationAccumulator::default();
        for _ in 0..params.round_count {
            let leg_count = params.leg_counts.sample(source);
            let outcome = self
                .model
                .evaluate(leg_count, params.stake_per_round, source)?;
            accumulator.record(&outcome);
        }

        let pnl = PnlBreakdown::derive(&accumulator, &self.splits);
        info!(
            rounds = accumulator.round_count,
            wins = accumulator.win_count,
            total_staked = %accumulator.total_staked,
            total_paid_out = %accumulator.total_paid_out,
            bonus_paid = %accumulator.total_reserve_bonus_paid,
            net_revenue = %pnl.net_revenue,
            "Simulation run complete"
        );

        Ok(SimulationReport { accumulator, pnl })
    }
}
