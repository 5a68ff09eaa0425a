//! Adversarial stress scenarios.
//!
//! Deterministic (or small fixed-draw-count) worst cases layered on the
//! payout model. Each scenario reports the bonus total the protocol
//! reserve would have to fund, directly comparable against the circuit
//! breaker threshold used for run-level classification.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::domain::{PayoutModel, UniformSource};
use crate::error::{InvalidParameter, Result};

/// Aggregate result of one stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name for reporting.
    pub name: &'static str,
    /// Number of bets considered.
    pub trial_count: u64,
    /// Number of winning bets.
    pub win_count: u64,
    pub total_staked: Decimal,
    pub total_paid_out: Decimal,
    /// Reserve bonus summed over winning bets.
    pub bonus_required: Decimal,
}

impl ScenarioOutcome {
    /// What the attacker walks away with.
    #[must_use]
    pub fn attacker_profit(&self) -> Decimal {
        self.total_paid_out - self.total_staked
    }
}

/// Concentrated max-leg attack: `bets` identical wagers at `stake` and the
/// pool's maximum leg count, each independently drawn for win/loss.
///
/// Bonus is summed only over winning trials, so a seeded source makes the
/// outcome reproducible.
pub fn concentrated_max_leg_attack(
    model: &PayoutModel,
    bets: u64,
    stake: Decimal,
    source: &mut dyn UniformSource,
) -> Result<ScenarioOutcome> {
    if bets == 0 {
        return Err(InvalidParameter::ZeroScenarioCount);
    }
    let leg_count = model.limits().max_leg_count;

    let mut win_count = 0u64;
    let mut total_paid_out = Decimal::ZERO;
    let mut bonus_required = Decimal::ZERO;

    for _ in 0..bets {
        let outcome = model.evaluate(leg_count, stake, source)?;
        if outcome.won {
            win_count += 1;
            total_paid_out += outcome.final_payout;
            bonus_required += outcome.reserve_bonus;
        }
    }

    let result = ScenarioOutcome {
        name: "concentrated max-leg attack",
        trial_count: bets,
        win_count,
        total_staked: stake * Decimal::from(bets),
        total_paid_out,
        bonus_required,
    };
    log_outcome(&result);
    Ok(result)
}

/// Simultaneous rare-win scenario: exactly `winners` hypothetical winners
/// at `stake` and `leg_count`, no randomness.
pub fn simultaneous_rare_wins(
    model: &PayoutModel,
    winners: u64,
    stake: Decimal,
    leg_count: u8,
) -> Result<ScenarioOutcome> {
    if winners == 0 {
        return Err(InvalidParameter::ZeroScenarioCount);
    }

    let win = model.winning_outcome(leg_count, stake)?;
    let winners_dec = Decimal::from(winners);

    let result = ScenarioOutcome {
        name: "simultaneous rare wins",
        trial_count: winners,
        win_count: winners,
        total_staked: stake * winners_dec,
        total_paid_out: win.final_payout * winners_dec,
        bonus_required: win.reserve_bonus * winners_dec,
    };
    log_outcome(&result);
    Ok(result)
}

/// Single maximum bet: one wager at the pool's maximum stake and maximum
/// leg count, assuming a win. Reports the bonus a single bet can demand.
pub fn single_max_bet(model: &PayoutModel) -> Result<ScenarioOutcome> {
    let limits = model.limits();
    let win = model.winning_outcome(limits.max_leg_count, limits.max_stake)?;

    let result = ScenarioOutcome {
        name: "single maximum bet",
        trial_count: 1,
        win_count: 1,
        total_staked: win.stake,
        total_paid_out: win.final_payout,
        bonus_required: win.reserve_bonus,
    };
    log_outcome(&result);
    Ok(result)
}

fn log_outcome(outcome: &ScenarioOutcome) {
    info!(
        scenario = outcome.name,
        trials = outcome.trial_count,
        wins = outcome.win_count,
        bonus_required = %outcome.bonus_required,
        "Scenario evaluated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{self, FixedSource};
    use rust_decimal_macros::dec;

    #[test]
    fn max_leg_attack_with_no_wins_needs_no_reserve() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_lose();

        let outcome =
            concentrated_max_leg_attack(&model, 100, dec!(10000), &mut source).unwrap();

        assert_eq!(outcome.win_count, 0);
        assert_eq!(outcome.bonus_required, Decimal::ZERO);
        assert_eq!(outcome.total_staked, dec!(1000000));
        assert_eq!(outcome.attacker_profit(), dec!(-1000000));
    }

    #[test]
    fn one_forced_win_demands_the_full_parlay_bonus() {
        let model = testkit::default_model();
        // 99 losses, then one win: a 10-leg parlay needs a draw below
        // (1/3)^10, so 0.0 forces the win.
        let mut draws = vec![0.999; 99];
        draws.push(0.0);
        let mut source = FixedSource::scripted(draws);

        let outcome =
            concentrated_max_leg_attack(&model, 100, dec!(10000), &mut source).unwrap();

        assert_eq!(outcome.win_count, 1);
        // 10000 * 2^10 * (1.5 - 1.0) = 5,120,000
        assert_eq!(outcome.bonus_required, dec!(5120000));
    }

    #[test]
    fn lucky_streak_is_a_fixed_hypothetical() {
        let model = testkit::default_model();
        let outcome = simultaneous_rare_wins(&model, 10, dec!(1000), 10).unwrap();

        // Per winner: base 1,024,000; final 1,536,000; bonus 512,000.
        assert_eq!(outcome.total_paid_out, dec!(15360000));
        assert_eq!(outcome.bonus_required, dec!(5120000));
    }

    #[test]
    fn single_max_bet_uses_the_pool_limits() {
        let model = testkit::default_model();
        let outcome = single_max_bet(&model).unwrap();

        // 50,000 * 1024 = 51,200,000 base; 76,800,000 final.
        assert_eq!(outcome.total_staked, dec!(50000));
        assert_eq!(outcome.total_paid_out, dec!(76800000));
        assert_eq!(outcome.bonus_required, dec!(25600000));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_lose();

        assert_eq!(
            concentrated_max_leg_attack(&model, 0, dec!(100), &mut source).unwrap_err(),
            InvalidParameter::ZeroScenarioCount
        );
        assert_eq!(
            simultaneous_rare_wins(&model, 0, dec!(100), 5).unwrap_err(),
            InvalidParameter::ZeroScenarioCount
        );
    }
}
