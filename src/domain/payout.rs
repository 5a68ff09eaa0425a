//! Parlay payout model.
//!
//! Pure settlement math for a single bet: win probability, pool-funded base
//! payout, parlay-adjusted final payout, and the reserve bonus the protocol
//! must fund on top of the pool. The base payout compounds ~2.0x per leg,
//! an approximation of the pool odds after the winner/loser split rather
//! than exact pool-clearing math.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{ParlayConfig, PoolLimits};
use crate::domain::outcome::WagerOutcome;
use crate::domain::random::UniformSource;
use crate::error::{InvalidParameter, Result};

/// Settles individual parlay bets against a fixed configuration.
#[derive(Debug, Clone)]
pub struct PayoutModel {
    parlay: ParlayConfig,
    limits: PoolLimits,
}

impl PayoutModel {
    /// Build a payout model, validating both configuration sections.
    pub fn new(parlay: ParlayConfig, limits: PoolLimits) -> Result<Self> {
        parlay.validate()?;
        limits.validate()?;
        Ok(Self { parlay, limits })
    }

    /// The pool limits this model enforces.
    #[must_use]
    pub fn limits(&self) -> &PoolLimits {
        &self.limits
    }

    /// Probability that a `leg_count`-leg parlay wins: every leg is an
    /// independent draw at the per-leg base rate.
    pub fn win_probability(&self, leg_count: u8) -> Result<f64> {
        self.check_leg_count(leg_count)?;
        Ok(self.parlay.leg_win_probability.powi(i32::from(leg_count)))
    }

    /// Settle one bet using the next uniform draw from `source`.
    ///
    /// Pure given the draw: identical inputs and an identical draw yield an
    /// identical outcome. Invalid leg counts or stakes fail fast and are
    /// never clamped.
    pub fn evaluate(
        &self,
        leg_count: u8,
        stake: Decimal,
        source: &mut dyn UniformSource,
    ) -> Result<WagerOutcome> {
        let probability = self.win_probability(leg_count)?;
        self.check_stake(stake)?;

        if source.draw() < probability {
            self.winning_outcome(leg_count, stake)
        } else {
            Ok(WagerOutcome::lost(stake))
        }
    }

    /// The outcome of a forced win, with no draw.
    ///
    /// Used by the deterministic stress scenarios and by settlement once a
    /// win has already been drawn.
    pub fn winning_outcome(&self, leg_count: u8, stake: Decimal) -> Result<WagerOutcome> {
        self.check_leg_count(leg_count)?;
        self.check_stake(stake)?;

        // ~2.0x pool odds per leg.
        let base_multiplier = (0..leg_count).fold(Decimal::ONE, |acc, _| acc * dec!(2));
        let base_payout = stake * base_multiplier;

        let multiplier = self.parlay.multiplier(leg_count);
        let final_payout = base_payout * multiplier;
        // The pool only funds base_payout; the rest comes from reserve.
        let reserve_bonus = base_payout * (multiplier - Decimal::ONE);

        Ok(WagerOutcome {
            won: true,
            stake,
            base_payout,
            final_payout,
            reserve_bonus,
        })
    }

    fn check_leg_count(&self, leg_count: u8) -> Result<()> {
        if leg_count == 0 || leg_count > self.limits.max_leg_count {
            return Err(InvalidParameter::LegCountOutOfRange {
                leg_count,
                max: self.limits.max_leg_count,
            });
        }
        Ok(())
    }

    fn check_stake(&self, stake: Decimal) -> Result<()> {
        if stake <= Decimal::ZERO {
            return Err(InvalidParameter::NonPositiveStake { stake });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{self, FixedSource};

    #[test]
    fn forced_loss_zeroes_every_payout_field() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_lose();

        for leg_count in 1..=10u8 {
            let outcome = model.evaluate(leg_count, dec!(100), &mut source).unwrap();
            assert!(!outcome.won);
            assert_eq!(outcome.base_payout, Decimal::ZERO);
            assert_eq!(outcome.final_payout, Decimal::ZERO);
            assert_eq!(outcome.reserve_bonus, Decimal::ZERO);
            assert_eq!(outcome.profit(), dec!(-100));
        }
    }

    #[test]
    fn forced_win_matches_table_math_exactly() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_win();

        for leg_count in 1..=10u8 {
            let stake = dec!(250);
            let outcome = model.evaluate(leg_count, stake, &mut source).unwrap();
            let base = stake * Decimal::from(1u64 << u32::from(leg_count));
            let multiplier = ParlayConfig::default().multiplier(leg_count);

            assert!(outcome.won);
            assert_eq!(outcome.base_payout, base);
            assert_eq!(outcome.final_payout, base * multiplier);
            assert_eq!(outcome.reserve_bonus, outcome.final_payout - outcome.base_payout);
        }
    }

    #[test]
    fn single_leg_win_carries_no_reserve_bonus() {
        let model = testkit::default_model();
        let outcome = model.winning_outcome(1, dec!(100)).unwrap();
        assert_eq!(outcome.final_payout, dec!(200));
        assert_eq!(outcome.reserve_bonus, Decimal::ZERO);
    }

    #[test]
    fn win_probability_compounds_per_leg() {
        let model = testkit::default_model();
        let single = model.win_probability(1).unwrap();
        assert!((single - 1.0 / 3.0).abs() < 1e-12);

        let ten = model.win_probability(10).unwrap();
        assert!((ten - (1.0_f64 / 3.0).powi(10)).abs() < 1e-15);
    }

    #[test]
    fn zero_and_oversized_leg_counts_fail_fast() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_win();

        assert!(matches!(
            model.evaluate(0, dec!(100), &mut source),
            Err(InvalidParameter::LegCountOutOfRange { leg_count: 0, .. })
        ));
        assert!(matches!(
            model.evaluate(11, dec!(100), &mut source),
            Err(InvalidParameter::LegCountOutOfRange { leg_count: 11, .. })
        ));
    }

    #[test]
    fn non_positive_stakes_fail_fast() {
        let model = testkit::default_model();
        let mut source = FixedSource::always_win();

        for stake in [Decimal::ZERO, dec!(-5)] {
            assert!(matches!(
                model.evaluate(3, stake, &mut source),
                Err(InvalidParameter::NonPositiveStake { .. })
            ));
        }
    }

    #[test]
    fn identical_draws_yield_identical_outcomes() {
        let model = testkit::default_model();

        let mut first = FixedSource::scripted([0.2]);
        let mut second = FixedSource::scripted([0.2]);
        let a = model.evaluate(1, dec!(100), &mut first).unwrap();
        let b = model.evaluate(1, dec!(100), &mut second).unwrap();

        assert_eq!(a, b);
    }
}
