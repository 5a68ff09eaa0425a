//! Immutable, validated configuration values.
//!
//! Every knob of the model lives here: the parlay multiplier table, the
//! revenue split fractions, and the pool limits (including the circuit
//! breaker threshold). Configurations are plain values constructed once
//! and passed into the engine and classifier, so independent runs never
//! share mutable state. Defaults match the deployed pool parameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{InvalidParameter, Result};

/// Per-leg win rate of the deployed pool: each leg is an independent
/// three-way outcome with one winning side.
pub const DEFAULT_LEG_WIN_PROBABILITY: f64 = 1.0 / 3.0;

/// Parlay payout parameters: per-leg win probability and the multiplier
/// table indexed by leg count.
///
/// `multipliers[0]` is the single-leg multiplier and must be exactly 1.0
/// (no parlay bonus for single-leg bets). The table must be monotonically
/// non-decreasing; leg counts beyond the table fall back to its last entry.
#[derive(Debug, Clone, Serialize)]
pub struct ParlayConfig {
    /// Probability that a single leg wins, in (0, 1).
    pub leg_win_probability: f64,
    /// Multiplier for `i + 1` legs at index `i`.
    pub multipliers: Vec<Decimal>,
}

impl ParlayConfig {
    /// Build a validated parlay configuration.
    pub fn new(leg_win_probability: f64, multipliers: Vec<Decimal>) -> Result<Self> {
        let config = Self {
            leg_win_probability,
            multipliers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the structural invariants of the table and probability.
    pub fn validate(&self) -> Result<()> {
        if !(self.leg_win_probability > 0.0 && self.leg_win_probability < 1.0) {
            return Err(InvalidParameter::ProbabilityOutOfRange {
                probability: self.leg_win_probability,
            });
        }
        let Some(first) = self.multipliers.first() else {
            return Err(InvalidParameter::InvalidMultiplierTable {
                reason: "table cannot be empty".into(),
            });
        };
        if *first != Decimal::ONE {
            return Err(InvalidParameter::InvalidMultiplierTable {
                reason: format!("single-leg multiplier must be 1.0, got {first}"),
            });
        }
        for pair in self.multipliers.windows(2) {
            if pair[1] < pair[0] {
                return Err(InvalidParameter::InvalidMultiplierTable {
                    reason: format!("table must be non-decreasing, {} follows {}", pair[1], pair[0]),
                });
            }
        }
        Ok(())
    }

    /// Multiplier for the given leg count, falling back to the last table
    /// entry when `leg_count` exceeds the table domain.
    ///
    /// Callers validate `leg_count >= 1` before lookup; the table is
    /// guaranteed non-empty by [`ParlayConfig::validate`].
    #[must_use]
    pub fn multiplier(&self, leg_count: u8) -> Decimal {
        self.multipliers
            .get(usize::from(leg_count).saturating_sub(1))
            .or_else(|| self.multipliers.last())
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

impl Default for ParlayConfig {
    /// Deployed table: linear ramp from 1.15x at 2 legs to 1.5x at 10 legs.
    fn default() -> Self {
        Self {
            leg_win_probability: DEFAULT_LEG_WIN_PROBABILITY,
            multipliers: vec![
                dec!(1.0),
                dec!(1.15),
                dec!(1.194),
                dec!(1.238),
                dec!(1.281),
                dec!(1.325),
                dec!(1.369),
                dec!(1.413),
                dec!(1.456),
                dec!(1.5),
            ],
        }
    }
}

/// Revenue split fractions.
///
/// `winner_share` and `protocol_cut` partition the losing pool and must sum
/// to ~1. The remaining fractions are each applied independently to *net
/// revenue* (losing-pool proceeds minus non-bonus payouts); they partition
/// net revenue into protocol, LP, and season buckets but are not required
/// to sum to 1 against each other. That overlap is a deliberate property of
/// the deployed pool and is preserved here because the risk analysis is
/// specifically about its consequences.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueSplitConfig {
    /// Fraction of the losing pool distributed to winners.
    pub winner_share: Decimal,
    /// Fraction of the losing pool retained by the protocol side.
    pub protocol_cut: Decimal,
    /// LP fraction of net revenue.
    pub lp_share_of_protocol: Decimal,
    /// Season pool fraction of net revenue.
    pub season_share_of_revenue: Decimal,
    /// Protocol treasury fraction of net revenue.
    pub protocol_share_of_revenue: Decimal,
}

impl RevenueSplitConfig {
    /// Tolerance for the winner/protocol partition check.
    const PARTITION_TOLERANCE: Decimal = dec!(0.0001);

    /// Check the structural invariants of the split fractions.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("winner_share", self.winner_share),
            ("protocol_cut", self.protocol_cut),
            ("lp_share_of_protocol", self.lp_share_of_protocol),
            ("season_share_of_revenue", self.season_share_of_revenue),
            ("protocol_share_of_revenue", self.protocol_share_of_revenue),
        ];
        for (name, fraction) in fractions {
            if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                return Err(InvalidParameter::InvalidRevenueSplit {
                    reason: format!("{name} must be in [0, 1], got {fraction}"),
                });
            }
        }
        let pool_total = self.winner_share + self.protocol_cut;
        if (pool_total - Decimal::ONE).abs() > Self::PARTITION_TOLERANCE {
            return Err(InvalidParameter::InvalidRevenueSplit {
                reason: format!("winner_share + protocol_cut must be ~1, got {pool_total}"),
            });
        }
        Ok(())
    }
}

impl Default for RevenueSplitConfig {
    /// Deployed split: 55% of the losing pool to winners, 45% retained;
    /// net revenue earmarked 45% protocol / 53% LP / 2% season.
    fn default() -> Self {
        Self {
            winner_share: dec!(0.55),
            protocol_cut: dec!(0.45),
            lp_share_of_protocol: dec!(0.53),
            season_share_of_revenue: dec!(0.02),
            protocol_share_of_revenue: dec!(0.45),
        }
    }
}

/// Hard limits of the pool: bet bounds and the reserve circuit breaker.
#[derive(Debug, Clone, Serialize)]
pub struct PoolLimits {
    /// Maximum permitted parlay leg count.
    pub max_leg_count: u8,
    /// Maximum permitted stake on a single bet.
    pub max_stake: Decimal,
    /// Minimum reserve threshold; a scenario whose bonus requirement
    /// exceeds it is flagged as a circuit breaker breach.
    pub circuit_breaker_threshold: Decimal,
}

impl PoolLimits {
    /// Check the structural invariants of the limits.
    pub fn validate(&self) -> Result<()> {
        if self.max_leg_count == 0 {
            return Err(InvalidParameter::InvalidPoolLimits {
                reason: "max_leg_count must be at least 1".into(),
            });
        }
        if self.max_stake <= Decimal::ZERO {
            return Err(InvalidParameter::InvalidPoolLimits {
                reason: format!("max_stake must be positive, got {}", self.max_stake),
            });
        }
        if self.circuit_breaker_threshold < Decimal::ZERO {
            return Err(InvalidParameter::InvalidPoolLimits {
                reason: format!(
                    "circuit_breaker_threshold must be non-negative, got {}",
                    self.circuit_breaker_threshold
                ),
            });
        }
        Ok(())
    }
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_leg_count: 10,
            max_stake: dec!(50000),
            circuit_breaker_threshold: dec!(9000),
        }
    }
}

/// Full model configuration handed to the engine and classifier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationConfig {
    pub parlay: ParlayConfig,
    pub splits: RevenueSplitConfig,
    pub limits: PoolLimits,
}

impl SimulationConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.parlay.validate()?;
        self.splits.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

/// Logging configuration for the binary.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn multiplier_table_must_start_at_one() {
        let result = ParlayConfig::new(1.0 / 3.0, vec![dec!(1.1), dec!(1.2)]);
        assert!(matches!(
            result,
            Err(InvalidParameter::InvalidMultiplierTable { .. })
        ));
    }

    #[test]
    fn multiplier_table_must_be_non_decreasing() {
        let result = ParlayConfig::new(1.0 / 3.0, vec![dec!(1.0), dec!(1.3), dec!(1.2)]);
        assert!(matches!(
            result,
            Err(InvalidParameter::InvalidMultiplierTable { .. })
        ));
    }

    #[test]
    fn multiplier_falls_back_to_last_entry_beyond_table() {
        let config = ParlayConfig::default();
        assert_eq!(config.multiplier(10), dec!(1.5));
        assert_eq!(config.multiplier(25), dec!(1.5));
    }

    #[test]
    fn default_multipliers_are_monotone() {
        let config = ParlayConfig::default();
        for legs in 1..10u8 {
            assert!(config.multiplier(legs + 1) >= config.multiplier(legs));
        }
        assert_eq!(config.multiplier(1), Decimal::ONE);
    }

    #[test]
    fn probability_must_be_strictly_inside_unit_interval() {
        for p in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let result = ParlayConfig::new(p, vec![dec!(1.0)]);
            assert!(matches!(
                result,
                Err(InvalidParameter::ProbabilityOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn winner_and_protocol_shares_must_partition_pool() {
        let splits = RevenueSplitConfig {
            winner_share: dec!(0.70),
            protocol_cut: dec!(0.45),
            ..Default::default()
        };
        assert!(matches!(
            splits.validate(),
            Err(InvalidParameter::InvalidRevenueSplit { .. })
        ));
    }

    #[test]
    fn net_revenue_sub_shares_may_overlap() {
        // 45% + 53% + 2% of net revenue: the sub-shares are independent
        // fractions and deliberately not required to partition.
        assert!(RevenueSplitConfig::default().validate().is_ok());
    }

    #[test]
    fn limits_reject_zero_leg_count_and_non_positive_stake() {
        let limits = PoolLimits {
            max_leg_count: 0,
            ..Default::default()
        };
        assert!(limits.validate().is_err());

        let limits = PoolLimits {
            max_stake: Decimal::ZERO,
            ..Default::default()
        };
        assert!(limits.validate().is_err());
    }
}
