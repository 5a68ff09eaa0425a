//! Risk classification.
//!
//! Thresholds a run's aggregate P&L and the scenario library's worst-case
//! bonus totals against the reserve circuit breaker. Every rule is
//! evaluated independently and all violations are reported; no rule
//! short-circuits another.

pub mod scenario;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::warn;

use crate::engine::SimulationReport;
use crate::risk::scenario::ScenarioOutcome;

/// LPs should earn at least this fraction of user losses.
const LP_COMPENSATION_FLOOR: Decimal = dec!(0.10);

/// How severe a risk flag is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Critical,
}

/// A single violated risk rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RiskFlag {
    /// Protocol P&L is negative: reserve is structurally depleting.
    ReserveDepleting {
        /// Reserve lost over the run.
        loss: Decimal,
    },
    /// LP P&L is negative: liquidity providers will withdraw.
    LpUnprofitable {
        /// LP loss over the run.
        loss: Decimal,
    },
    /// LPs earn less than 10% of what users lose.
    LpUnderCompensated {
        lp_pnl: Decimal,
        user_losses: Decimal,
    },
    /// A bonus requirement exceeds the circuit breaker threshold.
    CircuitBreakerBreach {
        bonus_required: Decimal,
        threshold: Decimal,
        /// `bonus_required - threshold`.
        shortfall: Decimal,
    },
}

impl RiskFlag {
    /// Severity of this flag.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::LpUnderCompensated { .. } => Severity::Warning,
            Self::ReserveDepleting { .. }
            | Self::LpUnprofitable { .. }
            | Self::CircuitBreakerBreach { .. } => Severity::Critical,
        }
    }

    /// Short human-readable rule name.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::ReserveDepleting { .. } => "reserve depleting",
            Self::LpUnprofitable { .. } => "LP unprofitable",
            Self::LpUnderCompensated { .. } => "LP under-compensated",
            Self::CircuitBreakerBreach { .. } => "circuit breaker breach",
        }
    }
}

/// Read-only risk verdict for a run or a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub protocol_pnl: Decimal,
    pub lp_pnl: Decimal,
    pub user_pnl: Decimal,
    /// The bonus total compared against the circuit breaker.
    pub worst_case_bonus: Decimal,
    pub flags: Vec<RiskFlag>,
}

impl RiskAssessment {
    /// Whether any flag is a circuit breaker breach.
    #[must_use]
    pub fn breaches_circuit_breaker(&self) -> bool {
        self.flags
            .iter()
            .any(|flag| matches!(flag, RiskFlag::CircuitBreakerBreach { .. }))
    }

    /// Whether any critical flag was raised.
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.flags
            .iter()
            .any(|flag| flag.severity() == Severity::Critical)
    }
}

/// Classify a full simulation run.
///
/// The run's total reserve bonus stands in as its worst-case bonus so run
/// and scenario assessments compare against the same threshold.
#[must_use]
pub fn classify(report: &SimulationReport, circuit_breaker_threshold: Decimal) -> RiskAssessment {
    let pnl = &report.pnl;
    let mut flags = Vec::new();

    if pnl.protocol_pnl < Decimal::ZERO {
        flags.push(RiskFlag::ReserveDepleting {
            loss: -pnl.protocol_pnl,
        });
    }

    if pnl.lp_pnl < Decimal::ZERO {
        flags.push(RiskFlag::LpUnprofitable { loss: -pnl.lp_pnl });
    }

    // Only meaningful when users are net losers; skipped otherwise.
    if pnl.user_pnl < Decimal::ZERO {
        let user_losses = -pnl.user_pnl;
        if pnl.lp_pnl < user_losses * LP_COMPENSATION_FLOOR {
            flags.push(RiskFlag::LpUnderCompensated {
                lp_pnl: pnl.lp_pnl,
                user_losses,
            });
        }
    }

    let worst_case_bonus = report.accumulator.total_reserve_bonus_paid;
    if let Some(breach) = breach_flag(worst_case_bonus, circuit_breaker_threshold) {
        flags.push(breach);
    }

    log_flags("simulation", &flags);

    RiskAssessment {
        protocol_pnl: pnl.protocol_pnl,
        lp_pnl: pnl.lp_pnl,
        user_pnl: pnl.user_pnl,
        worst_case_bonus,
        flags,
    }
}

/// Classify a stress scenario's bonus requirement.
///
/// A scenario has no revenue split, so only the circuit breaker rule
/// applies: protocol P&L is the raw reserve outflow and LP P&L is zero
/// (LPs bear no bonus cost by construction).
#[must_use]
pub fn classify_scenario(
    outcome: &ScenarioOutcome,
    circuit_breaker_threshold: Decimal,
) -> RiskAssessment {
    let mut flags = Vec::new();
    if let Some(breach) = breach_flag(outcome.bonus_required, circuit_breaker_threshold) {
        flags.push(breach);
    }

    log_flags(outcome.name, &flags);

    RiskAssessment {
        protocol_pnl: -outcome.bonus_required,
        lp_pnl: Decimal::ZERO,
        user_pnl: outcome.attacker_profit(),
        worst_case_bonus: outcome.bonus_required,
        flags,
    }
}

fn breach_flag(bonus_required: Decimal, threshold: Decimal) -> Option<RiskFlag> {
    (bonus_required > threshold).then(|| RiskFlag::CircuitBreakerBreach {
        bonus_required,
        threshold,
        shortfall: bonus_required - threshold,
    })
}

fn log_flags(subject: &str, flags: &[RiskFlag]) {
    for flag in flags {
        warn!(
            subject = subject,
            rule = flag.rule(),
            severity = ?flag.severity(),
            "Risk rule violated"
        );
    }
}
