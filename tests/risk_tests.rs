//! Classifier tests over full engine runs.

use poolsim::config::SimulationConfig;
use poolsim::engine::SimulationEngine;
use poolsim::risk::{self, RiskFlag, Severity};
use poolsim::testkit::{self, FixedSource};
use rust_decimal_macros::dec;

/// A run where users win nothing: the protocol and LPs both profit, no
/// rules fire, and the run's bonus total stays under the breaker.
#[test]
fn all_loss_run_classifies_clean() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let params = testkit::single_leg_params(1_000, dec!(100));
    let mut source = FixedSource::always_lose();

    let report = engine.run(&params, &mut source).unwrap();
    let assessment = risk::classify(&report, dec!(9000));

    assert!(assessment.flags.is_empty());
    assert!(!assessment.breaches_circuit_breaker());
    assert!(assessment.protocol_pnl > dec!(0));
    assert!(assessment.lp_pnl > dec!(0));
    assert!(assessment.user_pnl < dec!(0));
}

/// Forcing every single-leg bet to win drives net revenue negative:
/// protocol and LPs both lose, users profit, and the LP
/// under-compensation warning stays inapplicable.
#[test]
fn all_win_run_flags_both_critical_pnl_rules() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let params = testkit::single_leg_params(1_000, dec!(100));
    let mut source = FixedSource::always_win();

    let report = engine.run(&params, &mut source).unwrap();
    let assessment = risk::classify(&report, dec!(9000));

    assert!(assessment
        .flags
        .iter()
        .any(|f| matches!(f, RiskFlag::ReserveDepleting { .. })));
    assert!(assessment
        .flags
        .iter()
        .any(|f| matches!(f, RiskFlag::LpUnprofitable { .. })));
    // Users are net winners, so under-compensation is not evaluated.
    assert!(!assessment
        .flags
        .iter()
        .any(|f| matches!(f, RiskFlag::LpUnderCompensated { .. })));
    assert!(assessment.has_critical());
}

/// The under-compensation rule is a warning, not a critical flag.
#[test]
fn lp_under_compensation_is_warning_severity() {
    let flag = RiskFlag::LpUnderCompensated {
        lp_pnl: dec!(1),
        user_losses: dec!(1000),
    };
    assert_eq!(flag.severity(), Severity::Warning);

    let breach = RiskFlag::CircuitBreakerBreach {
        bonus_required: dec!(10000),
        threshold: dec!(9000),
        shortfall: dec!(1000),
    };
    assert_eq!(breach.severity(), Severity::Critical);
}

/// Assessments serialize with every field the reporter's JSON mode needs.
#[test]
fn assessment_serializes_all_reported_fields() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let params = testkit::single_leg_params(100, dec!(100));
    let mut source = FixedSource::always_lose();

    let report = engine.run(&params, &mut source).unwrap();
    let assessment = risk::classify(&report, dec!(9000));

    let value = serde_json::to_value(&assessment).unwrap();
    for key in ["protocol_pnl", "lp_pnl", "user_pnl", "worst_case_bonus", "flags"] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
    assert_eq!(value["worst_case_bonus"], serde_json::json!("0"));
}

/// One forced 10-leg win inside an otherwise losing run pushes the run's
/// bonus total over the breaker, alongside the P&L rules.
#[test]
fn bonus_heavy_run_breaches_circuit_breaker() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let mut params = testkit::single_leg_params(100, dec!(10000));
    params.leg_counts =
        poolsim::domain::WeightedDistribution::new([(10u8, 1.0)]).unwrap();

    // Draw pairs per round: leg-count sample, then the win draw.
    // Round 1 wins (draw below (1/3)^10); the other 99 lose.
    let mut draws = vec![0.5, 0.0];
    draws.extend(std::iter::repeat(0.5).take(99 * 2));
    let mut source = FixedSource::scripted(draws);

    let report = engine.run(&params, &mut source).unwrap();
    assert_eq!(report.accumulator.win_count, 1);
    // 10000 * 2^10 * 0.5
    assert_eq!(report.accumulator.total_reserve_bonus_paid, dec!(5120000));

    let assessment = risk::classify(&report, dec!(9000));
    assert!(assessment.breaches_circuit_breaker());
    assert!(assessment.flags.iter().any(|f| matches!(
        f,
        RiskFlag::CircuitBreakerBreach { shortfall, .. } if *shortfall == dec!(5111000)
    )));
}
