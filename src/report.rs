//! Report formatting.
//!
//! Downstream consumer of the model's numeric output: renders a simulation
//! report and its risk assessment as human-readable text, or as JSON lines
//! for scripting. Configuration errors are reported distinctly from
//! computed risk flags.

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::engine::SimulationReport;
use crate::error::InvalidParameter;
use crate::risk::scenario::ScenarioOutcome;
use crate::risk::{RiskAssessment, RiskFlag, Severity};

/// Renders reports to stdout in text or JSON mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    /// Emit machine-readable JSON lines instead of human-readable text.
    pub json: bool,
}

#[derive(Tabled)]
struct PnlRow {
    #[tabled(rename = "Stakeholder")]
    stakeholder: &'static str,
    #[tabled(rename = "P&L")]
    pnl: Decimal,
}

impl Reporter {
    /// Create a reporter.
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print the application header.
    pub fn header(&self, version: &str) {
        if self.json {
            emit_json_line("header", json!({ "app": "poolsim", "version": version }));
            return;
        }
        println!("{} {}", "poolsim".bold(), version.dimmed());
        println!();
    }

    /// Print a full simulation run with its risk assessment.
    pub fn print_run(&self, report: &SimulationReport, assessment: &RiskAssessment) {
        if self.json {
            emit_json_line(
                "simulation",
                json!({
                    "accumulator": &report.accumulator,
                    "pnl": &report.pnl,
                    "assessment": assessment,
                }),
            );
            return;
        }

        let acc = &report.accumulator;
        let pnl = &report.pnl;

        section("Simulation results");
        field("Rounds", acc.round_count);
        field("Total staked", acc.total_staked);
        field("Total paid out", acc.total_paid_out);
        field(
            "Win rate",
            format!(
                "{}/{} ({:.2}%)",
                acc.win_count,
                acc.round_count,
                acc.win_rate().unwrap_or(0.0) * 100.0
            ),
        );
        field("Avg winning payout", acc.average_winning_payout().round_dp(2));
        field("Net revenue", pnl.net_revenue);
        field("Bonuses from reserve", acc.total_reserve_bonus_paid);
        field("Season share", pnl.season_revenue_share.round_dp(2));
        println!();

        let rows = vec![
            PnlRow {
                stakeholder: "Bettors",
                pnl: pnl.user_pnl.round_dp(2),
            },
            PnlRow {
                stakeholder: "Protocol reserve",
                pnl: pnl.protocol_pnl.round_dp(2),
            },
            PnlRow {
                stakeholder: "Liquidity providers",
                pnl: pnl.lp_pnl.round_dp(2),
            },
        ];
        let table = Table::new(rows).to_string();
        for line in table.lines() {
            println!("  {}", line);
        }
        println!();

        self.print_flags(&assessment.flags);
    }

    /// Print a stress scenario with its risk assessment.
    pub fn print_scenario(&self, outcome: &ScenarioOutcome, assessment: &RiskAssessment) {
        if self.json {
            emit_json_line(
                "scenario",
                json!({
                    "outcome": outcome,
                    "assessment": assessment,
                }),
            );
            return;
        }

        section(outcome.name);
        field("Bets", outcome.trial_count);
        field("Wins", outcome.win_count);
        field("Total staked", outcome.total_staked);
        field("Total paid out", outcome.total_paid_out);
        field("Attacker profit", outcome.attacker_profit());
        field("Bonus from reserve", outcome.bonus_required);
        println!();

        self.print_flags(&assessment.flags);
    }

    /// Print the reserve the pool would need to cover its largest
    /// permitted payout, next to the configured circuit breaker.
    pub fn print_reserve_requirements(
        &self,
        max_payout: Decimal,
        circuit_breaker_threshold: Decimal,
    ) {
        // Recommended reserve: half of the largest theoretical payout.
        let recommended = max_payout * dec!(0.5);

        if self.json {
            emit_json_line(
                "reserve_requirements",
                json!({
                    "max_theoretical_payout": max_payout,
                    "recommended_reserve": recommended,
                    "circuit_breaker_threshold": circuit_breaker_threshold,
                }),
            );
            return;
        }

        section("Reserve requirements");
        field("Max theoretical payout", max_payout);
        field("Recommended reserve", recommended);
        field("Circuit breaker", circuit_breaker_threshold);
        println!();
    }

    /// Print a configuration error, distinct from a computed risk flag.
    pub fn print_config_error(&self, error: &InvalidParameter) {
        if self.json {
            emit_json_line("config_error", json!({ "message": error.to_string() }));
            return;
        }
        eprintln!("{} configuration error: {}", "error:".red().bold(), error);
    }

    fn print_flags(&self, flags: &[RiskFlag]) {
        if flags.is_empty() {
            println!("  {} no risk rules violated", "[OK]".green());
            println!();
            return;
        }
        for flag in flags {
            let marker = match flag.severity() {
                Severity::Critical => "[CRITICAL]".red().bold().to_string(),
                Severity::Warning => "[WARNING]".yellow().to_string(),
            };
            println!("  {} {}: {}", marker, flag.rule(), describe(flag));
        }
        println!();
    }
}

fn section(title: &str) {
    println!("{}", title.bold());
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", label.dimmed(), value);
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

fn describe(flag: &RiskFlag) -> String {
    match flag {
        RiskFlag::ReserveDepleting { loss } => {
            format!("protocol reserve lost {loss} over the run")
        }
        RiskFlag::LpUnprofitable { loss } => {
            format!("liquidity providers lost {loss}")
        }
        RiskFlag::LpUnderCompensated {
            lp_pnl,
            user_losses,
        } => format!("LPs earned {lp_pnl} against {user_losses} of user losses"),
        RiskFlag::CircuitBreakerBreach {
            bonus_required,
            threshold,
            shortfall,
        } => format!(
            "bonus requirement {bonus_required} exceeds circuit breaker {threshold} by {shortfall}"
        ),
    }
}
