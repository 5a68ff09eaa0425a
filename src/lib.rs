//! Poolsim - parlay betting-pool economics simulator.
//!
//! This crate models the economics of a parlay-style betting pool: given
//! the pool's payout rules (base odds, parlay multipliers, revenue splits)
//! it estimates, via repeated random trials, the expected profit and loss
//! for bettors, the protocol reserve, and liquidity providers, and flags
//! configurations where the reserve is structurally exposed to depletion.
//!
//! # Architecture
//!
//! Data flows one way through three components:
//!
//! - **[`domain::payout`]** - Pure per-bet settlement: win probability,
//!   pool-funded base payout, parlay-adjusted payout, and the reserve
//!   bonus the protocol must fund.
//! - **[`engine`]** - Monte Carlo driver: samples leg counts from a
//!   weighted distribution, settles each trial, folds outcomes into a
//!   run-local accumulator, and derives per-stakeholder P&L.
//! - **[`risk`]** - Classifier and adversarial scenario library:
//!   thresholds aggregate results and worst-case bonus requirements
//!   against the reserve circuit breaker.
//!
//! # Modules
//!
//! - [`config`] - Immutable, validated configuration values
//! - [`domain`] - Wager outcomes, payout model, weighted distribution,
//!   injectable random source
//! - [`engine`] - Simulation engine and P&L derivation
//! - [`error`] - Error types for the crate
//! - [`risk`] - Risk classifier and stress scenarios
//! - [`report`] - Text/JSON rendering of results (downstream consumer)
//!
//! # Example
//!
//! ```
//! use poolsim::config::SimulationConfig;
//! use poolsim::domain::{StdSource, WeightedDistribution};
//! use poolsim::engine::{SimulationEngine, SimulationParams};
//! use rust_decimal_macros::dec;
//!
//! let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
//! let params = SimulationParams {
//!     round_count: 10_000,
//!     stake_per_round: dec!(100),
//!     leg_counts: WeightedDistribution::default_leg_mix().unwrap(),
//! };
//! let mut source = StdSource::seeded(42);
//! let report = engine.run(&params, &mut source).unwrap();
//! let assessment = poolsim::risk::classify(&report, dec!(9000));
//! assert_eq!(assessment.worst_case_bonus, report.accumulator.total_reserve_bonus_paid);
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod report;
pub mod risk;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
