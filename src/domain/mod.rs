//! Pool-agnostic domain types: wager outcomes, the payout model, the
//! weighted leg-count distribution, and the injectable random source.

pub mod distribution;
pub mod outcome;
pub mod payout;
pub mod random;

pub use distribution::WeightedDistribution;
pub use outcome::WagerOutcome;
pub use payout::PayoutModel;
pub use random::{StdSource, UniformSource};
