//! Discrete weighted distribution.
//!
//! A reusable abstraction over unnormalized weights with variable support,
//! sampled through the injectable [`UniformSource`] so draws stay
//! seed-deterministic. The engine uses it for the leg-count mix; weights
//! need not sum to 1.

use crate::domain::random::UniformSource;
use crate::error::{InvalidParameter, Result};

/// A discrete distribution over an arbitrary support with unnormalized
/// non-negative weights.
#[derive(Debug, Clone)]
pub struct WeightedDistribution<T> {
    support: Vec<T>,
    /// Cumulative weights; the last entry is the total mass.
    cumulative: Vec<f64>,
}

impl<T: Copy> WeightedDistribution<T> {
    /// Build a distribution from `(value, weight)` pairs.
    ///
    /// Weights must be finite and non-negative, and at least one must be
    /// positive. Weights are not required to sum to 1.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Result<Self> {
        let mut support = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0_f64;

        for (index, (value, weight)) in entries.into_iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(InvalidParameter::InvalidWeight { index, weight });
            }
            total += weight;
            support.push(value);
            cumulative.push(total);
        }

        if support.is_empty() {
            return Err(InvalidParameter::EmptyDistribution);
        }
        if total <= 0.0 {
            return Err(InvalidParameter::ZeroWeightSum);
        }

        Ok(Self {
            support,
            cumulative,
        })
    }

    /// Sample one value.
    pub fn sample(&self, source: &mut dyn UniformSource) -> T {
        let total = *self
            .cumulative
            .last()
            .unwrap_or(&1.0);
        let target = source.draw() * total;
        let index = self.cumulative.partition_point(|&mass| mass <= target);
        // partition_point can return len() when the draw lands exactly on
        // the total mass; clamp to the last support entry.
        let index = index.min(self.support.len() - 1);
        self.support[index]
    }

    /// Sample `count` values.
    #[must_use]
    pub fn sample_batch(&self, count: usize, source: &mut dyn UniformSource) -> Vec<T> {
        (0..count).map(|_| self.sample(source)).collect()
    }

    /// Number of support values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Whether the support is empty (never true for a constructed value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }
}

impl WeightedDistribution<u8> {
    /// Distribution over leg counts `1..=weights.len()`.
    pub fn leg_counts(weights: &[f64]) -> Result<Self> {
        Self::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (i as u8 + 1, w)),
        )
    }

    /// The deployed leg-count mix, weighted toward smaller parlays.
    pub fn default_leg_mix() -> Result<Self> {
        Self::leg_counts(&[5.0, 15.0, 20.0, 18.0, 15.0, 10.0, 8.0, 5.0, 3.0, 1.0])
    }
}
