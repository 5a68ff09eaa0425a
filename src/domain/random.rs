//! Injectable uniform random source.
//!
//! The payout model and scenario library draw through the [`UniformSource`]
//! capability instead of a global RNG, so every computation is reproducible
//! given a seed. Production wiring uses an entropy-seeded [`StdSource`];
//! tests inject seeded or scripted sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A capability supplying uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Draw the next uniform value in `[0, 1)`.
    fn draw(&mut self) -> f64;
}

/// Standard random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdSource {
    rng: StdRng,
}

impl StdSource {
    /// Deterministic source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic source seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformSource for StdSource {
    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_replay_identically() {
        let mut a = StdSource::seeded(42);
        let mut b = StdSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut source = StdSource::seeded(7);
        for _ in 0..1000 {
            let value = source.draw();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
