use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness used for loot rolls.
pub trait RandomSource {
    /// Uniform value in `0.0..1.0`.
    fn roll(&self) -> f32;

    /// Uniform integer in `min..=max`. Returns `min` when `max <= min`.
    fn range(&self, min: u32, max: u32) -> u32;
}

/// [`RandomSource`] backed by `rand`'s standard generator.
#[derive(Debug)]
pub struct StdRandom {
    rng: RefCell<StdRng>,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator, for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn roll(&self) -> f32 {
        self.rng.borrow_mut().r#gen::<f32>()
    }

    fn range(&self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.borrow_mut().gen_range(min..=max)
    }
}
