//! RNG module - hazard placement
//!
//! Hazards drop at a random column inside a band around the avatar. The
//! generator is seeded so a run can be replayed exactly in tests and benches.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone)]
pub struct SpawnRng {
    rng: Pcg32,
}

impl SpawnRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform column in `[around - offset, around + offset]`.
    pub fn spawn_center(&mut self, around: f32, offset: f32) -> f32 {
        if offset <= 0.0 {
            return around;
        }
        self.rng.random_range((around - offset)..=(around + offset))
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::new(1)
    }
}
