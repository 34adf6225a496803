//! Deterministic randomness for the allocator.
//!
//! The allocator only ever asks for a coin flip and a bounded draw, so both are
//! behind the RandomSource trait. Every `rand` generator is a RandomSource;
//! tests substitute fixed draws, and replicas use the seeded Lcg so that a
//! given seed always replays the same allocations.

use rand::Rng;
use rand_core::{RngCore, SeedableRng, impls};

/// Source of the two random draws the allocator consumes.
pub trait RandomSource {
    /// A uniform coin flip.
    fn boolean(&mut self) -> bool;

    /// A uniform draw in `[min, max)`. Returns `min` when the range is empty.
    fn range(&mut self, min: f64, max: f64) -> f64;
}

impl<T: Rng> RandomSource for T {
    fn boolean(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.gen_range(min..max)
        } else {
            min
        }
    }
}

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const INCREMENT: u64 = 1_442_695_040_888_963_407;

/// A 64-bit linear congruential generator.
///
/// Its output stream is fixed by the recurrence alone, so a seed replays the
/// same allocations on every platform. Not suitable for anything
/// security-related.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    seed: u64,
    state: u64,
}

impl Lcg {
    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Lcg { seed, state: seed }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        // High bits of an LCG are the well-mixed ones
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Lcg::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Lcg::new(state)
    }
}
