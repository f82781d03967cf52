//! Seeded simulation RNG.
//!
//! # Determinism strategy
//!
//! Every run draws from exactly one `SmallRng` stream seeded from
//! `SimConfig::seed`.  Ensembles derive per-run streams with
//! [`SimRng::child`]:
//!
//!   child_seed = parent.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive run indices uniformly across the seed space.
//! Children are derived sequentially from the master before any run starts,
//! so results do not depend on which thread executes which run.

use rand::distributions::{Distribution, Open01};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.  Exactly one per run; ensemble members each get
/// their own child stream instead of sharing this one.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.  Ensemble
    /// members are seeded this way from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform draw from the open interval (0, 1).
    ///
    /// Used for the waiting-time draw: `-ln(u)` is finite and strictly
    /// positive for every value this can return.
    #[inline]
    pub fn open_unit(&mut self) -> f64 {
        Open01.sample(&mut self.0)
    }

    /// Uniform draw from the half-open interval [0, 1).
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
