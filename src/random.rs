//! Process-wide uniform random source.
//!
//! Thread-safe random number generation with ChaCha20 PRNG. The render loop
//! and the demo scene generator draw from a thread-local instance; code that
//! needs a seeded source for reproducibility takes `impl Rng` instead and
//! bypasses this module.

use glam::Vec3A;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Run a closure with mutable access to the thread-local PRNG.
///
/// This is how the render loop hands the process-wide source to the
/// estimator, whose signature only asks for `impl Rng`.
pub fn with_rng<T>(f: impl FnOnce(&mut ChaCha20Rng) -> T) -> T {
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color() -> Vec3A {
    Vec3A::new(random_f32(), random_f32(), random_f32())
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range(min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(min, max),
        random_f32_range(min, max),
        random_f32_range(min, max),
    )
}
