// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! Each simulated draw gets its own `StdRng` seeded from a per-call base
//! seed plus the path index, so parallel iteration over paths never shares
//! generator state between threads and a fixed base seed reproduces the
//! whole run regardless of thread count.
//!
//! A call that must stay statistically independent of another call (the
//! bumped and unbumped passes of a finite-difference quotient) derives its
//! base seed through [`mix_seed`] with a distinct stream index, so no two
//! passes ever share draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seed a standard RNG for one simulated path
pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One standard normal draw
pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// A fresh base seed from OS entropy, for calls without a fixed seed
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Derive an independent stream seed from a base seed
///
/// Splitmix64-style finalizer; nearby stream indices map to well-separated
/// seeds, so the pricing passes inside one estimation call draw independent
/// randomness even when the caller fixed a single base seed.
pub fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed.wrapping_add(stream.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
