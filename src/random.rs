//! Sources of randomness and the uniform-draw helpers built on them.
//!
//! Every sampling routine in the crate takes its randomness through the
//! [`RandomSource`] trait, which asks for nothing more than the next uniform
//! double in `[0, 1)`. Any [`rand::Rng`] is a `RandomSource`, so callers can
//! pass `rand::rng()`, a seeded `SmallRng`, or their own generator.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use std::f64::consts::PI;

/// A stream of uniform variates on `[0, 1)`.
///
/// The stream is a single logical sequence: concurrent consumers should
/// each own a separate source.
pub trait RandomSource {
    /// Returns the next uniform double in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

impl<R: rand::Rng> RandomSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++). The sequence is deterministic for a
/// given seed on the same platform.
///
/// # Examples
/// ```
/// use u_probability::random::{create_rng, RandomSource};
/// let mut rng = create_rng(42);
/// let x = rng.next_uniform();
/// assert!((0.0..1.0).contains(&x));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Uniform index in `0..n`. `n` must be positive.
pub(crate) fn uniform_index<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> usize {
    // `u < 1` keeps the product below `n`; the `min` covers rounding.
    ((rng.next_uniform() * n as f64) as usize).min(n - 1)
}

/// Standard normal variate by the Box–Muller transform.
///
/// Consumes two uniforms per call. The first is reflected to `(0, 1]` so
/// the logarithm stays finite.
pub fn standard_normal<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.next_uniform();
    let u2 = rng.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Selects a random index with probability proportional to its weight.
///
/// Non-positive and NaN weights are never chosen.
///
/// # Complexity
/// Time: O(n) per sample
///
/// # Returns
/// - `None` if `weights` is empty or no weight is positive.
///
/// # Examples
/// ```
/// use u_probability::random::{create_rng, weighted_choose};
/// let mut rng = create_rng(42);
/// let idx = weighted_choose(&[1.0, 2.0, 3.0], &mut rng).unwrap();
/// assert!(idx < 3);
/// ```
pub fn weighted_choose<R: RandomSource + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let threshold = rng.next_uniform() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            cumulative += w;
            last_positive = Some(i);
            if cumulative > threshold {
                return Some(i);
            }
        }
    }

    // Rounding can leave the running sum just short of the threshold.
    last_positive
}
