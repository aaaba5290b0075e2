//! Discrete uniform distribution on the integers `low..=high`.
//!
//! # Mathematical Definition
//! With `n = high − low + 1`:
//! - PMF: 1/n on each support point
//! - Mean: (low+high)/2, Variance: (n²−1)/12
//! - Excess kurtosis: −6(n²+1) / (5(n²−1))

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

fn valid(low: i64, high: i64) -> bool {
    low <= high
}

/// Number of support points, exact for the full `i64` range.
fn count(low: i64, high: i64) -> i128 {
    high as i128 - low as i128 + 1
}

/// `F(k)` at the integer `k ∈ [low, high]`.
fn step(k: i128, low: i64, high: i64) -> f64 {
    (k - low as i128 + 1) as f64 / count(low, high) as f64
}

pub fn pmf(x: f64, low: i64, high: i64) -> f64 {
    if !valid(low, high) || x.is_nan() {
        return f64::NAN;
    }
    if x >= low as f64 && x <= high as f64 && x == x.trunc() {
        1.0 / count(low, high) as f64
    } else {
        0.0
    }
}

pub fn cdf(x: f64, low: i64, high: i64) -> f64 {
    if !valid(low, high) || x.is_nan() {
        return f64::NAN;
    }
    if x < low as f64 {
        0.0
    } else if x >= high as f64 {
        1.0
    } else {
        step(x.floor() as i128, low, high)
    }
}

pub fn sf(x: f64, low: i64, high: i64) -> f64 {
    if !valid(low, high) || x.is_nan() {
        return f64::NAN;
    }
    if x < low as f64 {
        1.0
    } else if x >= high as f64 {
        0.0
    } else {
        (high as i128 - x.floor() as i128) as f64 / count(low, high) as f64
    }
}

/// Smallest support point `k` with `F(k) ≥ q`, by bisection over the
/// integers so the search takes at most 64 steps.
pub fn ppf(q: f64, low: i64, high: i64) -> f64 {
    if !valid(low, high) || !is_probability(q) {
        return f64::NAN;
    }
    let (mut lo, mut hi) = (low as i128, high as i128);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if step(mid, low, high) >= q {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo as f64
}

pub fn isf(q: f64, low: i64, high: i64) -> f64 {
    ppf(1.0 - q, low, high)
}

pub fn moments(low: i64, high: i64) -> Moments {
    if !valid(low, high) {
        return Moments::UNDEFINED;
    }
    let mean = (low as f64 + high as f64) / 2.0;
    if low == high {
        // point mass: shape moments are 0/0
        return Moments {
            mean,
            variance: 0.0,
            skew: f64::NAN,
            kurtosis: f64::NAN,
        };
    }
    let n2 = (count(low, high) as f64).powi(2);
    Moments {
        mean,
        variance: (n2 - 1.0) / 12.0,
        skew: 0.0,
        kurtosis: -6.0 * (n2 + 1.0) / (5.0 * (n2 - 1.0)),
    }
}

pub fn stats(selector: MomentSelector, low: i64, high: i64) -> Stats {
    Stats::select(&moments(low, high), selector)
}

/// One variate by inverse-CDF sampling.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, low: i64, high: i64) -> f64 {
    if !valid(low, high) {
        return f64::NAN;
    }
    let offset = (rng.next_uniform() * count(low, high) as f64) as i128;
    (low as i128 + offset).min(high as i128) as f64
}

/// Uniform distribution over the integers `low..=high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteUniform {
    low: i64,
    high: i64,
}

impl DiscreteUniform {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }
}

impl Distribution for DiscreteUniform {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.low, self.high)
    }

    fn pdf(&self, x: f64) -> f64 {
        pmf(x, self.low, self.high)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.low, self.high)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.low, self.high)
    }

    fn ppf(&self, q: f64) -> f64 {
        ppf(q, self.low, self.high)
    }

    fn moments(&self) -> Moments {
        moments(self.low, self.high)
    }
}
