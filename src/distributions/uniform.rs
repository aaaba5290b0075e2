//! Continuous uniform distribution on `[low, high]`.
//!
//! # Mathematical Definition
//! - PDF: f(x) = 1/(high−low) for x ∈ [low, high]
//! - CDF: F(x) = (x−low)/(high−low)
//! - Mean: (low+high)/2
//! - Variance: (high−low)²/12
//! - Excess kurtosis: −6/5

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

fn valid(low: f64, high: f64) -> bool {
    low.is_finite() && high.is_finite() && low < high
}

/// Density at `x`.
pub fn pdf(x: f64, low: f64, high: f64) -> f64 {
    if !valid(low, high) || x.is_nan() {
        return f64::NAN;
    }
    if x >= low && x <= high {
        1.0 / (high - low)
    } else {
        0.0
    }
}

/// CDF, clamped to `[0, 1]` outside the support.
pub fn cdf(x: f64, low: f64, high: f64) -> f64 {
    if !valid(low, high) || x.is_nan() {
        return f64::NAN;
    }
    if x <= low {
        0.0
    } else if x >= high {
        1.0
    } else {
        (x - low) / (high - low)
    }
}

pub fn sf(x: f64, low: f64, high: f64) -> f64 {
    1.0 - cdf(x, low, high)
}

/// Quantile: `low + p·(high−low)`.
pub fn ppf(p: f64, low: f64, high: f64) -> f64 {
    if !valid(low, high) || !is_probability(p) {
        return f64::NAN;
    }
    low + p * (high - low)
}

pub fn isf(p: f64, low: f64, high: f64) -> f64 {
    ppf(1.0 - p, low, high)
}

pub fn moments(low: f64, high: f64) -> Moments {
    if !valid(low, high) {
        return Moments::UNDEFINED;
    }
    let range = high - low;
    Moments {
        mean: (low + high) / 2.0,
        variance: range * range / 12.0,
        skew: 0.0,
        kurtosis: -6.0 / 5.0,
    }
}

pub fn stats(selector: MomentSelector, low: f64, high: f64) -> Stats {
    Stats::select(&moments(low, high), selector)
}

/// One variate by inverse-CDF sampling; lands in `[low, high)`.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if !valid(low, high) {
        return f64::NAN;
    }
    low + rng.next_uniform() * (high - low)
}

/// Continuous uniform distribution on `[low, high]`.
///
/// # Examples
/// ```
/// use u_probability::distributions::{ContinuousUniform, Distribution};
/// let u = ContinuousUniform::new(0.0, 1.0);
/// assert_eq!(u.pdf(0.5), 1.0);
/// assert_eq!(u.cdf(0.5), 0.5);
/// assert_eq!(u.ppf(0.25), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousUniform {
    low: f64,
    high: f64,
}

impl ContinuousUniform {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for ContinuousUniform {
    /// The unit interval.
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Distribution for ContinuousUniform {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.low, self.high)
    }

    fn pdf(&self, x: f64) -> f64 {
        pdf(x, self.low, self.high)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.low, self.high)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.low, self.high)
    }

    fn moments(&self) -> Moments {
        moments(self.low, self.high)
    }
}
