//! Pareto (Type I) distribution.
//!
//! # Mathematical Definition
//! - PDF: f(x) = α·xₘ^α / x^(α+1) for x ≥ xₘ
//! - CDF: F(x) = 1 − (xₘ/x)^α
//! - Mean: α·xₘ/(α−1) for α > 1
//! - Variance: xₘ²·α / ((α−1)²(α−2)) for α > 2
//!
//! Moments of order `k ≥ α` do not exist: the mean is `NaN` for α ≤ 1,
//! the variance `∞` for 1 < α ≤ 2 and `NaN` for α ≤ 1, the skew `NaN`
//! for α ≤ 3 and the kurtosis `NaN` for α ≤ 4.
//!
//! Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
//! Distributions*, Vol. 1, Chapter 20.

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

fn valid(shape: f64, scale: f64) -> bool {
    shape.is_finite() && scale.is_finite() && shape > 0.0 && scale > 0.0
}

pub fn pdf(x: f64, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x < scale {
        return 0.0;
    }
    // (α/x)·(xₘ/x)^α stays finite where xₘ^α alone would overflow
    shape / x * (scale / x).powf(shape)
}

pub fn cdf(x: f64, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= scale {
        return 0.0;
    }
    1.0 - (scale / x).powf(shape)
}

/// `(xₘ/x)^α`.
pub fn sf(x: f64, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= scale {
        return 1.0;
    }
    (scale / x).powf(shape)
}

/// Quantile: `xₘ·(1−p)^(−1/α)`.
pub fn ppf(p: f64, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) || !is_probability(p) {
        return f64::NAN;
    }
    scale * (1.0 - p).powf(-1.0 / shape)
}

/// Inverse survival function: `xₘ·p^(−1/α)`.
pub fn isf(p: f64, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) || !is_probability(p) {
        return f64::NAN;
    }
    scale * p.powf(-1.0 / shape)
}

pub fn moments(shape: f64, scale: f64) -> Moments {
    if !valid(shape, scale) {
        return Moments::UNDEFINED;
    }
    let a = shape;
    let mean = if a > 1.0 {
        a * scale / (a - 1.0)
    } else {
        f64::NAN
    };
    let variance = if a > 2.0 {
        scale * scale * a / ((a - 1.0) * (a - 1.0) * (a - 2.0))
    } else if a > 1.0 {
        f64::INFINITY
    } else {
        f64::NAN
    };
    let skew = if a > 3.0 {
        2.0 * (1.0 + a) / (a - 3.0) * ((a - 2.0) / a).sqrt()
    } else {
        f64::NAN
    };
    let kurtosis = if a > 4.0 {
        6.0 * (a * a * a + a * a - 6.0 * a - 2.0) / (a * (a - 3.0) * (a - 4.0))
    } else {
        f64::NAN
    };
    Moments {
        mean,
        variance,
        skew,
        kurtosis,
    }
}

pub fn stats(selector: MomentSelector, shape: f64, scale: f64) -> Stats {
    Stats::select(&moments(shape, scale), selector)
}

/// One variate by inverse-CDF sampling on `1 − U ∈ (0, 1]`.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    if !valid(shape, scale) {
        return f64::NAN;
    }
    isf(1.0 - rng.next_uniform(), shape, scale)
}

/// Pareto distribution with tail index `shape` (α) and minimum `scale` (xₘ).
///
/// # Examples
/// ```
/// use u_probability::distributions::{Distribution, MomentSelector, Pareto};
/// let p = Pareto::new(1.0, 1.0);
/// assert_eq!(p.cdf(2.0), 0.5);
/// assert!(p.stats(MomentSelector::MEAN).mean.unwrap().is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pareto {
    shape: f64,
    scale: f64,
}

impl Pareto {
    pub fn new(shape: f64, scale: f64) -> Self {
        Self { shape, scale }
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Pareto {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.shape, self.scale)
    }

    fn pdf(&self, x: f64) -> f64 {
        pdf(x, self.shape, self.scale)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.shape, self.scale)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.shape, self.scale)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.shape, self.scale)
    }

    fn isf(&self, p: f64) -> f64 {
        isf(p, self.shape, self.scale)
    }

    fn moments(&self) -> Moments {
        moments(self.shape, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_unit_pareto() {
        let p = Pareto::new(1.0, 1.0);
        assert_eq!(p.cdf(2.0), 0.5);
        assert_eq!(p.sf(2.0), 0.5);
        assert_eq!(p.pdf(1.0), 1.0);
        assert_eq!(p.pdf(2.0), 0.25);
        assert_eq!(p.ppf(0.5), 2.0);
    }

    #[test]
    fn test_below_scale() {
        assert_eq!(pdf(0.5, 2.0, 1.0), 0.0);
        assert_eq!(cdf(0.5, 2.0, 1.0), 0.0);
        assert_eq!(sf(0.5, 2.0, 1.0), 1.0);
        assert_eq!(ppf(0.0, 2.0, 3.0), 3.0);
        assert_eq!(ppf(1.0, 2.0, 3.0), f64::INFINITY);
    }

    #[test]
    fn test_mean_undefined_for_heavy_tail() {
        let s = Pareto::new(1.0, 1.0).stats("mvsk".parse().unwrap());
        assert!(s.mean.unwrap().is_nan());
        assert!(s.variance.unwrap().is_nan());
        assert!(s.skew.unwrap().is_nan());
        assert!(s.kurtosis.unwrap().is_nan());
    }

    #[test]
    fn test_variance_diverges_between_one_and_two() {
        let m = moments(1.5, 2.0);
        assert!((m.mean - 6.0).abs() < 1e-12);
        assert_eq!(m.variance, f64::INFINITY);
        assert!(m.skew.is_nan());
    }

    #[test]
    fn test_finite_moments() {
        // α = 5, xₘ = 1: mean 5/4, variance 5/48
        let m = moments(5.0, 1.0);
        assert!((m.mean - 1.25).abs() < 1e-15);
        assert!((m.variance - 5.0 / 48.0).abs() < 1e-15);
        let skew = 2.0 * 6.0 / 2.0 * (3.0_f64 / 5.0).sqrt();
        assert!((m.skew - skew).abs() < 1e-12);
        assert!((m.kurtosis - 6.0 * (125.0 + 25.0 - 30.0 - 2.0) / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(cdf(2.0, 0.0, 1.0).is_nan());
        assert!(pdf(2.0, 1.0, -1.0).is_nan());
        assert!(moments(-1.0, 1.0).mean.is_nan());
    }

    #[test]
    fn test_samples_at_least_scale() {
        let xs = Pareto::new(3.0, 2.0).sample(&mut create_rng(8), 10_000);
        assert!(xs.iter().all(|&x| x >= 2.0));
        let median = ppf(0.5, 3.0, 2.0);
        let below = xs.iter().filter(|&&x| x <= median).count() as f64 / 10_000.0;
        assert!((below - 0.5).abs() < 0.03, "fraction below median = {below}");
    }
}
