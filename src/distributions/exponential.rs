//! Exponential distribution with rate λ.
//!
//! # Mathematical Definition
//! - PDF: f(x) = λ·exp(−λx) for x ≥ 0
//! - CDF: F(x) = 1 − exp(−λx)
//! - Mean: 1/λ, Variance: 1/λ², Skew: 2, Excess kurtosis: 6

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

fn valid(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

pub fn pdf(x: f64, rate: f64) -> f64 {
    if !valid(rate) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    rate * (-rate * x).exp()
}

pub fn cdf(x: f64, rate: f64) -> f64 {
    if !valid(rate) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    -(-rate * x).exp_m1()
}

pub fn sf(x: f64, rate: f64) -> f64 {
    if !valid(rate) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    (-rate * x).exp()
}

/// Quantile: `−ln(1−p)/λ`.
pub fn ppf(p: f64, rate: f64) -> f64 {
    if !valid(rate) || !is_probability(p) {
        return f64::NAN;
    }
    -(-p).ln_1p() / rate
}

/// Inverse survival function: `−ln(p)/λ`.
pub fn isf(p: f64, rate: f64) -> f64 {
    if !valid(rate) || !is_probability(p) {
        return f64::NAN;
    }
    -p.ln() / rate
}

pub fn moments(rate: f64) -> Moments {
    if !valid(rate) {
        return Moments::UNDEFINED;
    }
    Moments {
        mean: 1.0 / rate,
        variance: 1.0 / (rate * rate),
        skew: 2.0,
        kurtosis: 6.0,
    }
}

pub fn stats(selector: MomentSelector, rate: f64) -> Stats {
    Stats::select(&moments(rate), selector)
}

/// One variate by inverse-CDF sampling.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    if !valid(rate) {
        return f64::NAN;
    }
    ppf(rng.next_uniform(), rate)
}

/// Exponential distribution with rate `rate` (mean `1/rate`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Distribution for Exponential {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.rate)
    }

    fn pdf(&self, x: f64) -> f64 {
        pdf(x, self.rate)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.rate)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.rate)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.rate)
    }

    fn isf(&self, p: f64) -> f64 {
        isf(p, self.rate)
    }

    fn moments(&self) -> Moments {
        moments(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats;

    #[test]
    fn test_known_values() {
        assert_eq!(pdf(0.0, 2.0), 2.0);
        assert!((cdf(1.0, 1.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-15);
        assert!((ppf(0.5, 1.0) - std::f64::consts::LN_2).abs() < 1e-15);
        assert_eq!(ppf(0.0, 3.0), 0.0);
        assert_eq!(ppf(1.0, 3.0), f64::INFINITY);
    }

    #[test]
    fn test_negative_support() {
        assert_eq!(pdf(-1.0, 1.0), 0.0);
        assert_eq!(cdf(-1.0, 1.0), 0.0);
        assert_eq!(sf(-1.0, 1.0), 1.0);
    }

    #[test]
    fn test_small_x_precision() {
        let x = 1e-12;
        assert!((cdf(x, 1.0) / x - 1.0).abs() < 1e-11);
        assert!((ppf(1e-15, 1.0) / 1e-15 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_moments() {
        let m = moments(0.5);
        assert_eq!(m.mean, 2.0);
        assert_eq!(m.variance, 4.0);
        assert_eq!(m.skew, 2.0);
        assert_eq!(m.kurtosis, 6.0);
        assert!(moments(0.0).mean.is_nan());
    }

    #[test]
    fn test_sample_mean() {
        let xs = Exponential::new(4.0).sample(&mut create_rng(12), 20_000);
        assert!(xs.iter().all(|&x| x >= 0.0));
        let m = stats::mean(&xs).unwrap();
        assert!((m - 0.25).abs() < 0.01, "mean = {m}");
    }

    #[test]
    fn test_sample_shape_matches_moments() {
        let d = Exponential::new(1.5);
        let xs = d.sample(&mut create_rng(77), 200_000);
        let sample = stats::sample_moments(&xs).unwrap();
        let exact = d.moments();
        assert!((sample.mean - exact.mean).abs() < 0.01, "mean = {}", sample.mean);
        assert!((sample.variance / exact.variance - 1.0).abs() < 0.03);
        assert!((sample.skew - 2.0).abs() < 0.15, "skew = {}", sample.skew);
        assert!((sample.kurtosis - 6.0).abs() < 1.0, "kurtosis = {}", sample.kurtosis);
    }
}
