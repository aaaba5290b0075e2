//! Lévy distribution, the one-sided stable law with index 1/2.
//!
//! # Mathematical Definition
//! For x > μ:
//! - PDF: f(x) = √(c/(2π)) · exp(−c/(2(x−μ))) / (x−μ)^{3/2}
//! - CDF: F(x) = erfc(√(c/(2(x−μ))))
//!
//! Mean and variance diverge; skew and kurtosis are undefined.
//!
//! Reference: Nolan (2020), *Univariate Stable Distributions*, §1.2.

use std::f64::consts::PI;

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::{self, RandomSource};
use crate::special;

fn valid(loc: f64, scale: f64) -> bool {
    loc.is_finite() && scale.is_finite() && scale > 0.0
}

/// `√(c/(2(x−μ)))`, the argument shared by the CDF and SF.
fn tail_arg(x: f64, loc: f64, scale: f64) -> f64 {
    (scale / (2.0 * (x - loc))).sqrt()
}

pub fn pdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= loc || x == f64::INFINITY {
        return 0.0;
    }
    let z = x - loc;
    (scale / (2.0 * PI)).sqrt() * (-scale / (2.0 * z)).exp() / z.powf(1.5)
}

pub fn cdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= loc {
        return 0.0;
    }
    special::erfc(tail_arg(x, loc, scale))
}

/// `erf(√(c/(2(x−μ))))`.
pub fn sf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    if x <= loc {
        return 1.0;
    }
    special::erf(tail_arg(x, loc, scale))
}

/// Quantile: `μ + c / (2·erfc⁻¹(p)²)`.
pub fn ppf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    let y = special::ierfc(p);
    loc + scale / (2.0 * y * y)
}

/// Inverse survival function: `μ + c / (2·erf⁻¹(p)²)`.
pub fn isf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    let y = special::ierf(p);
    loc + scale / (2.0 * y * y)
}

pub fn moments(loc: f64, scale: f64) -> Moments {
    if !valid(loc, scale) {
        return Moments::UNDEFINED;
    }
    Moments {
        mean: f64::INFINITY,
        variance: f64::INFINITY,
        skew: f64::NAN,
        kurtosis: f64::NAN,
    }
}

pub fn stats(selector: MomentSelector, loc: f64, scale: f64) -> Stats {
    Stats::select(&moments(loc, scale), selector)
}

/// One variate as `μ + c/Z²` with Z standard normal.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    let z = random::standard_normal(rng);
    loc + scale / (z * z)
}

/// Lévy distribution with location `loc` and scale `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levy {
    loc: f64,
    scale: f64,
}

impl Levy {
    pub fn new(loc: f64, scale: f64) -> Self {
        Self { loc, scale }
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Levy {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.loc, self.scale)
    }

    fn pdf(&self, x: f64) -> f64 {
        pdf(x, self.loc, self.scale)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.loc, self.scale)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.loc, self.scale)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.loc, self.scale)
    }

    fn isf(&self, p: f64) -> f64 {
        isf(p, self.loc, self.scale)
    }

    fn moments(&self) -> Moments {
        moments(self.loc, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_support() {
        assert_eq!(pdf(0.0, 0.0, 1.0), 0.0);
        assert_eq!(pdf(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(cdf(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(sf(0.0, 0.0, 1.0), 1.0);
        assert_eq!(cdf(f64::INFINITY, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_known_values() {
        // Standard Lévy: F(1) = erfc(1/√2) ≈ 0.3173105078629141
        assert!((cdf(1.0, 0.0, 1.0) - 0.3173105078629141).abs() < 1e-12);
        // f(1) = e^{-1/2}/√(2π)
        let expected = (-0.5_f64).exp() / (2.0 * PI).sqrt();
        assert!((pdf(1.0, 0.0, 1.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_median() {
        // Median = μ + c / (2·erfc⁻¹(1/2)²) ≈ μ + 2.1981·c
        let m = ppf(0.5, 1.0, 2.0);
        assert!((m - (1.0 + 2.0 * 2.198109338317733)).abs() < 1e-8, "median = {m}");
    }

    #[test]
    fn test_ppf_edges() {
        assert_eq!(ppf(0.0, 1.0, 1.0), 1.0);
        assert_eq!(ppf(1.0, 1.0, 1.0), f64::INFINITY);
        assert_eq!(isf(1.0, 1.0, 1.0), 1.0);
        assert!(ppf(-0.5, 1.0, 1.0).is_nan());
    }

    #[test]
    fn test_isf_round_trip_in_tail() {
        for &p in &[1e-3, 1e-6, 1e-9] {
            let x = isf(p, 0.0, 1.0);
            assert!((sf(x, 0.0, 1.0) / p - 1.0).abs() < 1e-8, "p = {p}");
        }
    }

    #[test]
    fn test_moments_diverge() {
        let s = Levy::new(0.0, 1.0).stats(MomentSelector::ALL);
        assert_eq!(s.mean, Some(f64::INFINITY));
        assert_eq!(s.variance, Some(f64::INFINITY));
        assert!(s.skew.unwrap().is_nan());
        assert!(s.kurtosis.unwrap().is_nan());
    }

    #[test]
    fn test_samples_match_median() {
        let d = Levy::new(0.0, 1.0);
        let median = d.ppf(0.5);
        let xs = d.sample(&mut create_rng(3), 20_000);
        assert!(xs.iter().all(|&x| x > 0.0));
        let below = xs.iter().filter(|&&x| x <= median).count() as f64 / xs.len() as f64;
        assert!((below - 0.5).abs() < 0.02, "fraction below median = {below}");
    }
}
