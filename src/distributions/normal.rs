//! Normal (Gaussian) distribution N(μ, σ²).
//!
//! # Mathematical Definition
//! - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
//! - CDF: Φ((x−μ)/σ) (via the standard normal CDF)
//! - Mean: μ
//! - Variance: σ²

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::{self, RandomSource};
use crate::special;

fn valid(loc: f64, scale: f64) -> bool {
    loc.is_finite() && scale.is_finite() && scale > 0.0
}

/// PDF: (1/(σ√(2π))) exp(−(x−μ)²/(2σ²)).
pub fn pdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    special::standard_normal_pdf((x - loc) / scale) / scale
}

/// CDF: Φ((x−μ)/σ).
pub fn cdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    special::standard_normal_cdf((x - loc) / scale)
}

/// Survival function `Φ((μ−x)/σ)`, exact in the upper tail.
pub fn sf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    special::standard_normal_cdf((loc - x) / scale)
}

/// Inverse CDF: μ + σ·Φ⁻¹(p). Returns `±∞` at `p = 0, 1`.
pub fn ppf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    loc + scale * special::standard_normal_quantile(p)
}

/// Inverse survival function: μ − σ·Φ⁻¹(p).
pub fn isf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    loc - scale * special::standard_normal_quantile(p)
}

pub fn moments(loc: f64, scale: f64) -> Moments {
    if !valid(loc, scale) {
        return Moments::UNDEFINED;
    }
    Moments {
        mean: loc,
        variance: scale * scale,
        skew: 0.0,
        kurtosis: 0.0,
    }
}

pub fn stats(selector: MomentSelector, loc: f64, scale: f64) -> Stats {
    Stats::select(&moments(loc, scale), selector)
}

/// One variate by the Box–Muller transform.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    loc + scale * random::standard_normal(rng)
}

/// Normal distribution with mean `loc` and standard deviation `scale`.
///
/// # Examples
/// ```
/// use u_probability::distributions::{Distribution, Normal};
/// let n = Normal::standard();
/// assert!((n.pdf(0.0) - 0.3989422804).abs() < 1e-10);
/// assert_eq!(n.cdf(0.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    pub fn new(loc: f64, scale: f64) -> Self {
        Self { loc, scale }
    }

    /// N(0, 1).
    pub fn standard() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Normal {
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
