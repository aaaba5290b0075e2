//! Cauchy (Lorentz) distribution.
//!
//! # Mathematical Definition
//! - PDF: f(x) = 1 / (πγ·(1 + ((x−x₀)/γ)²))
//! - CDF: F(x) = ½ + arctan((x−x₀)/γ)/π
//!
//! No moment exists; every slot of [`moments`] is `NaN`.

use std::f64::consts::PI;

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

fn valid(loc: f64, scale: f64) -> bool {
    loc.is_finite() && scale.is_finite() && scale > 0.0
}

pub fn pdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    let z = (x - loc) / scale;
    1.0 / (PI * scale * (1.0 + z * z))
}

pub fn cdf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    0.5 + ((x - loc) / scale).atan() / PI
}

/// Survival function by reflection about `loc`.
pub fn sf(x: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || x.is_nan() {
        return f64::NAN;
    }
    0.5 - ((x - loc) / scale).atan() / PI
}

/// Quantile: `x₀ + γ·tan(π(p − ½))`, with exact infinities at the ends.
pub fn ppf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    loc + scale * (PI * (p - 0.5)).tan()
}

pub fn isf(p: f64, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) || !is_probability(p) {
        return f64::NAN;
    }
    2.0 * loc - ppf(p, loc, scale)
}

pub fn moments(_loc: f64, _scale: f64) -> Moments {
    Moments::UNDEFINED
}

pub fn stats(selector: MomentSelector, loc: f64, scale: f64) -> Stats {
    Stats::select(&moments(loc, scale), selector)
}

/// One variate by inverse-CDF sampling.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, loc: f64, scale: f64) -> f64 {
    if !valid(loc, scale) {
        return f64::NAN;
    }
    loc + scale * (PI * (rng.next_uniform() - 0.5)).tan()
}

/// Cauchy distribution with location `loc` and half-width `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    loc: f64,
    scale: f64,
}

impl Cauchy {
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

impl Distribution for Cauchy {
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
