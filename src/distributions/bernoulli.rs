//! Bernoulli distribution: a single trial succeeding with probability `p`.

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;

pub fn pmf(x: f64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        1.0 - p
    } else if x == 1.0 {
        p
    } else {
        0.0
    }
}

pub fn cdf(x: f64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        0.0
    } else if x < 1.0 {
        1.0 - p
    } else {
        1.0
    }
}

pub fn sf(x: f64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        1.0
    } else if x < 1.0 {
        p
    } else {
        0.0
    }
}

/// `0` while `q ≤ 1 − p`, else `1`.
pub fn ppf(q: f64, p: f64) -> f64 {
    if !is_probability(p) || !is_probability(q) {
        return f64::NAN;
    }
    if q <= 1.0 - p {
        0.0
    } else {
        1.0
    }
}

pub fn isf(q: f64, p: f64) -> f64 {
    ppf(1.0 - q, p)
}

pub fn moments(p: f64) -> Moments {
    if !is_probability(p) {
        return Moments::UNDEFINED;
    }
    let pq = p * (1.0 - p);
    if pq == 0.0 {
        // point mass: shape moments are 0/0
        return Moments {
            mean: p,
            variance: 0.0,
            skew: f64::NAN,
            kurtosis: f64::NAN,
        };
    }
    Moments {
        mean: p,
        variance: pq,
        skew: (1.0 - 2.0 * p) / pq.sqrt(),
        kurtosis: (1.0 - 6.0 * pq) / pq,
    }
}

pub fn stats(selector: MomentSelector, p: f64) -> Stats {
    Stats::select(&moments(p), selector)
}

/// `1` if one uniform falls below `p`, else `0`.
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, p: f64) -> f64 {
    if !is_probability(p) {
        return f64::NAN;
    }
    if rng.next_uniform() < p {
        1.0
    } else {
        0.0
    }
}

/// Bernoulli distribution with success probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bernoulli {
    p: f64,
}

impl Bernoulli {
    pub fn new(p: f64) -> Self {
        Self { p }
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution for Bernoulli {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.p)
    }

    fn pdf(&self, x: f64) -> f64 {
        pmf(x, self.p)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.p)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.p)
    }

    fn ppf(&self, q: f64) -> f64 {
        ppf(q, self.p)
    }

    fn moments(&self) -> Moments {
        moments(self.p)
    }
}
