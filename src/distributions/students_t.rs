//! Student's t distribution with `ν` degrees of freedom.
//!
//! # Mathematical Definition
//! - PDF: f(t) = Γ((ν+1)/2) / (√(νπ)·Γ(ν/2)) · (1 + t²/ν)^{−(ν+1)/2}
//! - CDF: for t ≤ 0, F(t) = ½·I_{ν/(ν+t²)}(ν/2, ½); F(t) = 1 − F(−t) above
//!
//! # Moments
//! | | defined | divergent (`∞`) | undefined (`NaN`) |
//! |---|---|---|---|
//! | mean | 0 for ν > 1 | | ν ≤ 1 |
//! | variance | ν/(ν−2) for ν > 2 | 1 < ν ≤ 2 | ν ≤ 1 |
//! | skew | 0 for ν > 3 | | ν ≤ 3 |
//! | excess kurtosis | 6/(ν−4) for ν > 4 | 2 < ν ≤ 4 | ν ≤ 2 |

use std::f64::consts::PI;

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;
use crate::special;

fn valid(df: f64) -> bool {
    df.is_finite() && df > 0.0
}

pub fn pdf(t: f64, df: f64) -> f64 {
    if !valid(df) || t.is_nan() {
        return f64::NAN;
    }
    let ln_norm =
        special::ln_gamma((df + 1.0) / 2.0) - special::ln_gamma(df / 2.0) - 0.5 * (df * PI).ln();
    (ln_norm - (df + 1.0) / 2.0 * (t * t / df).ln_1p()).exp()
}

/// Lower tail `P(T ≤ −|t|)`.
fn lower_tail(t: f64, df: f64) -> f64 {
    let t2 = t * t;
    if t2 < df {
        // ν/(ν+t²) is too close to 1 to carry t; use the complement side.
        0.5 * (1.0 - special::regularized_incomplete_beta(0.5, df / 2.0, t2 / (df + t2)))
    } else {
        0.5 * special::regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t2))
    }
}

pub fn cdf(t: f64, df: f64) -> f64 {
    if !valid(df) || t.is_nan() {
        return f64::NAN;
    }
    let tail = lower_tail(t, df);
    if t <= 0.0 {
        tail
    } else {
        1.0 - tail
    }
}

/// Survival function by symmetry, `F(−t)`.
pub fn sf(t: f64, df: f64) -> f64 {
    cdf(-t, df)
}

/// Quantile via the inverse regularized incomplete beta.
///
/// With `q = 2·min(p, 1−p)` the two-sided tail mass, `|t|` solves
/// `I_{ν/(ν+t²)}(ν/2, ½) = q`. For `q ≥ ½` the complementary form
/// `I_{t²/(ν+t²)}(½, ν/2) = 1 − q` is inverted instead so that small `|t|`
/// keeps its precision.
pub fn ppf(p: f64, df: f64) -> f64 {
    if !valid(df) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }
    let q = 2.0 * p.min(1.0 - p);
    let t2 = if q < 0.5 {
        let x = special::iregularized_incomplete_beta(df / 2.0, 0.5, q);
        df * (1.0 - x) / x
    } else {
        let y = special::iregularized_incomplete_beta(0.5, df / 2.0, 1.0 - q);
        df * y / (1.0 - y)
    };
    let t = t2.sqrt();
    if p < 0.5 {
        -t
    } else {
        t
    }
}

/// Inverse survival function by symmetry, `−F⁻¹(p)`.
pub fn isf(p: f64, df: f64) -> f64 {
    -ppf(p, df)
}

pub fn moments(df: f64) -> Moments {
    if !valid(df) {
        return Moments::UNDEFINED;
    }
    let mean = if df > 1.0 { 0.0 } else { f64::NAN };
    let variance = if df > 2.0 {
        df / (df - 2.0)
    } else if df > 1.0 {
        f64::INFINITY
    } else {
        f64::NAN
    };
    let skew = if df > 3.0 { 0.0 } else { f64::NAN };
    let kurtosis = if df > 4.0 {
        6.0 / (df - 4.0)
    } else if df > 2.0 {
        f64::INFINITY
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

pub fn stats(selector: MomentSelector, df: f64) -> Stats {
    Stats::select(&moments(df), selector)
}

/// One variate by Bailey's polar method.
///
/// A point `(u, v)` is drawn uniformly in the unit disc and mapped to
/// `u·√(ν(w^{−2/ν} − 1)/w)` with `w = u² + v²`.
///
/// Reference: Bailey (1994), "Polar Generation of Random Variates with
/// the t-Distribution", *Mathematics of Computation* 62(206).
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, df: f64) -> f64 {
    if !valid(df) {
        return f64::NAN;
    }
    loop {
        let u = 2.0 * rng.next_uniform() - 1.0;
        let v = 2.0 * rng.next_uniform() - 1.0;
        let w = u * u + v * v;
        if w > 0.0 && w < 1.0 {
            return u * (df * (w.powf(-2.0 / df) - 1.0) / w).sqrt();
        }
    }
}

/// Student's t distribution with `df` degrees of freedom.
///
/// # Examples
/// ```
/// use u_probability::distributions::{Distribution, MomentSelector, StudentsT};
/// let t = StudentsT::new(5.0);
/// assert_eq!(t.cdf(0.0), 0.5);
/// assert_eq!(t.stats(MomentSelector::VARIANCE).variance, Some(5.0 / 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentsT {
    df: f64,
}

impl StudentsT {
    pub fn new(df: f64) -> Self {
        Self { df }
    }

    pub fn df(&self) -> f64 {
        self.df
    }
}

impl Distribution for StudentsT {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.df)
    }

    fn pdf(&self, x: f64) -> f64 {
        pdf(x, self.df)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.df)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.df)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.df)
    }

    fn isf(&self, p: f64) -> f64 {
        isf(p, self.df)
    }

    fn moments(&self) -> Moments {
        moments(self.df)
    }
}
