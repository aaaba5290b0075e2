//! Probability distributions.
//!
//! Each family lives in its own module and exposes its formulas twice:
//! as pure free functions taking the parameters explicitly
//! (`normal::cdf(x, loc, scale)`), and as a small `Copy` parameter struct
//! implementing [`Distribution`] by delegating to those functions.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Support | Variates |
//! |---|---|---|---|
//! | [`ContinuousUniform`] | low, high | [low, high] | inverse CDF |
//! | [`Normal`] | loc μ, scale σ | ℝ | Box–Muller |
//! | [`Levy`] | loc μ, scale c | (μ, ∞) | μ + c/Z² |
//! | [`Pareto`] | shape α, scale xₘ | [xₘ, ∞) | inverse CDF |
//! | [`StudentsT`] | df ν | ℝ | Bailey's polar method |
//! | [`Exponential`] | rate λ | [0, ∞) | inverse CDF |
//! | [`Cauchy`] | loc, scale γ | ℝ | inverse CDF |
//! | [`Binomial`] | n, p | {0, …, n} | sequential inverse transform |
//! | [`Bernoulli`] | p | {0, 1} | threshold |
//! | [`DiscreteUniform`] | low, high | {low, …, high} | inverse CDF |
//!
//! # Conventions
//!
//! - Constructors do not validate. Parameters outside a family's domain
//!   make every query return `NaN`.
//! - Discrete families take `x: f64`; the mass is zero off the integers
//!   and the CDF is a right-continuous step function.
//! - `ppf` of a discrete family returns the smallest support point `k`
//!   with `cdf(k) ≥ p`.

pub mod bernoulli;
pub mod binomial;
pub mod cauchy;
pub mod discrete_uniform;
pub mod exponential;
pub mod levy;
mod moments;
pub mod normal;
pub mod pareto;
pub mod students_t;
pub mod uniform;

pub use bernoulli::Bernoulli;
pub use binomial::Binomial;
pub use cauchy::Cauchy;
pub use discrete_uniform::DiscreteUniform;
pub use exponential::Exponential;
pub use levy::Levy;
pub use moments::{MomentSelector, MomentSelectorError, Moments, Stats};
pub use normal::Normal;
pub use pareto::Pareto;
pub use students_t::StudentsT;
pub use uniform::ContinuousUniform;

use crate::random::RandomSource;

/// Common interface of every distribution.
///
/// `sf`, `isf`, `stats` and `sample` have default implementations in
/// terms of the required methods; families override `sf`/`isf` where a
/// direct formula is more accurate in the tail.
pub trait Distribution {
    /// Draws one variate.
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64;

    /// Density (continuous) or mass (discrete) at `x`; zero off the support.
    fn pdf(&self, x: f64) -> f64;

    /// `P(X ≤ x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Survival function `P(X > x)`.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse of [`cdf`](Self::cdf) on `[0, 1]`; `NaN` outside.
    fn ppf(&self, p: f64) -> f64;

    /// Inverse of [`sf`](Self::sf).
    fn isf(&self, p: f64) -> f64 {
        self.ppf(1.0 - p)
    }

    /// Closed-form mean, variance, skew and excess kurtosis.
    fn moments(&self) -> Moments;

    /// The moments named by `selector`.
    fn stats(&self, selector: MomentSelector) -> Stats {
        Stats::select(&self.moments(), selector)
    }

    /// Draws `n` independent variates.
    fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.rvs(rng)).collect()
    }
}

/// Any of the crate's distributions, for heterogeneous collections.
///
/// [`Distribution`] has generic methods and so cannot be used as a trait
/// object; this enum stands in for `dyn Distribution`.
///
/// # Examples
/// ```
/// use u_probability::distributions::{AnyDistribution, Distribution, Normal, Pareto};
/// let models: Vec<AnyDistribution> = vec![
///     Normal::new(0.0, 1.0).into(),
///     Pareto::new(3.0, 1.0).into(),
/// ];
/// for d in &models {
///     assert!((d.cdf(d.ppf(0.5)) - 0.5).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyDistribution {
    ContinuousUniform(ContinuousUniform),
    Normal(Normal),
    Levy(Levy),
    Pareto(Pareto),
    StudentsT(StudentsT),
    Exponential(Exponential),
    Cauchy(Cauchy),
    Binomial(Binomial),
    Bernoulli(Bernoulli),
    DiscreteUniform(DiscreteUniform),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            AnyDistribution::ContinuousUniform($d) => $body,
            AnyDistribution::Normal($d) => $body,
            AnyDistribution::Levy($d) => $body,
            AnyDistribution::Pareto($d) => $body,
            AnyDistribution::StudentsT($d) => $body,
            AnyDistribution::Exponential($d) => $body,
            AnyDistribution::Cauchy($d) => $body,
            AnyDistribution::Binomial($d) => $body,
            AnyDistribution::Bernoulli($d) => $body,
            AnyDistribution::DiscreteUniform($d) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AnyDistribution {
                fn from(d: $variant) -> Self {
                    AnyDistribution::$variant(d)
                }
            }
        )*
    };
}

impl_from!(
    ContinuousUniform,
    Normal,
    Levy,
    Pareto,
    StudentsT,
    Exponential,
    Cauchy,
    Binomial,
    Bernoulli,
    DiscreteUniform,
);

impl AnyDistribution {
    /// Family name, e.g. `"normal"`.
    pub fn name(&self) -> &'static str {
        match self {
            AnyDistribution::ContinuousUniform(_) => "uniform",
            AnyDistribution::Normal(_) => "normal",
            AnyDistribution::Levy(_) => "levy",
            AnyDistribution::Pareto(_) => "pareto",
            AnyDistribution::StudentsT(_) => "students_t",
            AnyDistribution::Exponential(_) => "exponential",
            AnyDistribution::Cauchy(_) => "cauchy",
            AnyDistribution::Binomial(_) => "binomial",
            AnyDistribution::Bernoulli(_) => "bernoulli",
            AnyDistribution::DiscreteUniform(_) => "discrete_uniform",
        }
    }

    /// True for families supported on the integers.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            AnyDistribution::Binomial(_)
                | AnyDistribution::Bernoulli(_)
                | AnyDistribution::DiscreteUniform(_)
        )
    }
}

impl Distribution for AnyDistribution {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        dispatch!(self, d => d.rvs(rng))
    }

    fn pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.pdf(x))
    }

    fn cdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cdf(x))
    }

    fn sf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.sf(x))
    }

    fn ppf(&self, p: f64) -> f64 {
        dispatch!(self, d => d.ppf(p))
    }

    fn isf(&self, p: f64) -> f64 {
        dispatch!(self, d => d.isf(p))
    }

    fn moments(&self) -> Moments {
        dispatch!(self, d => d.moments())
    }
}

/// `p ∈ [0, 1]`, rejecting NaN.
#[inline]
pub(crate) fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    pub(super) fn zoo() -> Vec<AnyDistribution> {
        vec![
            ContinuousUniform::new(-2.0, 3.0).into(),
            Normal::new(1.5, 2.0).into(),
            Levy::new(0.5, 2.0).into(),
            Pareto::new(2.5, 1.5).into(),
            StudentsT::new(4.0).into(),
            StudentsT::new(0.7).into(),
            Exponential::new(0.5).into(),
            Cauchy::new(-1.0, 0.5).into(),
            Binomial::new(20, 0.3).into(),
            Bernoulli::new(0.25).into(),
            DiscreteUniform::new(-3, 4).into(),
        ]
    }

    #[test]
    fn test_names_and_discreteness() {
        let names: Vec<_> = zoo().iter().map(|d| d.name()).collect();
        assert!(names.contains(&"students_t"));
        let discrete = zoo().iter().filter(|d| d.is_discrete()).count();
        assert_eq!(discrete, 3);
    }

    #[test]
    fn test_cdf_plus_sf_is_one() {
        for d in zoo() {
            for &x in &[-10.0, -2.5, -1.0, 0.0, 0.3, 1.0, 2.0, 3.5, 7.0, 25.0] {
                let total = d.cdf(x) + d.sf(x);
                assert!(
                    (total - 1.0).abs() < 1e-12,
                    "{}: cdf + sf = {total} at x = {x}",
                    d.name()
                );
            }
        }
    }

    #[test]
    fn test_cdf_monotone_and_pdf_nonnegative() {
        for d in zoo() {
            let mut prev = 0.0;
            for i in 0..=400 {
                let x = -20.0 + 0.1 * i as f64;
                let c = d.cdf(x);
                assert!((0.0..=1.0).contains(&c), "{}: cdf({x}) = {c}", d.name());
                assert!(c >= prev - 1e-15, "{}: cdf decreased at {x}", d.name());
                assert!(d.pdf(x) >= 0.0, "{}: pdf({x}) < 0", d.name());
                prev = c;
            }
        }
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        for d in zoo() {
            for &p in &[0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99] {
                let x = d.ppf(p);
                if d.is_discrete() {
                    assert!(d.cdf(x) >= p, "{}: cdf(ppf({p})) < p", d.name());
                    assert!(d.cdf(x - 1.0) < p, "{}: ppf({p}) not minimal", d.name());
                } else {
                    let back = d.cdf(x);
                    assert!(
                        (back - p).abs() < 1e-8,
                        "{}: cdf(ppf({p})) = {back}",
                        d.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_isf_inverts_sf() {
        for d in zoo().into_iter().filter(|d| !d.is_discrete()) {
            for &p in &[0.05, 0.5, 0.95] {
                let x = d.isf(p);
                assert!((d.sf(x) - p).abs() < 1e-8, "{}: sf(isf({p}))", d.name());
            }
        }
    }

    #[test]
    fn test_ppf_rejects_non_probabilities() {
        for d in zoo() {
            assert!(d.ppf(-0.1).is_nan(), "{}", d.name());
            assert!(d.ppf(1.1).is_nan(), "{}", d.name());
            assert!(d.ppf(f64::NAN).is_nan(), "{}", d.name());
        }
    }

    #[test]
    fn test_samples_fall_in_support() {
        let mut rng = create_rng(99);
        for d in zoo() {
            for x in d.sample(&mut rng, 500) {
                assert!(!x.is_nan(), "{}: NaN variate", d.name());
                assert!(d.pdf(x) > 0.0 || x.is_infinite(), "{}: {x} off support", d.name());
            }
        }
    }

    #[test]
    fn test_stats_respects_selector() {
        for d in zoo() {
            let s = d.stats(MomentSelector::MEAN | MomentSelector::KURTOSIS);
            assert!(s.mean.is_some() && s.kurtosis.is_some());
            assert!(s.variance.is_none() && s.skew.is_none());
        }
    }

    #[test]
    fn test_sample_is_reproducible() {
        let d = AnyDistribution::from(Normal::new(0.0, 1.0));
        let a = d.sample(&mut create_rng(5), 16);
        let b = d.sample(&mut create_rng(5), 16);
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn cdf_and_sf_complement(x in -50.0_f64..50.0, idx in 0_usize..11) {
            let d = tests::zoo()[idx];
            prop_assert!((d.cdf(x) + d.sf(x) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn continuous_ppf_round_trip(p in 0.001_f64..0.999, idx in 0_usize..8) {
            let d = tests::zoo()[idx];
            let back = d.cdf(d.ppf(p));
            prop_assert!((back - p).abs() < 1e-8, "{}: p={} back={}", d.name(), p, back);
        }

        #[test]
        fn cdf_monotone(a in -30.0_f64..30.0, b in -30.0_f64..30.0, idx in 0_usize..11) {
            let d = tests::zoo()[idx];
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(d.cdf(lo) <= d.cdf(hi) + 1e-15);
        }
    }
}
