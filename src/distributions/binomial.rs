//! Binomial distribution: successes in `n` independent trials with
//! success probability `p`.
//!
//! # Mathematical Definition
//! - PMF: P(X = k) = C(n, k)·pᵏ·(1−p)ⁿ⁻ᵏ for k ∈ {0, …, n}
//! - CDF: F(k) = I_{1−p}(n − k, k + 1) (regularized incomplete beta)
//! - Mean: np, Variance: np(1−p)
//!
//! Reference: Johnson, Kemp & Kotz (2005), *Univariate Discrete
//! Distributions*, 3rd ed., Chapter 3.

use super::{is_probability, Distribution, MomentSelector, Moments, Stats};
use crate::random::RandomSource;
use crate::special;

/// Below this log-probability `(1−p)ⁿ` underflows and sequential search
/// from zero is abandoned for bisection on the CDF.
const SEQUENTIAL_LN_FLOOR: f64 = -700.0;

/// Support point `k` if `x` is an integer in `[0, n]`.
fn support_point(x: f64, n: u64) -> Option<u64> {
    (x >= 0.0 && x <= n as f64 && x == x.trunc()).then_some(x as u64)
}

/// Probability mass at `x`; zero off the integers in `[0, n]`.
pub fn pmf(x: f64, n: u64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    let Some(k) = support_point(x, n) else {
        return 0.0;
    };
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    // C(n, 0) = C(n, n) = 1 exactly; ln_gamma(1) carries rounding.
    let ln_choose = if k == 0 || k == n {
        0.0
    } else {
        let (n, k) = (n as f64, k as f64);
        special::ln_gamma(n + 1.0) - special::ln_gamma(k + 1.0) - special::ln_gamma(n - k + 1.0)
    };
    let (n, k) = (n as f64, k as f64);
    (ln_choose + k * p.ln() + (n - k) * (-p).ln_1p()).exp()
}

pub fn cdf(x: f64, n: u64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x >= n as f64 {
        return 1.0;
    }
    let k = x.floor();
    special::regularized_incomplete_beta(n as f64 - k, k + 1.0, 1.0 - p)
}

/// `P(X > x) = I_p(k + 1, n − k)`, computed directly for tail precision.
pub fn sf(x: f64, n: u64, p: f64) -> f64 {
    if !is_probability(p) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 1.0;
    }
    if x >= n as f64 {
        return 0.0;
    }
    let k = x.floor();
    special::regularized_incomplete_beta(k + 1.0, n as f64 - k, p)
}

/// Smallest `k` with `F(k) ≥ q`, found by bisection over `[0, n]`.
pub fn ppf(q: f64, n: u64, p: f64) -> f64 {
    if !is_probability(p) || !is_probability(q) {
        return f64::NAN;
    }
    let (mut lo, mut hi) = (0_u64, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cdf(mid as f64, n, p) >= q {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo as f64
}

pub fn isf(q: f64, n: u64, p: f64) -> f64 {
    ppf(1.0 - q, n, p)
}

pub fn moments(n: u64, p: f64) -> Moments {
    if !is_probability(p) {
        return Moments::UNDEFINED;
    }
    let n = n as f64;
    let npq = n * p * (1.0 - p);
    if npq == 0.0 {
        // point mass: shape moments are 0/0
        return Moments {
            mean: n * p,
            variance: 0.0,
            skew: f64::NAN,
            kurtosis: f64::NAN,
        };
    }
    Moments {
        mean: n * p,
        variance: npq,
        skew: (1.0 - 2.0 * p) / npq.sqrt(),
        kurtosis: (1.0 - 6.0 * p * (1.0 - p)) / npq,
    }
}

pub fn stats(selector: MomentSelector, n: u64, p: f64) -> Stats {
    Stats::select(&moments(n, p), selector)
}

/// One variate by sequential inverse transform.
///
/// The mass is accumulated from `k = 0` with the recurrence
/// `P(k+1) = P(k)·(n−k)/(k+1)·p/(1−p)` until it exceeds one uniform draw.
/// When `(1−p)ⁿ` would underflow the same draw is inverted by [`ppf`].
pub fn rvs<R: RandomSource + ?Sized>(rng: &mut R, n: u64, p: f64) -> f64 {
    if !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return 0.0;
    }
    if p == 1.0 {
        return n as f64;
    }
    let u = rng.next_uniform();
    let ln_p0 = n as f64 * (-p).ln_1p();
    if ln_p0 < SEQUENTIAL_LN_FLOOR {
        return ppf(u, n, p);
    }

    let ratio = p / (1.0 - p);
    let mut mass = ln_p0.exp();
    let mut cumulative = mass;
    let mut k = 0_u64;
    while cumulative <= u && k < n {
        mass *= ratio * (n - k) as f64 / (k + 1) as f64;
        k += 1;
        cumulative += mass;
    }
    k as f64
}

/// Binomial distribution with `n` trials and success probability `p`.
///
/// # Examples
/// ```
/// use u_probability::distributions::{Binomial, Distribution};
/// let b = Binomial::new(10, 0.5);
/// assert!((b.pdf(5.0) - 0.24609375).abs() < 1e-12);
/// assert_eq!(b.ppf(0.5), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    pub fn new(n: u64, p: f64) -> Self {
        Self { n, p }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution for Binomial {
    fn rvs<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rvs(rng, self.n, self.p)
    }

    fn pdf(&self, x: f64) -> f64 {
        pmf(x, self.n, self.p)
    }

    fn cdf(&self, x: f64) -> f64 {
        cdf(x, self.n, self.p)
    }

    fn sf(&self, x: f64) -> f64 {
        sf(x, self.n, self.p)
    }

    fn ppf(&self, p: f64) -> f64 {
        ppf(p, self.n, self.p)
    }

    fn moments(&self) -> Moments {
        moments(self.n, self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats::chi_squared_gof;

    #[test]
    fn test_pmf_known_values() {
        assert!((pmf(2.0, 10, 0.3) - 0.2334744405).abs() < 1e-10);
        assert!((pmf(0.0, 5, 0.5) - 1.0 / 32.0).abs() < 1e-15);
        assert_eq!(pmf(2.5, 10, 0.3), 0.0);
        assert_eq!(pmf(-1.0, 10, 0.3), 0.0);
        assert_eq!(pmf(11.0, 10, 0.3), 0.0);
    }

    #[test]
    fn test_pmf_endpoints_exact() {
        assert_eq!(pmf(0.0, 0, 0.3), 1.0);
        assert!((pmf(0.0, 3, 0.5) - 0.125).abs() < 1e-16);
        assert!((pmf(3.0, 3, 0.5) - 0.125).abs() < 1e-16);
        assert!(pmf(0.0, 40, 0.7) <= 1.0);
    }

    #[test]
    fn test_pmf_sums_to_one() {
        let total: f64 = (0..=30).map(|k| pmf(k as f64, 30, 0.37)).sum();
        assert!((total - 1.0).abs() < 1e-12, "total = {total}");
    }

    #[test]
    fn test_cdf_matches_summed_mass() {
        let (n, p) = (12, 0.4);
        let mut running = 0.0;
        for k in 0..=n {
            running += pmf(k as f64, n, p);
            let c = cdf(k as f64, n, p);
            assert!((c - running).abs() < 1e-12, "k = {k}: {c} vs {running}");
        }
        assert!((cdf(3.0, 10, 0.3) - 0.6496107184).abs() < 1e-10);
        // right-continuous steps
        assert_eq!(cdf(3.7, 10, 0.3), cdf(3.0, 10, 0.3));
    }

    #[test]
    fn test_degenerate_probabilities() {
        assert_eq!(pmf(0.0, 8, 0.0), 1.0);
        assert_eq!(pmf(8.0, 8, 1.0), 1.0);
        assert_eq!(cdf(0.0, 8, 0.0), 1.0);
        assert_eq!(cdf(7.0, 8, 1.0), 0.0);
        assert_eq!(rvs(&mut create_rng(1), 8, 1.0), 8.0);
        assert_eq!(ppf(0.5, 8, 0.0), 0.0);
        assert_eq!(ppf(0.5, 8, 1.0), 8.0);
    }

    #[test]
    fn test_invalid_probability() {
        assert!(pmf(1.0, 4, 1.5).is_nan());
        assert!(cdf(1.0, 4, -0.1).is_nan());
        assert!(moments(4, f64::NAN).mean.is_nan());
    }

    #[test]
    fn test_ppf_is_smallest_k() {
        let (n, p) = (25, 0.6);
        for &q in &[0.0, 0.01, 0.2, 0.5, 0.8, 0.999, 1.0] {
            let k = ppf(q, n, p);
            assert!(cdf(k, n, p) >= q);
            if k > 0.0 {
                assert!(cdf(k - 1.0, n, p) < q, "q = {q}, k = {k}");
            }
        }
    }

    #[test]
    fn test_moments() {
        let m = moments(10, 0.5);
        assert_eq!(m.mean, 5.0);
        assert_eq!(m.variance, 2.5);
        assert_eq!(m.skew, 0.0);
        assert!((m.kurtosis + 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_point_mass_moments() {
        for (n, p) in [(0, 0.3), (7, 0.0), (7, 1.0)] {
            let m = moments(n, p);
            assert_eq!(m.mean, n as f64 * p);
            assert_eq!(m.variance, 0.0);
            assert!(m.skew.is_nan(), "n = {n}, p = {p}");
            assert!(m.kurtosis.is_nan(), "n = {n}, p = {p}");
        }
    }

    #[test]
    fn test_cdf_monotone_for_huge_n() {
        let (n, p) = (20_000_000, 0.5);
        let centre = 10_000_000.0;
        let mut prev = cdf(centre - 4.0, n, p);
        for k in -3..=4 {
            let c = cdf(centre + k as f64, n, p);
            assert!(c > prev, "cdf decreased at k = {}: {c} < {prev}", centre + k as f64);
            prev = c;
        }
        // 1/2 + P(X = n/2)/2
        let mid = cdf(centre, n, p);
        assert!((mid - 0.5000892062046926).abs() < 1e-6, "cdf(n/2) = {mid}");
    }

    #[test]
    fn test_sampling_goodness_of_fit() {
        let (n, p) = (12, 0.35);
        let draws = 20_000;
        let mut rng = create_rng(2024);
        let mut observed = vec![0.0; n as usize + 1];
        for _ in 0..draws {
            observed[rvs(&mut rng, n, p) as usize] += 1.0;
        }
        // pool the sparse upper tail into one cell
        let tail: f64 = observed[9..].iter().sum();
        observed.truncate(9);
        observed.push(tail);
        let mut expected: Vec<f64> = (0..9).map(|k| pmf(k as f64, n, p) * draws as f64).collect();
        expected.push(sf(8.0, n, p) * draws as f64);

        let gof = chi_squared_gof(&observed, &expected).unwrap();
        assert!(gof.p_value > 0.001, "χ² = {}, p = {}", gof.statistic, gof.p_value);
    }

    #[test]
    fn test_large_n_sampling_falls_back_to_bisection() {
        let (n, p) = (100_000, 0.5);
        let mut rng = create_rng(5);
        let xs: Vec<f64> = (0..200).map(|_| rvs(&mut rng, n, p)).collect();
        assert!(xs.iter().all(|&x| (48_000.0..=52_000.0).contains(&x)));
    }
}
