//! Sample statistics used to check variate generators against their
//! distributions.
//!
//! # Algorithms
//!
//! - **Sum / mean**: Neumaier compensated summation, O(ε) error
//!   independent of n.
//! - **Variance and higher moments**: one-pass central moment sums,
//!   updated by Pébay's pairwise combination (Welford's recurrence when
//!   one side holds a single point).
//! - **Goodness of fit**: Pearson's chi-square test, p-value from the
//!   regularized upper incomplete gamma.

use crate::distributions::Moments;
use crate::special;

/// Neumaier compensated summation.
///
/// An improved Kahan summation that also handles addends larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
///
/// # Examples
/// ```
/// use u_probability::stats::kahan_sum;
/// assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Arithmetic mean by compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_probability::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (denominator `n − 1`) by Welford's algorithm.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_probability::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    MomentAccumulator::from_slice(data).sample_variance()
}

/// Sample mean, variance, skewness and excess kurtosis in one pass.
///
/// Skewness and kurtosis carry the usual small-sample bias corrections
/// (G₁ and G₂), so they are directly comparable with a distribution's
/// [`Moments`].
///
/// # Returns
/// - `None` if `data.len() < 4`, if it contains NaN/Inf, or if all values
///   are equal.
pub fn sample_moments(data: &[f64]) -> Option<Moments> {
    if data.len() < 4 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let acc = MomentAccumulator::from_slice(data);
    Some(Moments {
        mean: acc.mean()?,
        variance: acc.sample_variance()?,
        skew: acc.skewness()?,
        kurtosis: acc.kurtosis()?,
    })
}

/// Streaming accumulator for the first four sample moments.
///
/// Two accumulators over disjoint data combine exactly with [`merge`],
/// so partial results from separate chunks can be pooled; feeding a
/// single observation is a merge with a one-point accumulator.
///
/// References:
/// - Welford (1962), *Technometrics* 4(3), pp. 419–420.
/// - Pébay (2008), "Formulas for Robust, One-Pass Parallel Computation
///   of Covariances and Arbitrary-Order Statistical Moments",
///   Sandia Report SAND2008-6212, eqs. 3.1 and 3.3.
///
/// [`merge`]: MomentAccumulator::merge
///
/// # Examples
/// ```
/// use u_probability::stats::MomentAccumulator;
/// let mut left = MomentAccumulator::from_slice(&[2.0, 4.0, 4.0, 4.0]);
/// let right = MomentAccumulator::from_slice(&[5.0, 5.0, 7.0, 9.0]);
/// left.merge(&right);
/// assert_eq!(left.count(), 8);
/// assert_eq!(left.mean(), Some(5.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MomentAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl MomentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.update(x);
        }
        acc
    }

    /// Feeds one observation.
    pub fn update(&mut self, value: f64) {
        self.merge(&Self {
            count: 1,
            mean: value,
            ..Self::default()
        });
    }

    /// Pools the observations summarized by `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            // Copying avoids squaring a huge `delta` against an empty side.
            *self = other.clone();
            return;
        }

        let (na, nb) = (self.count as f64, other.count as f64);
        let n = na + nb;
        let delta = other.mean - self.mean;
        let d_n = delta / n;
        let cross = delta * d_n * na * nb;

        let m4 = self.m4
            + other.m4
            + cross * d_n * d_n * (na * na - na * nb + nb * nb)
            + 6.0 * d_n * d_n * (na * na * other.m2 + nb * nb * self.m2)
            + 4.0 * d_n * (na * other.m3 - nb * self.m3);
        let m3 = self.m3
            + other.m3
            + cross * d_n * (na - nb)
            + 3.0 * d_n * (na * other.m2 - nb * self.m2);
        let m2 = self.m2 + other.m2 + cross;

        self.count += other.count;
        self.mean += d_n * nb;
        self.m2 = m2;
        self.m3 = m3;
        self.m4 = m4;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Variance with Bessel's correction; `None` below two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Adjusted Fisher–Pearson skewness G₁.
    pub fn skewness(&self) -> Option<f64> {
        if self.count < 3 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        let g1 = n.sqrt() * self.m3 / self.m2.powf(1.5);
        Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
    }

    /// Bias-corrected excess kurtosis G₂ (0 for normal data).
    pub fn kurtosis(&self) -> Option<f64> {
        if self.count < 4 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        let g2 = n * self.m4 / (self.m2 * self.m2) - 3.0;
        Some((n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0))
    }
}

/// Result of [`chi_squared_gof`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodnessOfFit {
    /// Pearson's statistic Σ (O − E)² / E.
    pub statistic: f64,
    /// Degrees of freedom, `k − 1` for `k` cells.
    pub df: usize,
    /// Probability of a statistic at least this large under the null.
    pub p_value: f64,
}

/// Pearson's chi-square goodness-of-fit test.
///
/// Compares observed cell counts with the counts expected under a
/// hypothesized distribution. The p-value is `Q((k−1)/2, χ²/2)`, the upper
/// tail of the χ² distribution with `k − 1` degrees of freedom.
///
/// # Returns
/// - `None` if the slices are empty, differ in length, contain NaN/Inf,
///   or any expected count is not positive.
///
/// # Examples
/// ```
/// use u_probability::stats::chi_squared_gof;
/// let gof = chi_squared_gof(&[48.0, 52.0], &[50.0, 50.0]).unwrap();
/// assert!((gof.statistic - 0.16).abs() < 1e-12);
/// assert_eq!(gof.df, 1);
/// assert!(gof.p_value > 0.6);
/// ```
pub fn chi_squared_gof(observed: &[f64], expected: &[f64]) -> Option<GoodnessOfFit> {
    if observed.is_empty() || observed.len() != expected.len() {
        return None;
    }
    if !observed.iter().all(|o| o.is_finite())
        || !expected.iter().all(|&e| e.is_finite() && e > 0.0)
    {
        return None;
    }

    let terms: Vec<f64> = observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| (o - e) * (o - e) / e)
        .collect();
    let statistic = kahan_sum(&terms);
    let df = observed.len() - 1;
    let p_value = if df == 0 {
        // A single cell carries no information.
        1.0
    } else {
        special::regularized_upper_gamma(df as f64 / 2.0, statistic / 2.0)
    };
    Some(GoodnessOfFit {
        statistic,
        df,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum_compensates() {
        let data = vec![0.1; 10_000];
        assert!((kahan_sum(&data) - 1000.0).abs() < 1e-10);
        assert_eq!(kahan_sum(&[]), 0.0);
    }

    #[test]
    fn test_mean_edge_cases() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, f64::NAN]), None);
        assert_eq!(mean(&[1.0, f64::INFINITY]), None);
        assert_eq!(mean(&[7.0]), Some(7.0));
    }

    #[test]
    fn test_variance_edge_cases() {
        assert_eq!(variance(&[1.0]), None);
        assert_eq!(variance(&[1.0, f64::NAN, 2.0]), None);
        assert_eq!(variance(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn test_variance_large_offset() {
        // Naive E[X²] − E[X]² loses every digit here.
        let data: Vec<f64> = (0..100).map(|i| 1e9 + (i % 2) as f64).collect();
        let v = variance(&data).unwrap();
        assert!((v - 0.25 * 100.0 / 99.0).abs() < 1e-9, "variance = {v}");
    }

    #[test]
    fn test_sample_moments_symmetric() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let m = sample_moments(&data).unwrap();
        assert_eq!(m.mean, 3.0);
        assert!((m.variance - 2.5).abs() < 1e-12);
        assert!(m.skew.abs() < 1e-12);
        // G₂ of five equally spaced points is −1.2
        assert!((m.kurtosis + 1.2).abs() < 1e-12, "kurtosis = {}", m.kurtosis);
    }

    #[test]
    fn test_sample_moments_right_skew() {
        let m = sample_moments(&[1.0, 1.0, 1.0, 1.0, 10.0]).unwrap();
        assert!(m.skew > 0.0);
        assert!(sample_moments(&[2.0; 6]).is_none());
        assert!(sample_moments(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_accumulator_matches_batch() {
        let data = [3.5, -1.0, 8.25, 0.0, 2.0, 2.0, 11.0];
        let acc = MomentAccumulator::from_slice(&data);
        assert_eq!(acc.count(), 7);
        assert!((acc.mean().unwrap() - mean(&data).unwrap()).abs() < 1e-14);
        assert_eq!(MomentAccumulator::new().mean(), None);
        assert_eq!(MomentAccumulator::new().sample_variance(), None);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let data: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64 * 0.75 - 2.0).collect();
        let whole = MomentAccumulator::from_slice(&data);
        let mut pooled = MomentAccumulator::from_slice(&data[..13]);
        pooled.merge(&MomentAccumulator::from_slice(&data[13..]));
        pooled.merge(&MomentAccumulator::new());

        assert_eq!(pooled.count(), whole.count());
        let close = |a: Option<f64>, b: Option<f64>| (a.unwrap() - b.unwrap()).abs() < 1e-10;
        assert!(close(pooled.mean(), whole.mean()));
        assert!(close(pooled.sample_variance(), whole.sample_variance()));
        assert!(close(pooled.skewness(), whole.skewness()));
        assert!(close(pooled.kurtosis(), whole.kurtosis()));
    }

    #[test]
    fn test_merge_into_empty() {
        let mut acc = MomentAccumulator::new();
        acc.merge(&MomentAccumulator::from_slice(&[1.0, 3.0]));
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.mean(), Some(2.0));
        assert_eq!(acc.sample_variance(), Some(2.0));
    }

    #[test]
    fn test_gof_perfect_fit() {
        let gof = chi_squared_gof(&[10.0, 20.0, 30.0], &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(gof.statistic, 0.0);
        assert_eq!(gof.df, 2);
        assert_eq!(gof.p_value, 1.0);
    }

    #[test]
    fn test_gof_known_p_value() {
        // df = 2: p = exp(−χ²/2)
        let gof = chi_squared_gof(&[30.0, 10.0, 20.0], &[20.0, 20.0, 20.0]).unwrap();
        assert!((gof.statistic - 10.0).abs() < 1e-12);
        assert!((gof.p_value - (-5.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_gof_rejects_bad_input() {
        assert!(chi_squared_gof(&[], &[]).is_none());
        assert!(chi_squared_gof(&[1.0, 2.0], &[1.0]).is_none());
        assert!(chi_squared_gof(&[1.0, 2.0], &[1.0, 0.0]).is_none());
        assert!(chi_squared_gof(&[1.0, f64::NAN], &[1.0, 1.0]).is_none());
    }

    #[test]
    fn test_gof_single_cell() {
        let gof = chi_squared_gof(&[5.0], &[5.0]).unwrap();
        assert_eq!(gof.df, 0);
        assert_eq!(gof.p_value, 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn mean_within_range(data in proptest::collection::vec(-1e6_f64..1e6, 1..100)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-9 && m <= hi + 1e-9);
        }

        #[test]
        fn variance_non_negative(data in proptest::collection::vec(-1e6_f64..1e6, 2..100)) {
            prop_assert!(variance(&data).unwrap() >= 0.0);
        }

        #[test]
        fn gof_p_value_in_unit_interval(
            cells in proptest::collection::vec((0.0_f64..100.0, 0.5_f64..100.0), 2..20),
        ) {
            let (observed, expected): (Vec<f64>, Vec<f64>) = cells.into_iter().unzip();
            let gof = chi_squared_gof(&observed, &expected).unwrap();
            prop_assert!(gof.statistic >= 0.0);
            prop_assert!((0.0..=1.0).contains(&gof.p_value));
        }
    }
}
