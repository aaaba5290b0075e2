//! K-means clustering over the rows of a [`Matrix`].
//!
//! # Algorithm
//!
//! 1. Seed `k` centres with k-means++: the first uniformly at random, each
//!    further one with probability proportional to its squared distance
//!    from the nearest centre already chosen.
//! 2. Assign every point to its nearest centre (ties go to the lower index).
//! 3. Move each centre to the mean of its points. A centre that lost all
//!    its points is re-seeded with the point farthest from its own centre.
//! 4. Repeat 2–3 until the summed centre movement is at most
//!    `tolerance`, or `max_iter` rounds have run.
//!
//! Reference: Arthur & Vassilvitskii (2007), "k-means++: The Advantages
//! of Careful Seeding", *SODA '07*.

use std::fmt;

use tracing::{debug, trace};

use crate::matrix::{squared_euclidean, Matrix};
use crate::random::{self, RandomSource};

/// Error type for invalid clustering input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusteringError {
    /// The data matrix has no rows.
    EmptyData,
    /// `k` is zero or exceeds the number of points.
    InvalidK { k: usize, points: usize },
    /// A coordinate is NaN or infinite.
    NonFiniteData { row: usize, col: usize },
}

impl fmt::Display for ClusteringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusteringError::EmptyData => write!(f, "cannot cluster an empty data set"),
            ClusteringError::InvalidK { k, points } => {
                write!(f, "k must be in 1..={points}, got {k}")
            }
            ClusteringError::NonFiniteData { row, col } => {
                write!(f, "non-finite value at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for ClusteringError {}

/// Parameters of a [`kmeans`] run.
///
/// # Examples
/// ```
/// use u_probability::clustering::KMeansConfig;
/// let config = KMeansConfig::default().with_k(4).with_max_iter(50);
/// assert_eq!(config.k, 4);
/// assert_eq!(config.tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,
    /// Upper bound on Lloyd iterations.
    pub max_iter: usize,
    /// Convergence threshold on the summed Euclidean movement of centres.
    pub tolerance: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: 300,
            tolerance: 1e-8,
        }
    }
}

impl KMeansConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Outcome of a [`kmeans`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// `k × d` matrix of cluster centres.
    pub centroids: Matrix,
    /// Cluster index of every input row.
    pub labels: Vec<usize>,
    /// Sum of squared distances from each point to its centre.
    pub inertia: f64,
    /// Lloyd iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was met before `max_iter`.
    pub converged: bool,
}

impl KMeansResult {
    /// Index of the centre nearest to `point`.
    pub fn predict(&self, point: &[f64]) -> usize {
        nearest(&self.centroids, point).0
    }

    /// Number of points assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.rows()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Clusters the rows of `data` into `config.k` groups.
///
/// # Errors
/// [`ClusteringError`] if `data` is empty, contains NaN/Inf, or `k` is
/// not in `1..=rows`.
///
/// # Examples
/// ```
/// use u_probability::clustering::{kmeans, KMeansConfig};
/// use u_probability::matrix::Matrix;
/// use u_probability::random::create_rng;
///
/// let data = Matrix::from_rows(&[
///     vec![0.0, 0.0], vec![0.1, 0.0], vec![0.0, 0.1],
///     vec![5.0, 5.0], vec![5.1, 5.0], vec![5.0, 5.1],
/// ]).unwrap();
/// let result = kmeans(&data, &KMeansConfig::default(), &mut create_rng(1)).unwrap();
/// assert_eq!(result.labels[0], result.labels[2]);
/// assert_ne!(result.labels[0], result.labels[3]);
/// assert!(result.converged);
/// ```
pub fn kmeans<R: RandomSource + ?Sized>(
    data: &Matrix,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult, ClusteringError> {
    validate(data, config.k)?;

    let n = data.rows();
    let mut centroids = seed_plus_plus(data, config.k, rng);
    let mut labels = vec![0; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        assign(data, &centroids, &mut labels);
        let updated = recompute(data, &centroids, &mut labels);
        let shift: f64 = (0..config.k)
            .map(|j| squared_euclidean(centroids.row(j), updated.row(j)).sqrt())
            .sum();
        centroids = updated;
        trace!(iteration = iterations, shift, "k-means iteration");
        if shift <= config.tolerance {
            converged = true;
            break;
        }
    }

    let inertia = assign(data, &centroids, &mut labels);
    debug!(k = config.k, points = n, iterations, inertia, converged, "k-means finished");

    Ok(KMeansResult {
        centroids,
        labels,
        inertia,
        iterations,
        converged,
    })
}

fn validate(data: &Matrix, k: usize) -> Result<(), ClusteringError> {
    if data.rows() == 0 {
        return Err(ClusteringError::EmptyData);
    }
    if k == 0 || k > data.rows() {
        return Err(ClusteringError::InvalidK {
            k,
            points: data.rows(),
        });
    }
    for (row, values) in data.iter_rows().enumerate() {
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClusteringError::NonFiniteData { row, col });
        }
    }
    Ok(())
}

/// k-means++ seeding.
fn seed_plus_plus<R: RandomSource + ?Sized>(data: &Matrix, k: usize, rng: &mut R) -> Matrix {
    let n = data.rows();
    let mut centroids = Matrix::zeros(k, data.cols());
    let first = random::uniform_index(n, rng);
    centroids.row_mut(0).copy_from_slice(data.row(first));

    let mut d2: Vec<f64> = data
        .iter_rows()
        .map(|p| squared_euclidean(p, data.row(first)))
        .collect();
    for j in 1..k {
        // `None` when every point coincides with a centre; any choice is as good.
        let next =
            random::weighted_choose(&d2, rng).unwrap_or_else(|| random::uniform_index(n, rng));
        centroids.row_mut(j).copy_from_slice(data.row(next));
        for (i, p) in data.iter_rows().enumerate() {
            d2[i] = d2[i].min(squared_euclidean(p, data.row(next)));
        }
    }
    centroids
}

/// Nearest centre to `point` and the squared distance to it.
fn nearest(centroids: &Matrix, point: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, c) in centroids.iter_rows().enumerate() {
        let d = squared_euclidean(point, c);
        if d < best.1 {
            best = (j, d);
        }
    }
    best
}

/// Assigns each point to its nearest centre and returns the inertia.
fn assign(data: &Matrix, centroids: &Matrix, labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (i, p) in data.iter_rows().enumerate() {
        let (j, d) = nearest(centroids, p);
        labels[i] = j;
        inertia += d;
    }
    inertia
}

/// Means of the current clusters, re-seeding empty ones.
fn recompute(data: &Matrix, centroids: &Matrix, labels: &mut [usize]) -> Matrix {
    let k = centroids.rows();
    let mut counts = vec![0_usize; k];
    for &label in labels.iter() {
        counts[label] += 1;
    }

    if counts.contains(&0) {
        let mut spread: Vec<f64> = data
            .iter_rows()
            .zip(labels.iter())
            .map(|(p, &label)| squared_euclidean(p, centroids.row(label)))
            .collect();
        for j in 0..k {
            if counts[j] > 0 {
                continue;
            }
            // Farthest point whose cluster can spare it.
            let donor = (0..labels.len())
                .filter(|&i| counts[labels[i]] > 1)
                .max_by(|&a, &b| spread[a].total_cmp(&spread[b]));
            let Some(i) = donor else {
                break;
            };
            debug!(cluster = j, point = i, "re-seeding empty cluster");
            counts[labels[i]] -= 1;
            counts[j] = 1;
            labels[i] = j;
            spread[i] = f64::NEG_INFINITY;
        }
    }

    let mut sums = Matrix::zeros(k, data.cols());
    for (p, &label) in data.iter_rows().zip(labels.iter()) {
        for (s, &v) in sums.row_mut(label).iter_mut().zip(p) {
            *s += v;
        }
    }
    for j in 0..k {
        if counts[j] == 0 {
            // Nothing could be donated; keep the old centre.
            sums.row_mut(j).copy_from_slice(centroids.row(j));
            continue;
        }
        let inv = 1.0 / counts[j] as f64;
        for s in sums.row_mut(j) {
            *s *= inv;
        }
    }
    sums
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn points() -> impl Strategy<Value = Matrix> {
        proptest::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 1..40).prop_map(|pts| {
            let rows: Vec<Vec<f64>> = pts.into_iter().map(|(x, y)| vec![x, y]).collect();
            Matrix::from_rows(&rows).unwrap()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn labels_index_centroids(data in points(), k in 1_usize..6, seed in 0_u64..1000) {
            let k = k.min(data.rows());
            let config = KMeansConfig::default().with_k(k);
            let result = kmeans(&data, &config, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(result.labels.len(), data.rows());
            prop_assert!(result.labels.iter().all(|&l| l < k));
            prop_assert_eq!(result.centroids.shape(), (k, 2));
            prop_assert!(result.inertia.is_finite() && result.inertia >= 0.0);
        }

        #[test]
        fn inertia_never_increases(data in points(), k in 1_usize..6, seed in 0_u64..1000) {
            // Seeding consumes the same draws whatever max_iter is, so each
            // run extends the previous one by one Lloyd step.
            let k = k.min(data.rows());
            let mut prev = f64::INFINITY;
            for max_iter in 1..8 {
                let config = KMeansConfig::default().with_k(k).with_max_iter(max_iter);
                let inertia = kmeans(&data, &config, &mut create_rng(seed)).unwrap().inertia;
                prop_assert!(
                    inertia <= prev + 1e-9 * prev.max(1.0),
                    "iteration {}: {} > {}",
                    max_iter,
                    inertia,
                    prev
                );
                prev = inertia;
            }
        }
    }
}
