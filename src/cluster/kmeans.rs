//! K-means clustering with k-means++ seeding.
//!
//! # The Algorithm (Lloyd, 1982)
//!
//! K-means partitions points into `k` clusters by alternating two steps:
//!
//! 1. **Assignment**: each point gets the label of its nearest centroid.
//! 2. **Update**: each centroid moves to the mean of its assigned points.
//!
//! Iteration stops when two consecutive assignments are identical, or after
//! `max_iter` rounds. Convergence is to a *local* minimum of the
//! within-cluster sum of squares; the result depends on the initial
//! centroids.
//!
//! ## Seeding (k-means++, Arthur & Vassilvitskii, 2007)
//!
//! The first centroid is drawn uniformly from the input. Each subsequent
//! centroid is drawn with probability proportional to its squared distance
//! from the nearest already-chosen centroid. Spreading the seeds apart this
//! way sharply reduces the chance of a poor local minimum compared to
//! uniform seeding.
//!
//! ## Empty clusters
//!
//! A cluster can lose all members during iteration (always, when `k`
//! exceeds the number of distinct points). Its centroid is then replaced by
//! a uniformly random input point rather than left as a stale mean, and the
//! check repeats every iteration the cluster stays empty.
//!
//! ## Determinism
//!
//! With a fixed seed the fit is fully reproducible: assignment ties go to
//! the lowest centroid index, and the seeding draw falls back to the last
//! candidate if floating-point rounding exhausts the cumulative weights.
//!
//! ## Complexity
//!
//! - **Time**: O(iterations · n · k · dim), plus O(n · k · dim) seeding.
//! - **Space**: O(n + k · dim).
//!
//! ## References
//!
//! - Lloyd (1982). "Least squares quantization in PCM." IEEE Trans. Inf. Theory.
//! - Arthur & Vassilvitskii (2007). "k-means++: The Advantages of Careful
//!   Seeding." SODA '07.

use super::traits::Clustering;
use super::util::squared_euclidean;
use crate::error::{Error, Result};
use log::debug;
use rand::prelude::*;

/// K-means clusterer (k-means++ seeding, Lloyd iterations).
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum number of Lloyd iterations.
    max_iter: usize,
    /// Optional RNG seed for reproducibility.
    seed: Option<u64>,
}

/// Outcome of a k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// One cluster label per input point, each in `[0, k)`.
    pub labels: Vec<usize>,
    /// Final centroids (`k` vectors of the input dimensionality).
    ///
    /// Centroids of clusters that stayed empty are reseeded input points,
    /// so distinct labels actually present in `labels` may number fewer
    /// than `k`.
    pub centroids: Vec<Vec<f32>>,
    /// Number of assignment steps performed.
    pub iterations: usize,
    /// Whether two consecutive assignments matched before `max_iter`.
    pub converged: bool,
}

impl Kmeans {
    /// Create a new k-means clusterer with `k` clusters.
    ///
    /// Defaults: 100 max iterations, unseeded (thread-local) RNG.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            seed: None,
        }
    }

    /// Set the maximum number of Lloyd iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the RNG seed for reproducible seeding and reseeding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit on dense vectors, returning labels, centroids, and convergence info.
    ///
    /// `k` may exceed the number of points; the surplus clusters simply stay
    /// empty and are reseeded each iteration. Callers that want a sensible
    /// `k` for a given item count can use [`crate::pipeline::select_k`].
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `data` is empty.
    /// - [`Error::InvalidParameter`] if `k == 0`, `max_iter == 0`, or the
    ///   dimension is zero.
    /// - [`Error::DimensionMismatch`] if points have inconsistent lengths.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let dim = data[0].len();
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: point.len(),
                });
            }
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = seed_centroids(data, self.k, &mut rng);

        // Iteration 1: assign, then update. Convergence is only checked from
        // the second assignment on (there is no previous assignment before).
        let mut labels = assign(data, &centroids);
        centroids = update_centroids(data, &labels, self.k, &mut rng);

        let mut iterations = 1;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;
            let next = assign(data, &centroids);

            if next == labels {
                // Converged: stop before touching the centroids again.
                converged = true;
                break;
            }

            labels = next;
            centroids = update_centroids(data, &labels, self.k, &mut rng);
        }

        debug!(
            "kmeans fit: n={} k={} iterations={} converged={}",
            data.len(),
            self.k,
            iterations,
            converged
        );

        Ok(KmeansFit {
            labels,
            centroids,
            iterations,
            converged,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// K-means++ seeding: first centroid uniform, each next drawn with
/// probability proportional to squared distance from the nearest chosen one.
fn seed_centroids<R: Rng>(data: &[Vec<f32>], k: usize, rng: &mut R) -> Vec<Vec<f32>> {
    let n = data.len();

    let first = rng.random_range(0..n);
    let mut centroids: Vec<Vec<f32>> = Vec::with_capacity(k);
    centroids.push(data[first].clone());

    while centroids.len() < k {
        let weights: Vec<f32> = data
            .iter()
            .map(|point| {
                centroids
                    .iter()
                    .map(|c| squared_euclidean(point, c))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect();
        let total: f32 = weights.iter().sum();

        // Cumulative-sum draw. If rounding exhausts the weights without a
        // hit (or every point coincides with a centroid, total == 0), the
        // last candidate wins so the outcome is never undefined.
        let mut draw = rng.random::<f32>() * total;
        let mut chosen = n - 1;
        for (i, w) in weights.iter().enumerate() {
            draw -= w;
            if draw <= 0.0 {
                chosen = i;
                break;
            }
        }

        centroids.push(data[chosen].clone());
    }

    centroids
}

/// One label per point: index of the nearest centroid, ties to the lowest index.
fn assign(data: &[Vec<f32>], centroids: &[Vec<f32>]) -> Vec<usize> {
    data.iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

#[inline]
fn nearest_centroid(point: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        // Squared distance has the same argmin as Euclidean distance.
        let d = squared_euclidean(point, centroid);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Recompute centroids as per-cluster means; empty clusters are reseeded
/// with a uniformly random input point.
fn update_centroids<R: Rng>(
    data: &[Vec<f32>],
    labels: &[usize],
    k: usize,
    rng: &mut R,
) -> Vec<Vec<f32>> {
    let dim = data[0].len();
    let mut sums = vec![vec![0.0f32; dim]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in data.iter().zip(labels) {
        counts[label] += 1;
        for (s, x) in sums[label].iter_mut().zip(point) {
            *s += x;
        }
    }

    for (cluster, sum) in sums.iter_mut().enumerate() {
        if counts[cluster] > 0 {
            for s in sum.iter_mut() {
                *s /= counts[cluster] as f32;
            }
        } else {
            // Reseed rather than keep a stale mean; re-evaluated every
            // iteration the cluster remains empty.
            let replacement = rng.random_range(0..data.len());
            debug!("kmeans: reseeding empty cluster {cluster} from point {replacement}");
            sum.clone_from(&data[replacement]);
        }
    }

    sums
}
