//! Clustering algorithms for grouping similar items.
//!
//! This module provides hard clustering for dense vectors: each item is
//! assigned to exactly one cluster.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat until the
//! assignment stops changing.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance (or use [`crate::pipeline::select_k`])
//!
//! Initial centroids are chosen with k-means++ seeding, and empty clusters
//! are reseeded from the input rather than left dead; see [`Kmeans`].
//!
//! ## Usage
//!
//! ```rust
//! use skein::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! ```

mod kmeans;
mod traits;
mod util;

pub use kmeans::{Kmeans, KmeansFit};
pub use traits::Clustering;
