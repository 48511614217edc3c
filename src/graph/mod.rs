//! Similarity-graph construction over embedding vectors.
//!
//! Given one embedding per item plus a cluster label per item, the builder
//! produces a sparse undirected graph for visual exploration:
//!
//! 1. Compute cosine similarity for every unordered pair (O(n²·dim)).
//! 2. For each node, rank all other nodes by similarity and keep the top
//!    `top_k` (default 3).
//! 3. Union the per-node selections, deduplicated by unordered pair, so each
//!    edge appears once no matter how many nodes picked it.
//! 4. Package nodes (item id + cluster group) and links (similarity scaled
//!    for display) into [`GraphData`].
//!
//! The result is *not* a fixed-degree graph: every node contributes at most
//! `top_k` out-edges, but deduplication can collapse overlapping choices, so
//! final degree has no strict minimum.
//!
//! Ranking is deterministic for a given input: candidates are sorted with a
//! stable sort, so equal similarities resolve to the lower index.

use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

/// Cosine similarity between two vectors: `dot(a, b) / (‖a‖·‖b‖)`.
///
/// Range is `[-1, 1]` for typical embeddings. The result is NaN when either
/// vector has zero norm; callers must not pass zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// A graph node: one per input item, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Item id (label of the source record).
    pub id: String,
    /// Cluster label from the clustering step.
    pub group: usize,
}

/// An undirected edge between two items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// Item id of one endpoint.
    pub source: String,
    /// Item id of the other endpoint.
    pub target: String,
    /// Cosine similarity scaled by the builder's weight scale (display
    /// convention, not a probability or distance).
    pub value: f32,
}

/// The packaged graph handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphData {
    /// One node per input item, in input order.
    pub nodes: Vec<Node>,
    /// Deduplicated undirected edges.
    pub links: Vec<Link>,
    /// Number of distinct cluster labels actually present in the nodes.
    pub clusters: usize,
}

/// Builder for a top-k similarity graph.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    /// Out-edges contributed per node before deduplication.
    top_k: usize,
    /// Multiplier applied to cosine similarity for link values.
    weight_scale: f32,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            top_k: 3,
            weight_scale: 10.0,
        }
    }
}

impl GraphBuilder {
    /// Create a builder with the default settings (top 3 neighbors, ×10
    /// display scaling).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of neighbors each node contributes.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the multiplier applied to similarities in link values.
    pub fn with_weight_scale(mut self, weight_scale: f32) -> Self {
        self.weight_scale = weight_scale;
        self
    }

    /// Build the similarity graph.
    ///
    /// `item_ids`, `vectors`, and `labels` are parallel slices: one entry
    /// per item, in the same order the clusterer saw them.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if there are no items.
    /// - [`Error::LengthMismatch`] if the three slices disagree in length.
    /// - [`Error::DimensionMismatch`] if vectors have inconsistent lengths.
    pub fn build(
        &self,
        item_ids: &[String],
        vectors: &[Vec<f32>],
        labels: &[usize],
    ) -> Result<GraphData> {
        let n = vectors.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if item_ids.len() != n || labels.len() != n {
            return Err(Error::LengthMismatch {
                items: item_ids.len(),
                vectors: n,
                labels: labels.len(),
            });
        }

        let dim = vectors[0].len();
        for vector in vectors.iter().skip(1) {
            if vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: vector.len(),
                });
            }
        }

        // Full pairwise similarity, symmetric; the diagonal is never read.
        let mut sim = vec![0.0f32; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let s = cosine_similarity(&vectors[i], &vectors[j]);
                sim[i * n + j] = s;
                sim[j * n + i] = s;
            }
        }

        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut links: Vec<Link> = Vec::new();

        for i in 0..n {
            let mut candidates: Vec<(usize, f32)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, sim[i * n + j]))
                .collect();

            // Stable sort: ties keep ascending-index order.
            candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

            for &(j, s) in candidates.iter().take(self.top_k) {
                let key = (i.min(j), i.max(j));
                if seen.insert(key) {
                    links.push(Link {
                        source: item_ids[i].clone(),
                        target: item_ids[j].clone(),
                        value: s * self.weight_scale,
                    });
                }
            }
        }

        let nodes: Vec<Node> = item_ids
            .iter()
            .zip(labels.iter())
            .map(|(id, &group)| Node {
                id: id.clone(),
                group,
            })
            .collect();

        let clusters = labels.iter().collect::<HashSet<_>>().len();

        debug!(
            "graph build: n={} links={} clusters={}",
            n,
            links.len(),
            clusters
        );

        Ok(GraphData {
            nodes,
            links,
            clusters,
        })
    }
}
