//! End-to-end glue: item preparation, k selection, and the composed
//! cluster-then-graph run.
//!
//! Ingestion (CSV/XLSX parsing) and embedding generation live outside this
//! crate; this module fixes the conventions both sides must agree on:
//!
//! - The text sent to the embedding call for a row is `"{header}:{value}"`
//!   per column, in header order, joined by commas ([`embedding_texts`]).
//! - An item's display id is its first-column value, falling back to
//!   `"Item{n}"` (1-based) when that value is empty ([`item_ids`]).
//!
//! [`run`] then takes the externally produced embeddings and ids and drives
//! [`Kmeans`] followed by [`GraphBuilder`], returning the graph plus the
//! summary counts a status display wants.

use crate::cluster::Kmeans;
use crate::error::Result;
use crate::graph::{GraphBuilder, GraphData};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// A parsed tabular file: ordered column names plus one string map per row.
///
/// Produced by an external ingestion collaborator; rows may omit columns,
/// which read as empty values.
#[derive(Debug, Clone)]
pub struct TableData {
    /// Column names, in file order. The first column supplies item ids.
    pub headers: Vec<String>,
    /// One map per row, keyed by column name.
    pub rows: Vec<HashMap<String, String>>,
}

/// Build the embedding-input text for each row: `"{header}:{value}"` per
/// column, joined by commas.
///
/// This convention is part of the contract with the embedding collaborator
/// and must not change without regenerating embeddings.
pub fn embedding_texts(table: &TableData) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .map(|header| {
                    let value = row.get(header).map(String::as_str).unwrap_or("");
                    format!("{header}:{value}")
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

/// Item ids for display: the first-column value of each row, or a synthesized
/// `"Item{n}"` (1-based) when that value is empty or missing.
pub fn item_ids(table: &TableData) -> Vec<String> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            match table.headers.first().and_then(|header| row.get(header)) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => format!("Item{}", i + 1),
            }
        })
        .collect()
}

/// Default cluster count for a given item count: `clamp(n / 10, 3, 15)`.
///
/// A heuristic, not a fit criterion. Note the lower clamp: fewer than 30
/// items still get `k = 3`, and below 3 items that exceeds the item count,
/// which k-means tolerates via its empty-cluster reseed path.
pub fn select_k(item_count: usize) -> usize {
    (item_count / 10).clamp(3, 15)
}

/// Parameters for a [`run`] invocation.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Explicit cluster count; overrides the [`select_k`] heuristic.
    pub k: Option<usize>,
    /// Maximum k-means iterations.
    pub max_iter: usize,
    /// RNG seed for reproducible clustering.
    pub seed: Option<u64>,
    /// Neighbors contributed per node in the similarity graph.
    pub top_k: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            k: None,
            max_iter: 100,
            seed: None,
            top_k: 3,
        }
    }
}

/// Summary counts for a status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Number of input items.
    pub item_count: usize,
    /// Number of distinct clusters present in the graph.
    pub cluster_count: usize,
    /// Number of deduplicated edges.
    pub edge_count: usize,
}

/// Cluster the embeddings, then build the similarity graph over them.
///
/// `item_ids` and `embeddings` are parallel slices from the external
/// collaborators (see module docs for the conventions they follow).
///
/// # Errors
///
/// Propagates [`crate::Error`] from clustering and graph construction
/// (empty input, parameter and dimension problems, length disagreement).
pub fn run(
    item_ids: &[String],
    embeddings: &[Vec<f32>],
    params: &PipelineParams,
) -> Result<(GraphData, GraphSummary)> {
    let k = params.k.unwrap_or_else(|| select_k(embeddings.len()));
    debug!("pipeline: {} items, k={k}", embeddings.len());

    let mut kmeans = Kmeans::new(k).with_max_iter(params.max_iter);
    if let Some(seed) = params.seed {
        kmeans = kmeans.with_seed(seed);
    }
    let fit = kmeans.fit(embeddings)?;

    let graph = GraphBuilder::new()
        .with_top_k(params.top_k)
        .build(item_ids, embeddings, &fit.labels)?;

    let summary = GraphSummary {
        item_count: item_ids.len(),
        cluster_count: graph.clusters,
        edge_count: graph.links.len(),
    };

    Ok((graph, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> TableData {
        TableData {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn test_embedding_texts_convention() {
        let t = table(
            &["name", "color", "size"],
            &[
                &[("name", "apple"), ("color", "red"), ("size", "small")],
                &[("name", "sky"), ("color", "blue")],
            ],
        );

        let texts = embedding_texts(&t);
        assert_eq!(texts[0], "name:apple,color:red,size:small");
        // Missing column reads as empty, but keeps its slot.
        assert_eq!(texts[1], "name:sky,color:blue,size:");
    }

    #[test]
    fn test_item_ids_first_column_with_fallback() {
        let t = table(
            &["name", "color"],
            &[
                &[("name", "apple"), ("color", "red")],
                &[("name", ""), ("color", "blue")],
                &[("color", "green")],
            ],
        );

        assert_eq!(item_ids(&t), vec!["apple", "Item2", "Item3"]);
    }

    #[test]
    fn test_select_k_heuristic() {
        assert_eq!(select_k(0), 3);
        assert_eq!(select_k(20), 3);
        assert_eq!(select_k(29), 3);
        assert_eq!(select_k(50), 5);
        assert_eq!(select_k(149), 14);
        assert_eq!(select_k(1000), 15);
    }

    /// End-to-end: 20 items in 3 well-separated groups of dimension 8.
    #[test]
    fn test_run_recovers_groups() {
        let mut ids = Vec::new();
        let mut embeddings = Vec::new();
        for i in 0..20usize {
            let group = i % 3;
            let mut v = vec![0.01 * (i as f32 % 2.0); 8];
            // Each group dominates a different axis.
            v[group] = 1.0;
            ids.push(format!("item{i}"));
            embeddings.push(v);
        }

        let params = PipelineParams {
            seed: Some(11),
            ..Default::default()
        };
        let (graph, summary) = run(&ids, &embeddings, &params).unwrap();

        // Heuristic k: clamp(20 / 10, 3, 15) = 3.
        assert_eq!(summary.item_count, 20);
        assert_eq!(summary.cluster_count, 3);
        assert_eq!(summary.edge_count, graph.links.len());
        assert!(summary.edge_count <= 20 * 3);

        // Same group => same node group, across all pairs.
        for a in 0..20 {
            for b in 0..20 {
                if a % 3 == b % 3 {
                    assert_eq!(graph.nodes[a].group, graph.nodes[b].group);
                } else {
                    assert_ne!(graph.nodes[a].group, graph.nodes[b].group);
                }
            }
        }
    }

    #[test]
    fn test_run_explicit_k_override() {
        let ids: Vec<String> = (0..6).map(|i| format!("item{i}")).collect();
        let embeddings: Vec<Vec<f32>> = (0..6)
            .map(|i| vec![i as f32, (i * i) as f32, 1.0])
            .collect();

        let params = PipelineParams {
            k: Some(2),
            seed: Some(5),
            ..Default::default()
        };
        let (graph, summary) = run(&ids, &embeddings, &params).unwrap();

        assert!(summary.cluster_count <= 2);
        assert!(graph.nodes.iter().all(|n| n.group < 2));
    }

    #[test]
    fn test_run_propagates_errors() {
        let params = PipelineParams::default();
        assert!(run(&[], &[], &params).is_err());
    }
}
