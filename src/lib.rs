//! Embedding clustering and similarity-graph construction.
//!
//! `skein` takes one embedding vector per item and produces a clustered,
//! sparse similarity graph for visual exploration.
//!
//! The primary public API:
//! - [`cluster`]: k-means (k-means++ seeding, Lloyd iterations)
//! - [`graph`]: pairwise cosine similarity and top-k edge selection into
//!   [`GraphData`]
//! - [`pipeline`]: the composed cluster-then-graph run, plus the item-text
//!   and k-selection conventions shared with external collaborators

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod graph;
pub mod pipeline;

pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use error::{Error, Result};
pub use graph::{cosine_similarity, GraphBuilder, GraphData, Link, Node};
pub use pipeline::{select_k, GraphSummary, PipelineParams, TableData};
