use proptest::prelude::*;
use skein::cluster::{Clustering, Kmeans};
use skein::graph::GraphBuilder;
use std::collections::HashSet;

proptest! {
    #[test]
    fn prop_kmeans_all_assigned(
        data in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 2), 1..20),
        k in 1usize..5
    ) {
        // Skip if k > n
        if k <= data.len() {
            let model = Kmeans::new(k).with_seed(42);
            let labels = model.fit_predict(&data).unwrap();

            prop_assert_eq!(labels.len(), data.len());
            for &l in &labels {
                prop_assert!(l < k);
            }
        }
    }

    #[test]
    fn prop_graph_edges_deduplicated(
        data in prop::collection::vec(prop::collection::vec(0.1f32..10.0, 3), 2..16)
    ) {
        let n = data.len();
        let ids: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
        let labels = vec![0usize; n];

        let graph = GraphBuilder::new().build(&ids, &data, &labels).unwrap();

        prop_assert_eq!(graph.nodes.len(), n);
        // Every node contributes at most 3 out-edges before deduplication.
        prop_assert!(graph.links.len() <= n * 3);

        let mut pairs = HashSet::new();
        for link in &graph.links {
            prop_assert_ne!(&link.source, &link.target);
            let key = if link.source < link.target {
                (link.source.clone(), link.target.clone())
            } else {
                (link.target.clone(), link.source.clone())
            };
            prop_assert!(pairs.insert(key), "duplicate undirected edge");
        }
    }

    #[test]
    fn prop_cluster_count_matches_distinct_labels(
        data in prop::collection::vec(prop::collection::vec(-5.0f32..5.0, 2), 3..20),
        k in 1usize..4
    ) {
        // Positive-norm vectors for the similarity step.
        let data: Vec<Vec<f32>> = data
            .into_iter()
            .map(|v| v.into_iter().map(|x| x + 6.0).collect())
            .collect();
        let n = data.len();

        let labels = Kmeans::new(k).with_seed(7).fit_predict(&data).unwrap();
        let ids: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
        let graph = GraphBuilder::new().build(&ids, &data, &labels).unwrap();

        let distinct: HashSet<usize> = labels.iter().copied().collect();
        prop_assert_eq!(graph.clusters, distinct.len());
    }
}
