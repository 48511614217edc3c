//! Cluster a small embedded dataset and print the resulting graph.

use skein::pipeline::{self, PipelineParams};

fn main() {
    env_logger::init();

    // Three well-separated groups in 4 dimensions, standing in for
    // externally generated embeddings.
    let embeddings: Vec<Vec<f32>> = (0..12)
        .map(|i| {
            let mut v = vec![0.1; 4];
            v[i % 3] = 1.0;
            v[3] = 0.05 * i as f32;
            v
        })
        .collect();
    let ids: Vec<String> = (0..12).map(|i| format!("record-{i}")).collect();

    let params = PipelineParams {
        seed: Some(42),
        ..Default::default()
    };
    let (graph, summary) = pipeline::run(&ids, &embeddings, &params).unwrap();

    println!(
        "=== {} items, {} clusters, {} edges ===",
        summary.item_count, summary.cluster_count, summary.edge_count
    );
    for node in &graph.nodes {
        println!("  node {:10} => cluster {}", node.id, node.group);
    }
    for link in &graph.links {
        println!(
            "  edge {:10} -- {:10} value {:.2}",
            link.source, link.target, link.value
        );
    }
}
