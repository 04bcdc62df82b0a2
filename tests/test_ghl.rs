mod common;

use dsi_progress_logger::no_logging;
use hublab::algo::ghl::GreedyHl;
use hublab::graph::{Direction, Graph, GraphBuilder};
use hublab::labeling::Labeling;
use hublab::threads;

fn build(graph: &Graph, alpha: f64, p: f64) -> Labeling {
    let thread_pool = threads![2];
    let mut labels = Labeling::new(graph.n());
    GreedyHl::new(graph, &thread_pool, no_logging![]).run(
        &mut labels,
        alpha,
        p,
        &thread_pool,
        no_logging![],
    );
    labels
}

#[test]
fn test_complete_graph() {
    let mut builder = GraphBuilder::new(4);
    for u in 0..4 {
        for v in u + 1..4 {
            assert!(builder.arc(u, v, 1, true));
        }
    }
    let g = builder.build();
    let labels = build(&g, 1.1, 1.0);
    for u in 0..4 {
        for v in 0..4 {
            let expected = if u == v { 0 } else { 1 };
            assert_eq!(labels.query(u, v, Direction::Forward), expected);
        }
    }
    // One shared hub plus self-hubs suffices on a clique; the greedy stays
    // well under the all-pairs worst case of 4.
    assert!(labels.avg() <= 2.5 + 1e-9, "average label size {}", labels.avg());
    common::assert_sorted(&labels);
}

#[test]
fn test_random_directed() {
    let g = common::random_graph(15, 30, 6, false, 2024);
    let labels = build(&g, 1.1, 1.0);
    common::assert_correct(&g, &labels);
    common::assert_sorted(&labels);
}

#[test]
fn test_random_undirected_max_norm() {
    let g = common::random_graph(12, 18, 4, true, 31);
    let labels = build(&g, 1.1, (g.n() as f64).ln());
    common::assert_correct(&g, &labels);
}

#[test]
fn test_alpha_one_still_terminates() {
    let g = common::random_graph(10, 15, 3, true, 8);
    let labels = build(&g, 1.0, 1.0);
    common::assert_correct(&g, &labels);
}

#[test]
fn test_large_alpha_trades_size_for_speed() {
    let g = common::random_graph(14, 28, 5, false, 17);
    let labels = build(&g, 4.0, 1.0);
    // A loose alpha commits stale subgraphs more eagerly; the result must
    // still be exact.
    common::assert_correct(&g, &labels);
}

#[test]
fn test_single_vertex() {
    let g = GraphBuilder::new(1).build();
    let labels = build(&g, 1.1, 1.0);
    assert_eq!(labels.query(0, 0, Direction::Forward), 0);
}

#[test]
fn test_disconnected() {
    let mut builder = GraphBuilder::new(4);
    assert!(builder.arc(0, 1, 2, true));
    assert!(builder.arc(2, 3, 2, true));
    let g = builder.build();
    let labels = build(&g, 1.1, 1.0);
    common::assert_correct(&g, &labels);
}
