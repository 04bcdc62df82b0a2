mod common;

use dsi_progress_logger::no_logging;
use hublab::algo::hhl::GreedyHhl;
use hublab::algo::GreedyKind;
use hublab::graph::{Direction, Graph, GraphBuilder};
use hublab::labeling::Labeling;
use hublab::threads;

fn build(graph: &Graph, kind: GreedyKind) -> (Vec<usize>, Labeling) {
    let thread_pool = threads![2];
    let mut order = Vec::new();
    let mut labels = Labeling::new(graph.n());
    GreedyHhl::new(graph, &thread_pool, no_logging![]).run(
        kind,
        &mut order,
        &mut labels,
        &thread_pool,
        no_logging![],
    );
    (order, labels)
}

#[test]
fn test_cycle() {
    let mut builder = GraphBuilder::new(4);
    for v in 0..4 {
        assert!(builder.arc(v, (v + 1) % 4, 1, true));
    }
    let g = builder.build();
    let (order, labels) = build(&g, GreedyKind::Path);

    for i in 0..4usize {
        for j in 0..4usize {
            let line = i.abs_diff(j);
            let expected = line.min(4 - line) as u32;
            assert_eq!(labels.query(i, j, Direction::Forward), expected);
        }
    }
    for v in 0..4 {
        for side in Direction::BOTH {
            assert!(!labels.label(v, side).is_empty());
        }
    }
    common::assert_permutation(&order, 4);
    common::assert_sorted(&labels);
    common::assert_hierarchical(&labels, &order);
}

#[test]
fn test_path_greedy_random_directed() {
    let g = common::random_graph(20, 40, 10, false, 123);
    let (order, labels) = build(&g, GreedyKind::Path);
    common::assert_correct(&g, &labels);
    common::assert_permutation(&order, g.n());
    common::assert_hierarchical(&labels, &order);
}

#[test]
fn test_label_greedy_random_directed() {
    let g = common::random_graph(18, 36, 7, false, 99);
    let (order, labels) = build(&g, GreedyKind::Label);
    common::assert_correct(&g, &labels);
    common::assert_permutation(&order, g.n());
    common::assert_hierarchical(&labels, &order);
}

#[test]
fn test_undirected_symmetry() {
    let g = common::random_graph(16, 20, 5, true, 7);
    let (_, labels) = build(&g, GreedyKind::Path);
    common::assert_correct(&g, &labels);
    for v in 0..g.n() {
        let mut fwd = labels.label(v, Direction::Forward).to_vec();
        let mut rev = labels.label(v, Direction::Reverse).to_vec();
        fwd.sort_unstable();
        rev.sort_unstable();
        assert_eq!(fwd, rev);
        for u in 0..g.n() {
            assert_eq!(
                labels.query(v, u, Direction::Forward),
                labels.query(u, v, Direction::Forward)
            );
        }
    }
}

#[test]
fn test_rerun_reuses_state() {
    let g = common::random_graph(12, 24, 5, false, 5);
    let thread_pool = threads![2];
    let mut hhl = GreedyHhl::new(&g, &thread_pool, no_logging![]);
    let mut order = Vec::new();
    let mut labels = Labeling::new(g.n());
    hhl.run(
        GreedyKind::Path,
        &mut order,
        &mut labels,
        &thread_pool,
        no_logging![],
    );
    let first_order = order.clone();
    let mut again = Labeling::new(g.n());
    hhl.run(
        GreedyKind::Path,
        &mut order,
        &mut again,
        &thread_pool,
        no_logging![],
    );
    assert_eq!(order, first_order);
    for v in 0..g.n() {
        for side in Direction::BOTH {
            assert_eq!(labels.label(v, side), again.label(v, side));
        }
    }
}

#[test]
fn test_single_vertex() {
    let g = GraphBuilder::new(1).build();
    let (order, labels) = build(&g, GreedyKind::Label);
    assert_eq!(order, vec![0]);
    assert_eq!(labels.query(0, 0, Direction::Forward), 0);
}
