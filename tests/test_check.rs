mod common;

use dsi_progress_logger::no_logging;
use hublab::algo::ghl::GreedyHl;
use hublab::algo::hhl::GreedyHhl;
use hublab::algo::pruned::PrunedLabeling;
use hublab::algo::GreedyKind;
use hublab::graph::Direction;
use hublab::labeling::{check, Labeling};
use hublab::order;
use hublab::threads;

#[test]
fn test_accepts_every_builder() {
    let g = common::random_graph(20, 40, 9, false, 4242);
    let thread_pool = threads![2];

    let mut pruned = Labeling::new(g.n());
    PrunedLabeling::new(&g).run(&order::by_degree(&g), &mut pruned, no_logging![]);
    assert!(check::run(&g, &pruned, &thread_pool, no_logging![]));

    let mut order = Vec::new();
    let mut greedy = Labeling::new(g.n());
    GreedyHhl::new(&g, &thread_pool, no_logging![]).run(
        GreedyKind::Path,
        &mut order,
        &mut greedy,
        &thread_pool,
        no_logging![],
    );
    assert!(check::run(&g, &greedy, &thread_pool, no_logging![]));

    let mut pnorm = Labeling::new(g.n());
    GreedyHl::new(&g, &thread_pool, no_logging![]).run(
        &mut pnorm,
        1.1,
        1.0,
        &thread_pool,
        no_logging![],
    );
    assert!(check::run(&g, &pnorm, &thread_pool, no_logging![]));
}

#[test]
fn test_rejects_corrupted_distance() {
    let g = common::random_graph(20, 35, 5, true, 1);
    let thread_pool = threads![2];
    let mut labels = Labeling::new(g.n());
    PrunedLabeling::new(&g).run(&order::by_degree(&g), &mut labels, no_logging![]);
    assert!(check::run(&g, &labels, &thread_pool, no_logging![]));

    // Shrink one positive stored distance: the hub's own vertex now
    // queries strictly below the true distance.
    'outer: for v in 0..g.n() {
        for side in Direction::BOTH {
            if let Some(e) = labels.label_mut(v, side).iter_mut().find(|e| e.dist > 0) {
                e.dist -= 1;
                break 'outer;
            }
        }
    }
    assert!(!check::run(&g, &labels, &thread_pool, no_logging![]));
}

#[test]
fn test_rejects_missing_entry() {
    let g = common::random_graph(15, 25, 4, false, 2);
    let thread_pool = threads![2];
    let mut labels = Labeling::new(g.n());
    PrunedLabeling::new(&g).run(&order::by_degree(&g), &mut labels, no_logging![]);

    // Drop a self hub: the diagonal query of its vertex cannot stay 0.
    let v = 3;
    let i = labels
        .label(v, Direction::Forward)
        .iter()
        .position(|e| e.dist == 0)
        .unwrap();
    labels.label_mut(v, Direction::Forward).remove(i);
    assert!(!check::run(&g, &labels, &thread_pool, no_logging![]));
}
