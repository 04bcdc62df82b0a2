//! Independent verification of a labeling against ground-truth Dijkstra.

use super::Labeling;
use crate::algo::dijkstra::Dijkstra;
use crate::graph::{Direction, Graph};
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicBool, Ordering};

/// Checks that every query answer equals the true shortest distance, by
/// running a Dijkstra from each vertex in each direction.
///
/// A mismatch clears the shared result and the scan continues; the return
/// value is `true` only if all `n²` pairs agree in both directions.
pub fn run(
    graph: &Graph,
    labeling: &Labeling,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> bool {
    let n = graph.n();
    let ok = AtomicBool::new(true);
    pl.item_name("vertex");
    pl.expected_updates(Some(n));
    pl.start("Verifying labels against Dijkstra...");
    thread_pool.install(|| {
        (0..n).into_par_iter().for_each_init(
            || Dijkstra::new(graph),
            |dijkstra, v| {
                for dir in Direction::BOTH {
                    dijkstra.run(v, dir);
                    for u in 0..n {
                        if dijkstra.distance(u) != labeling.query(v, u, dir) {
                            ok.store(false, Ordering::Relaxed);
                        }
                    }
                }
            },
        )
    });
    pl.done_with_count(n);
    ok.into_inner()
}
