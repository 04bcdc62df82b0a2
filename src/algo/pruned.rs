//! Pruned labeling: builds a hierarchical hub labeling from a given vertex
//! order by running, for each vertex in order, a shortest-path exploration
//! that is pruned wherever the labels built so far already certify a
//! distance at least as good.

use crate::algo::dijkstra::SearchState;
use crate::graph::{Direction, Graph, Vertex, INFTY, NONE};
use crate::labeling::Labeling;
use dsi_progress_logger::ProgressLog;

/// The pruned-labeling builder of Akiba, Iwata and Yoshida.
///
/// Hubs are identified by their position in the order, so every label is
/// emitted already sorted by importance and id at once.
pub struct PrunedLabeling<'a> {
    graph: &'a Graph,
    state: SearchState,
}

impl<'a> PrunedLabeling<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        PrunedLabeling {
            graph,
            state: SearchState::new(graph.n()),
        }
    }

    /// Builds the labeling for `order`, most important vertex first.
    pub fn run(&mut self, order: &[Vertex], labeling: &mut Labeling, pl: &mut impl ProgressLog) {
        assert_eq!(order.len(), self.graph.n());
        labeling.clear();
        pl.item_name("vertex");
        pl.expected_updates(Some(order.len()));
        pl.start("Building pruned labeling...");
        for i in 0..order.len() {
            self.iteration(i, Direction::Reverse, order, labeling);
            self.iteration(i, Direction::Forward, order, labeling);
            pl.light_update();
        }
        labeling.sort();
        pl.done();
    }

    /// Explores from `order[i]` along `dir`, appending hub `i` to every
    /// vertex whose exploration was not pruned.
    fn iteration(
        &mut self,
        i: usize,
        dir: Direction,
        order: &[Vertex],
        labeling: &mut Labeling,
    ) {
        self.state.clear();
        let v = order[i];
        self.state.update(v, 0, NONE);
        while let Some(u) = self.state.queue.pop() {
            let d = self.state.distance[u];
            labeling.add(u, dir.flip(), i, d);
            for a in self.graph.arcs(u, dir) {
                let dd = d + a.length;
                assert!(dd > d && dd < INFTY);
                // Prune when an already-committed hub certifies a path at
                // least as short; anything below a.head would be dominated.
                if dd < self.state.distance[a.head] && dd < labeling.query(v, a.head, dir) {
                    self.state.update(a.head, dd, NONE);
                }
            }
        }
    }
}
