//! Greedy hierarchical hub labeling specialized to unique shortest paths.
//!
//! Same contract as [`GreedyHhl`](crate::algo::hhl::GreedyHhl), but backed
//! by canonical shortest-path trees: for every pair there is one tree path,
//! so the per-selection cover update collapses from a quadratic
//! descendant/ascendant sweep into a single subtree walk with post-order
//! size accumulation.

use crate::algo::sp::{SpScratch, UspShortestPaths};
use crate::algo::GreedyKind;
use crate::graph::{Direction, Graph, Vertex, NONE};
use crate::labeling::Labeling;
use crate::utils::KHeap;
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use sync_cell_slice::SyncSlice;

struct WorkerScratch {
    sp: SpScratch,
    desc: Vec<Vertex>,
    cover_diff: Vec<i64>,
    sp_diff: Vec<i64>,
    subtree: Vec<i64>,
}

impl WorkerScratch {
    fn new(n: usize) -> Self {
        WorkerScratch {
            sp: SpScratch::new(n),
            desc: Vec::new(),
            cover_diff: vec![0; n],
            sp_diff: vec![0; n],
            subtree: vec![0; n],
        }
    }

    /// Walks `desc` (a subtree in tree order) backwards, accumulating the
    /// size of every sub-subtree into its root's `subtree` slot, and calls
    /// `apply(q, size)` once per vertex. `subtree` is left zeroed.
    fn accumulate(
        &mut self,
        parent_of: impl Fn(Vertex) -> Vertex,
        mut apply: impl FnMut(&mut Self, Vertex, i64),
    ) {
        for i in (0..self.desc.len()).rev() {
            let q = self.desc[i];
            self.subtree[q] += 1;
            let size = self.subtree[q];
            apply(self, q, size);
            if i > 0 {
                let p = parent_of(q);
                self.subtree[p] += size;
            }
            self.subtree[q] = 0;
        }
    }
}

/// The greedy hierarchical labeling builder over canonical shortest-path
/// trees.
///
/// On graphs with genuinely unique shortest paths the trees are exact; on
/// graphs with ties the deterministic tie-breaking trees still yield a
/// correct labeling, because every excluded traversal is of a pair already
/// covered through the canonical tree.
pub struct UspGreedyHhl<'a> {
    n: usize,
    workers: usize,
    sp: UspShortestPaths<'a>,
    queue: KHeap<(f64, Vertex)>,
    selected: Vec<bool>,
    cover_size: Vec<i64>,
    sp_size: Vec<i64>,
}

impl<'a> UspGreedyHhl<'a> {
    pub fn new(graph: &'a Graph, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) -> Self {
        let n = graph.n();
        UspGreedyHhl {
            n,
            workers: thread_pool.current_num_threads().max(1),
            sp: UspShortestPaths::new(graph, thread_pool, pl),
            queue: KHeap::new(n),
            selected: vec![false; n],
            cover_size: vec![0; n],
            sp_size: vec![0; n],
        }
    }

    fn weight(&self, v: Vertex, kind: GreedyKind) -> (f64, Vertex) {
        let cover = self.cover_size[v];
        assert!(cover > 0);
        let w = match kind {
            GreedyKind::Path => 1.0 / cover as f64,
            GreedyKind::Label => self.sp_size[v] as f64 / cover as f64,
        };
        (w, v)
    }

    /// Folds the per-worker deltas into the global counters; called after
    /// every parallel phase.
    fn apply_diffs(&mut self, scratches: &mut [WorkerScratch]) {
        for s in scratches.iter_mut() {
            for v in 0..self.n {
                self.cover_size[v] += s.cover_diff[v];
                self.sp_size[v] -= s.sp_diff[v];
                s.cover_diff[v] = 0;
                s.sp_diff[v] = 0;
            }
        }
    }

    /// Runs the greedy selection, emitting the chosen order and the
    /// labeling.
    pub fn run(
        &mut self,
        kind: GreedyKind,
        order: &mut Vec<Vertex>,
        labeling: &mut Labeling,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) {
        let n = self.n;
        let t = self.workers;
        order.clear();
        order.resize(n, NONE);
        labeling.clear();
        self.queue.clear();
        self.sp.clear_cover();
        self.selected.fill(false);
        self.cover_size.fill(0);
        self.sp_size.fill(0);

        let mut scratches: Vec<WorkerScratch> = (0..t).map(|_| WorkerScratch::new(n)).collect();

        // Initial counts from each source's whole-graph tree: the number of
        // tree paths through q from v is accumulated bottom-up.
        pl.start("Counting tree paths through each vertex...");
        {
            let sp = &self.sp;
            let sp_cells = self.sp_size.as_sync_slice();
            thread_pool.install(|| {
                scratches.par_iter_mut().enumerate().for_each(|(k, s)| {
                    let mut v = k;
                    while v < n {
                        let mut incident = 0i64;
                        sp.descendants(v, v, Direction::Forward, &mut s.sp, &mut s.desc);
                        incident += s.desc.len() as i64;
                        s.accumulate(
                            |q| sp.parent(v, q, Direction::Forward),
                            |s, q, size| s.cover_diff[q] += size,
                        );
                        sp.descendants(v, v, Direction::Reverse, &mut s.sp, &mut s.desc);
                        incident += s.desc.len() as i64;
                        // Sole writer of v's entry.
                        unsafe { sp_cells[v].set(incident) };
                        v += t;
                    }
                })
            });
        }
        self.apply_diffs(&mut scratches);
        pl.done();

        for v in 0..n {
            let weight = self.weight(v, kind);
            self.queue.update(v, weight);
        }

        pl.item_name("hub");
        pl.expected_updates(Some(n));
        pl.start("Selecting hubs...");
        let mut wi = 0;
        while let Some(w) = self.queue.pop() {
            self.selected[w] = true;
            order[wi] = w;

            {
                let s = &mut scratches[0];
                for dir in Direction::BOTH {
                    self.sp.descendants(w, w, dir, &mut s.sp, &mut s.desc);
                    for &x in &s.desc {
                        labeling.add(x, dir.flip(), wi, self.sp.distance(x, w, dir.flip()));
                    }
                }
            }

            // Cover update: the subtree below w in v's tree is exactly the
            // set of q with a newly covered v--w--q path, and the number of
            // such paths through any q is its sub-subtree size. Paths of the
            // shape v--q--w are settled when the symmetric endpoint is
            // processed in the other direction. The root's own count is
            // only removed in the forward sub-phase.
            {
                let sp = &self.sp;
                for dir in Direction::BOTH {
                    thread_pool.install(|| {
                        scratches.par_iter_mut().enumerate().for_each(|(k, s)| {
                            let mut v = k;
                            while v < n {
                                sp.descendants(v, w, dir, &mut s.sp, &mut s.desc);
                                s.sp_diff[v] += s.desc.len() as i64;
                                let forward = dir == Direction::Forward;
                                s.accumulate(
                                    |q| sp.parent(v, q, dir),
                                    |s, q, size| {
                                        if q != w || forward {
                                            s.cover_diff[q] -= size;
                                        }
                                        if forward {
                                            sp.set_cover(v, q);
                                        }
                                    },
                                );
                                v += t;
                            }
                        })
                    });
                }
            }

            self.apply_diffs(&mut scratches);
            assert!(self.cover_size[w] == 0 && self.sp_size[w] == 0);

            for v in 0..n {
                if !self.selected[v] {
                    let weight = self.weight(v, kind);
                    self.queue.update(v, weight);
                }
            }
            pl.light_update();
            wi += 1;
        }
        debug_assert_eq!(wi, n);
        labeling.sort();
        pl.done();
    }
}
