//! Greedy hierarchical hub labeling.
//!
//! The algorithm simultaneously chooses the vertex order and builds the
//! labels: at every step it selects the vertex covering the most
//! still-uncovered shortest-path pairs (optionally normalized by the number
//! of pairs the vertex is incident to), adds it as a hub to every vertex it
//! reaches on an uncovered shortest path, and marks the pairs it settles as
//! covered.

use crate::algo::sp::{ShortestPaths, SpScratch};
use crate::algo::GreedyKind;
use crate::graph::{Direction, Graph, Vertex, NONE};
use crate::labeling::Labeling;
use crate::utils::KHeap;
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use sync_cell_slice::SyncSlice;

/// Scratch owned by one worker for the lifetime of a run; handing each
/// worker its own struct keeps the cover deltas contention-free.
struct WorkerScratch {
    sp: SpScratch,
    desc: Vec<Vertex>,
    asc: Vec<Vertex>,
    cover_diff: Vec<i64>,
    sp_diff: Vec<i64>,
}

impl WorkerScratch {
    fn new(n: usize) -> Self {
        WorkerScratch {
            sp: SpScratch::new(n),
            desc: Vec::new(),
            asc: Vec::new(),
            cover_diff: vec![0; n],
            sp_diff: vec![0; n],
        }
    }
}

/// The greedy hierarchical labeling builder for general graphs.
pub struct GreedyHhl<'a> {
    n: usize,
    workers: usize,
    sp: ShortestPaths<'a>,
    queue: KHeap<(f64, Vertex)>,
    selected: Vec<bool>,
    cover_size: Vec<i64>,
    sp_size: Vec<i64>,
}

impl<'a> GreedyHhl<'a> {
    /// Builds the shortest-paths oracle; the expensive part is the full
    /// distance table.
    pub fn new(graph: &'a Graph, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) -> Self {
        let n = graph.n();
        GreedyHhl {
            n,
            workers: thread_pool.current_num_threads().max(1),
            sp: ShortestPaths::new(graph, thread_pool, pl),
            queue: KHeap::new(n),
            selected: vec![false; n],
            cover_size: vec![0; n],
            sp_size: vec![0; n],
        }
    }

    /// Queue weight of `v`; smaller wins, ties go to the smaller id.
    fn weight(&self, v: Vertex, kind: GreedyKind) -> (f64, Vertex) {
        let cover = self.cover_size[v];
        // An unselected vertex still covers at least its own diagonal pair.
        assert!(cover > 0);
        let w = match kind {
            GreedyKind::Path => 1.0 / cover as f64,
            GreedyKind::Label => self.sp_size[v] as f64 / cover as f64,
        };
        (w, v)
    }

    /// Runs the greedy selection, emitting the chosen order and the
    /// labeling. Hubs are identified by their order position, so labels come
    /// out sorted by importance.
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

        pl.start("Counting shortest paths through each vertex...");
        {
            let sp = &self.sp;
            let cover_cells = self.cover_size.as_sync_slice();
            let sp_cells = self.sp_size.as_sync_slice();
            thread_pool.install(|| {
                scratches.par_iter_mut().enumerate().for_each(|(k, s)| {
                    let mut v = k;
                    while v < n {
                        let mut cover = 0i64;
                        let mut incident = 0i64;
                        for u in 0..n {
                            sp.descendants(u, v, Direction::Forward, &mut s.sp, &mut s.desc);
                            cover += s.desc.len() as i64;
                            if u == v {
                                incident += s.desc.len() as i64;
                            }
                        }
                        sp.descendants(v, v, Direction::Reverse, &mut s.sp, &mut s.desc);
                        incident += s.desc.len() as i64;
                        // Sole writer of v's entries.
                        unsafe {
                            cover_cells[v].set(cover);
                            sp_cells[v].set(incident);
                        }
                        v += t;
                    }
                })
            });
        }
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

            // w becomes hub wi of everything it reaches on an uncovered
            // shortest path, in both directions.
            {
                let s = &mut scratches[0];
                for dir in Direction::BOTH {
                    self.sp.descendants(w, w, dir, &mut s.sp, &mut s.desc);
                    for &x in &s.desc {
                        labeling.add(x, dir.flip(), wi, self.sp.distance(x, w, dir.flip()));
                    }
                }
            }

            // Settle the pairs now covered by w. The forward sub-phase walks
            // every v--..--w--..--q path, decrements the cover count of each
            // internal vertex and marks (v, q) covered; the reverse
            // sub-phase only removes the mirrored pairs from the incidence
            // counts, since (q, v) is settled by the forward pass of q. The
            // barrier between the sub-phases keeps the cover snapshot
            // consistent for the reverse traversals.
            {
                let sp = &self.sp;
                for dir in Direction::BOTH {
                    thread_pool.install(|| {
                        scratches.par_iter_mut().enumerate().for_each(|(k, s)| {
                            let mut v = k;
                            while v < n {
                                sp.descendants(v, w, dir, &mut s.sp, &mut s.desc);
                                s.sp_diff[v] += s.desc.len() as i64;
                                if dir == Direction::Forward {
                                    for i in 0..s.desc.len() {
                                        let q = s.desc[i];
                                        // Every vertex of an uncovered
                                        // v--..--q shortest path no longer
                                        // needs to cover it. A shortest
                                        // v--q path can avoid w, so the
                                        // walk is over the whole DAG.
                                        sp.ascendants(
                                            v,
                                            q,
                                            Direction::Forward,
                                            &mut s.sp,
                                            &mut s.asc,
                                        );
                                        for &a in &s.asc {
                                            s.cover_diff[a] += 1;
                                        }
                                        sp.set_cover(v, q);
                                    }
                                }
                                v += t;
                            }
                        })
                    });
                }
            }

            for s in scratches.iter_mut() {
                for v in 0..n {
                    self.cover_size[v] -= s.cover_diff[v];
                    self.sp_size[v] -= s.sp_diff[v];
                    s.cover_diff[v] = 0;
                    s.sp_diff[v] = 0;
                }
            }
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
