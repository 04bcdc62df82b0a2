//! All-pairs shortest-path oracles backing the greedy labeling algorithms:
//! a full distance table, a pair-coverage matrix, and enumeration of the
//! descendants and ascendants of a vertex inside a source's shortest-path
//! DAG (or tree, in the unique-paths variant).
//!
//! Both oracles hold `Θ(n²)` entries; this is the price for constant-time
//! distance and coverage lookups inside the selection loops, and it caps the
//! graph sizes the greedy algorithms apply to.

use crate::algo::dijkstra::{Dijkstra, UspDijkstra};
use crate::graph::{Direction, Distance, Graph, Vertex, INFTY, NONE};
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicU8, Ordering};
use sux::bits::BitVec;
use sync_cell_slice::SyncSlice;

/// Per-worker traversal scratch: the visited marks, recycled across calls by
/// unmarking exactly the collected vertices.
pub struct SpScratch {
    visited: BitVec,
}

impl SpScratch {
    pub fn new(n: usize) -> Self {
        SpScratch {
            visited: BitVec::new(n),
        }
    }
}

/// The pair-coverage matrix. One byte per pair; each entry is written by a
/// single worker per phase, so relaxed ordering suffices.
struct Cover {
    n: usize,
    set: Vec<AtomicU8>,
}

impl Cover {
    fn new(n: usize) -> Self {
        Cover {
            n,
            set: (0..n * n).map(|_| AtomicU8::new(0)).collect(),
        }
    }

    #[inline(always)]
    fn mark(&self, u: Vertex, v: Vertex) {
        self.set[u * self.n + v].store(1, Ordering::Relaxed);
    }

    #[inline(always)]
    fn get(&self, u: Vertex, v: Vertex, dir: Direction) -> bool {
        let (u, v) = match dir {
            Direction::Forward => (u, v),
            Direction::Reverse => (v, u),
        };
        self.set[u * self.n + v].load(Ordering::Relaxed) != 0
    }

    fn clear(&mut self) {
        for e in self.set.iter_mut() {
            *e.get_mut() = 0;
        }
    }
}

/// The shortest-paths oracle for graphs where shortest paths need not be
/// unique: a distance table plus the coverage matrix.
pub struct ShortestPaths<'a> {
    graph: &'a Graph,
    n: usize,
    dist: Vec<Distance>,
    cover: Cover,
}

impl<'a> ShortestPaths<'a> {
    /// Builds the full distance table, one Dijkstra per source, parallel
    /// over sources.
    pub fn new(graph: &'a Graph, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) -> Self {
        let n = graph.n();
        let mut dist = vec![INFTY; n * n];
        pl.item_name("source");
        pl.expected_updates(Some(n));
        pl.start("Computing the distance table...");
        if n > 0 {
            thread_pool.install(|| {
                dist.par_chunks_mut(n).enumerate().for_each_init(
                    || Dijkstra::new(graph),
                    |dijkstra, (u, row)| {
                        dijkstra.run(u, Direction::Forward);
                        for (v, d) in row.iter_mut().enumerate() {
                            *d = dijkstra.distance(v);
                        }
                    },
                )
            });
        }
        pl.done_with_count(n);
        ShortestPaths {
            graph,
            n,
            dist,
            cover: Cover::new(n),
        }
    }

    /// The distance from `u` to `v` (from `v` to `u` when `dir` is
    /// reverse).
    #[inline(always)]
    pub fn distance(&self, u: Vertex, v: Vertex, dir: Direction) -> Distance {
        match dir {
            Direction::Forward => self.dist[u * self.n + v],
            Direction::Reverse => self.dist[v * self.n + u],
        }
    }

    /// Marks the pair `(u, v)` as covered by a selected hub.
    #[inline(always)]
    pub fn set_cover(&self, u: Vertex, v: Vertex) {
        self.cover.mark(u, v);
    }

    /// Whether the pair is covered, with the endpoint roles mirrored by
    /// `dir`.
    #[inline(always)]
    pub fn is_covered(&self, u: Vertex, v: Vertex, dir: Direction) -> bool {
        self.cover.get(u, v, dir)
    }

    /// Makes every pair uncovered again.
    pub fn clear_cover(&mut self) {
        self.cover.clear();
    }

    /// Whether `v` lies on a shortest `dir` path from `u` through an arc of
    /// length `len` into `w`.
    #[inline(always)]
    fn on_path(&self, u: Vertex, v: Vertex, w: Vertex, len: Distance, dir: Direction) -> bool {
        let (dv, dw) = (self.distance(u, v, dir), self.distance(u, w, dir));
        dv != INFTY && dw != INFTY && dv as u64 + len as u64 == dw as u64
    }

    /// Collects into `out` the not-yet-covered descendants of `v` in `u`'s
    /// shortest-path DAG along `dir` (including `v` itself). Empty when the
    /// pair `(u, v)` is covered or unreachable.
    pub fn descendants(
        &self,
        u: Vertex,
        v: Vertex,
        dir: Direction,
        scratch: &mut SpScratch,
        out: &mut Vec<Vertex>,
    ) {
        out.clear();
        if self.is_covered(u, v, dir) || self.distance(u, v, dir) == INFTY {
            return;
        }
        out.push(v);
        scratch.visited.set(v, true);
        let mut i = 0;
        while i < out.len() {
            let x = out[i];
            for a in self.graph.arcs(x, dir) {
                if !scratch.visited[a.head]
                    && !self.is_covered(u, a.head, dir)
                    && self.on_path(u, x, a.head, a.length, dir)
                {
                    out.push(a.head);
                    scratch.visited.set(a.head, true);
                }
            }
            i += 1;
        }
        for &x in out.iter() {
            scratch.visited.set(x, false);
        }
    }

    /// Collects into `out` the ascendants of `v` in `u`'s shortest-path DAG
    /// along `dir` (including `v` itself). Empty when the pair `(u, v)` is
    /// covered or unreachable.
    pub fn ascendants(
        &self,
        u: Vertex,
        v: Vertex,
        dir: Direction,
        scratch: &mut SpScratch,
        out: &mut Vec<Vertex>,
    ) {
        out.clear();
        if self.is_covered(u, v, dir) || self.distance(u, v, dir) == INFTY {
            return;
        }
        out.push(v);
        scratch.visited.set(v, true);
        let mut i = 0;
        while i < out.len() {
            let x = out[i];
            for a in self.graph.arcs(x, dir.flip()) {
                if !scratch.visited[a.head] && self.on_path(u, a.head, x, a.length, dir) {
                    out.push(a.head);
                    scratch.visited.set(a.head, true);
                }
            }
            i += 1;
        }
        for &x in out.iter() {
            scratch.visited.set(x, false);
        }
    }

    /// Like [`descendants`](ShortestPaths::descendants) but ignoring
    /// coverage: the whole DAG below `v`. Callers filter covered pairs
    /// themselves.
    pub fn all_descendants(
        &self,
        u: Vertex,
        v: Vertex,
        dir: Direction,
        scratch: &mut SpScratch,
        out: &mut Vec<Vertex>,
    ) {
        out.clear();
        if self.distance(u, v, dir) == INFTY {
            return;
        }
        out.push(v);
        scratch.visited.set(v, true);
        let mut i = 0;
        while i < out.len() {
            let x = out[i];
            for a in self.graph.arcs(x, dir) {
                if !scratch.visited[a.head] && self.on_path(u, x, a.head, a.length, dir) {
                    out.push(a.head);
                    scratch.visited.set(a.head, true);
                }
            }
            i += 1;
        }
        for &x in out.iter() {
            scratch.visited.set(x, false);
        }
    }
}

/// The shortest-paths oracle specialized to unique shortest paths: besides
/// the distance table it stores, for both directions, every source's
/// shortest-path tree as a parent table, so DAG traversals become tree
/// walks.
pub struct UspShortestPaths<'a> {
    graph: &'a Graph,
    n: usize,
    dist: Vec<Distance>,
    // parent[dir][u * n + v] is v's parent in u's `dir` tree.
    parent: [Vec<Vertex>; 2],
    cover: Cover,
}

/// Collects the subtree of `v` in the tree encoded by `parent_row`,
/// following forward arcs.
fn spt_descendants(
    graph: &Graph,
    parent_row: &[Vertex],
    v: Vertex,
    visited: &mut BitVec,
    out: &mut Vec<Vertex>,
) {
    out.clear();
    out.push(v);
    visited.set(v, true);
    let mut i = 0;
    while i < out.len() {
        let x = out[i];
        for a in graph.arcs(x, Direction::Forward) {
            if !visited[a.head] && parent_row[a.head] == x {
                out.push(a.head);
                visited.set(a.head, true);
            }
        }
        i += 1;
    }
    for &x in out.iter() {
        visited.set(x, false);
    }
}

impl<'a> UspShortestPaths<'a> {
    /// Builds the distance table and both parent tables.
    ///
    /// Forward trees come from the tie-breaking Dijkstra. The reverse trees
    /// are derived from them: for each forward tree edge `(u, a)`, every
    /// vertex of `a`'s subtree reaches `u` backwards through `a`, so its
    /// reverse-tree parent at root `x` is `a`. This keeps the trees mutually
    /// consistent even on graphs that are not truly unique-path.
    pub fn new(graph: &'a Graph, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) -> Self {
        let n = graph.n();
        let mut dist = vec![INFTY; n * n];
        let mut parent_fwd = vec![NONE; n * n];
        let mut parent_rev = vec![NONE; n * n];
        pl.item_name("source");
        pl.expected_updates(Some(n));
        pl.start("Computing the distance table and shortest-path trees...");
        if n > 0 {
            thread_pool.install(|| {
                dist.par_chunks_mut(n)
                    .zip(parent_fwd.par_chunks_mut(n))
                    .enumerate()
                    .for_each_init(
                        || UspDijkstra::new(graph),
                        |dijkstra, (u, (drow, prow))| {
                            dijkstra.run(u, Direction::Forward);
                            for v in 0..n {
                                drow[v] = dijkstra.distance(v);
                                prow[v] = dijkstra.parent(v);
                            }
                        },
                    )
            });

            let workers = thread_pool.current_num_threads().max(1);
            let mut scratches: Vec<(BitVec, Vec<Vertex>)> =
                (0..workers).map(|_| (BitVec::new(n), Vec::new())).collect();
            let parent_fwd = &parent_fwd;
            let rev_cells = parent_rev.as_sync_slice();
            thread_pool.install(|| {
                scratches
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(k, (visited, out))| {
                        let mut u = k;
                        while u < n {
                            let row = &parent_fwd[u * n..(u + 1) * n];
                            for a in graph.arcs(u, Direction::Forward) {
                                if row[a.head] != u {
                                    continue;
                                }
                                spt_descendants(graph, row, a.head, visited, out);
                                for &x in out.iter() {
                                    // Sole writer of column u.
                                    unsafe { rev_cells[x * n + u].set(a.head) };
                                }
                            }
                            u += workers;
                        }
                    })
            });
        }
        pl.done_with_count(n);
        UspShortestPaths {
            graph,
            n,
            dist,
            parent: [parent_rev, parent_fwd],
            cover: Cover::new(n),
        }
    }

    #[inline(always)]
    pub fn distance(&self, u: Vertex, v: Vertex, dir: Direction) -> Distance {
        match dir {
            Direction::Forward => self.dist[u * self.n + v],
            Direction::Reverse => self.dist[v * self.n + u],
        }
    }

    /// `v`'s parent in `u`'s `dir` shortest-path tree.
    #[inline(always)]
    pub fn parent(&self, u: Vertex, v: Vertex, dir: Direction) -> Vertex {
        self.parent[dir.index()][u * self.n + v]
    }

    #[inline(always)]
    pub fn set_cover(&self, u: Vertex, v: Vertex) {
        self.cover.mark(u, v);
    }

    #[inline(always)]
    pub fn is_covered(&self, u: Vertex, v: Vertex, dir: Direction) -> bool {
        self.cover.get(u, v, dir)
    }

    pub fn clear_cover(&mut self) {
        self.cover.clear();
    }

    /// Collects into `out`, in tree order, the not-yet-covered subtree of
    /// `v` in `u`'s `dir` shortest-path tree.
    pub fn descendants(
        &self,
        u: Vertex,
        v: Vertex,
        dir: Direction,
        scratch: &mut SpScratch,
        out: &mut Vec<Vertex>,
    ) {
        out.clear();
        if self.is_covered(u, v, dir) || (u != v && self.parent(u, v, dir) == NONE) {
            return;
        }
        out.push(v);
        scratch.visited.set(v, true);
        let mut i = 0;
        while i < out.len() {
            let x = out[i];
            for a in self.graph.arcs(x, dir) {
                if !scratch.visited[a.head]
                    && !self.is_covered(u, a.head, dir)
                    && self.parent(u, a.head, dir) == x
                {
                    out.push(a.head);
                    scratch.visited.set(a.head, true);
                }
            }
            i += 1;
        }
        for &x in out.iter() {
            scratch.visited.set(x, false);
        }
    }

    /// Collects into `out` the path from `v` toward the root of `u`'s `dir`
    /// shortest-path tree.
    pub fn ascendants(
        &self,
        u: Vertex,
        v: Vertex,
        dir: Direction,
        scratch: &mut SpScratch,
        out: &mut Vec<Vertex>,
    ) {
        out.clear();
        if self.is_covered(u, v, dir) || (u != v && self.parent(u, v, dir) == NONE) {
            return;
        }
        out.push(v);
        scratch.visited.set(v, true);
        let mut i = 0;
        while i < out.len() {
            let x = out[i];
            for a in self.graph.arcs(x, dir.flip()) {
                if !scratch.visited[a.head] && self.parent(u, x, dir) == a.head {
                    out.push(a.head);
                    scratch.visited.set(a.head, true);
                }
            }
            i += 1;
        }
        for &x in out.iter() {
            scratch.visited.set(x, false);
        }
    }
}
