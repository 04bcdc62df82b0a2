//! Greedy (non-hierarchical) hub labeling approximately minimizing the
//! p-norm of the label sizes.
//!
//! Each candidate hub `v` has a bipartite *center graph*: one side per
//! direction, with an edge between `(u, reverse)` and `(u', forward)` when
//! the uncovered pair `(u, u')` has a shortest path through `v`. The
//! algorithm repeatedly augments the labeling with an approximate
//! maximum-density subgraph (AMDS) of the currently best center graph,
//! where a vertex weighs the marginal p-norm cost of adding `v` to its
//! label. A global queue keyed on inverse density drives the selection
//! lazily: stale densities are re-evaluated with an early-exit bound and
//! only committed when still within a factor `alpha` of the estimate.

use crate::algo::sp::{ShortestPaths, SpScratch};
use crate::graph::{Direction, Distance, Graph, Vertex};
use crate::labeling::Labeling;
use crate::utils::KHeap;
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use sux::bits::BitVec;

/// A view over a [`Labeling`] that also tracks membership, so "is `v`
/// already a hub of `u`?" is a constant-time lookup and repeated adds are
/// absorbed.
pub struct ProxyLabeling<'a> {
    labeling: &'a mut Labeling,
    n: usize,
    // inlabel[side] holds bit hub * n + u.
    inlabel: [BitVec; 2],
}

impl<'a> ProxyLabeling<'a> {
    pub fn new(labeling: &'a mut Labeling) -> Self {
        let n = labeling.n();
        labeling.clear();
        ProxyLabeling {
            labeling,
            n,
            inlabel: [BitVec::new(n * n), BitVec::new(n * n)],
        }
    }

    /// Adds hub `(hub, d)` to the `side` label of `u` unless already there.
    pub fn add(&mut self, u: Vertex, side: Direction, hub: Vertex, d: Distance) {
        if !self.in_label(u, side, hub) {
            self.labeling.add(u, side, hub, d);
            self.inlabel[side.index()].set(hub * self.n + u, true);
        }
    }

    /// Whether `hub` is already in the `side` label of `u`.
    #[inline(always)]
    pub fn in_label(&self, u: Vertex, side: Direction, hub: Vertex) -> bool {
        self.inlabel[side.index()][hub * self.n + u]
    }

    /// The current size of the `side` label of `u`.
    #[inline(always)]
    pub fn label_size(&self, u: Vertex, side: Direction) -> usize {
        self.labeling.label(u, side).len()
    }
}

/// The marginal p-norm cost of growing the `side` label of `u` by one hub.
fn marginal_weight(proxy: &ProxyLabeling, u: Vertex, side: Direction, p: f64) -> f64 {
    let base = proxy.label_size(u, side) as f64;
    (base + 1.0).powf(p) - base.powf(p)
}

/// Density of `edges` over `vertex_weight`, with zero weight and positive
/// edges counting as unbounded.
fn density_ratio(edges: usize, vertex_weight: f64) -> f64 {
    if edges == 0 {
        0.0
    } else if vertex_weight == 0.0 {
        f64::MAX
    } else {
        edges as f64 / vertex_weight
    }
}

/// Approximate maximum-density subgraph of one vertex's center graph, by
/// greedy peeling: repeatedly drop the center-graph vertex of smallest
/// degree-to-weight ratio, tracking the best density seen.
pub struct Amds {
    n: usize,
    // Center-graph vertices are side * n + u.
    queue: KHeap<(f64, usize)>,
    degree: [Vec<usize>; 2],
    inside: [BitVec; 2],
    scratch: SpScratch,
    desc: Vec<Vertex>,
}

impl Amds {
    pub fn new(n: usize) -> Self {
        Amds {
            n,
            queue: KHeap::new(2 * n),
            degree: [vec![0; n], vec![0; n]],
            inside: [BitVec::new(n), BitVec::new(n)],
            scratch: SpScratch::new(n),
            desc: Vec::new(),
        }
    }

    /// Whether `(u, side)` is in the subgraph of the last
    /// [`run`](Amds::run). Only meaningful when the returned density
    /// reached the limit, i.e. when peeling stopped early.
    #[inline(always)]
    pub fn is_in(&self, u: Vertex, side: Direction) -> bool {
        self.inside[side.index()][u]
    }

    /// Peels `v`'s center graph and returns the best density seen, or any
    /// density at least `limit` as soon as one is reached.
    ///
    /// Center-graph vertices whose label already contains `v` keep their
    /// edges but stay out of the weighted queue: they cost nothing more.
    pub fn run(
        &mut self,
        v: Vertex,
        p: f64,
        limit: f64,
        sp: &ShortestPaths,
        proxy: &ProxyLabeling,
    ) -> f64 {
        let n = self.n;
        self.queue.clear();
        let mut edges = 0usize;
        let mut vertex_weight = 0f64;

        for u in 0..n {
            for side in Direction::BOTH {
                sp.all_descendants(u, v, side, &mut self.scratch, &mut self.desc);
                let mut d = 0;
                for &x in &self.desc {
                    if !sp.is_covered(u, x, side) {
                        d += 1;
                    }
                }
                self.degree[side.index()][u] = d;
                self.inside[side.index()].set(u, d > 0);
                if side == Direction::Forward {
                    edges += d;
                }
                if d > 0 && !proxy.in_label(u, side, v) {
                    let uw = marginal_weight(proxy, u, side, p);
                    let id = side.index() * n + u;
                    self.queue.update(id, (d as f64 / uw, id));
                    vertex_weight += uw;
                }
            }
        }

        let mut r = density_ratio(edges, vertex_weight);
        let mut best = r;
        while r < limit {
            let Some(id) = self.queue.pop() else {
                break;
            };
            let (side, u) = if id >= n {
                (Direction::Forward, id - n)
            } else {
                (Direction::Reverse, id)
            };
            self.inside[side.index()].set(u, false);
            edges -= self.degree[side.index()][u];
            vertex_weight -= marginal_weight(proxy, u, side, p);
            sp.all_descendants(u, v, side, &mut self.scratch, &mut self.desc);
            let other = side.flip();
            for i in 0..self.desc.len() {
                let x = self.desc[i];
                if !self.inside[other.index()][x] || sp.is_covered(u, x, side) {
                    continue;
                }
                assert!(self.degree[other.index()][x] > 0);
                self.degree[other.index()][x] -= 1;
                let xw = marginal_weight(proxy, x, other, p);
                if self.degree[other.index()][x] == 0 {
                    self.inside[other.index()].set(x, false);
                }
                if !proxy.in_label(x, other, v) {
                    let xid = other.index() * n + x;
                    if self.degree[other.index()][x] == 0 {
                        self.queue.extract(xid);
                        vertex_weight -= xw;
                    } else {
                        self.queue
                            .update(xid, (self.degree[other.index()][x] as f64 / xw, xid));
                    }
                }
            }
            r = density_ratio(edges, vertex_weight);
            if best < r {
                best = r;
            }
        }
        best
    }
}

/// The p-norm greedy hub labeling builder.
pub struct GreedyHl<'a> {
    n: usize,
    workers: usize,
    sp: ShortestPaths<'a>,
    queue: KHeap<(f64, Vertex)>,
    density: Vec<f64>,
    scratch: SpScratch,
    desc: Vec<Vertex>,
}

impl<'a> GreedyHl<'a> {
    pub fn new(graph: &'a Graph, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) -> Self {
        let n = graph.n();
        GreedyHl {
            n,
            workers: thread_pool.current_num_threads().max(1),
            sp: ShortestPaths::new(graph, thread_pool, pl),
            queue: KHeap::new(n),
            density: vec![0.0; n],
            scratch: SpScratch::new(n),
            desc: Vec::new(),
        }
    }

    /// Commits the AMDS of `v`'s center graph: `v` becomes a hub of every
    /// member, and every center-graph edge inside the subgraph is marked
    /// covered.
    fn increase_cover(&mut self, v: Vertex, amds: &Amds, proxy: &mut ProxyLabeling) {
        let n = self.n;
        let sp = &self.sp;
        for side in Direction::BOTH {
            for u in 0..n {
                if !amds.is_in(u, side) {
                    continue;
                }
                proxy.add(u, side, v, sp.distance(u, v, side));
                if side == Direction::Forward {
                    sp.all_descendants(u, v, Direction::Forward, &mut self.scratch, &mut self.desc);
                    for &x in &self.desc {
                        if amds.is_in(x, Direction::Reverse) {
                            sp.set_cover(u, x);
                        }
                    }
                }
            }
        }
    }

    /// Builds a labeling approximately minimizing the p-norm of label
    /// sizes. `alpha >= 1` trades construction time for label size: a stale
    /// density within a factor `alpha` of the fresh one is committed
    /// without re-queueing.
    pub fn run(
        &mut self,
        labeling: &mut Labeling,
        alpha: f64,
        p: f64,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) {
        assert!(alpha >= 1.0);
        let n = self.n;
        let t = self.workers;
        self.queue.clear();
        self.sp.clear_cover();
        let mut proxy = ProxyLabeling::new(labeling);
        let mut amds: Vec<Amds> = (0..t).map(|_| Amds::new(n)).collect();

        pl.start("Computing initial center-graph densities...");
        {
            let sp = &self.sp;
            let proxy = &proxy;
            let density = self.density.as_mut_slice();
            let chunk = n.div_ceil(t).max(1);
            thread_pool.install(|| {
                density
                    .par_chunks_mut(chunk)
                    .zip(amds.par_iter_mut())
                    .enumerate()
                    .for_each(|(c, (densities, amds))| {
                        for (i, d) in densities.iter_mut().enumerate() {
                            *d = amds.run(c * chunk + i, p, f64::MAX, sp, proxy);
                        }
                    })
            });
        }
        for v in 0..n {
            self.queue.update(v, (1.0 / self.density[v], v));
        }
        pl.done();

        // Lazy selection: re-evaluate up to one candidate per worker, feed
        // the fresh densities back, and commit only the round's best, and
        // only if it stayed within alpha of its stale estimate (so the
        // early-exit membership snapshot is the actual subgraph).
        pl.item_name("round");
        pl.start("Augmenting labels by maximum-density subgraphs...");
        while !self.queue.is_empty() {
            let mut batch: Vec<(Vertex, f64)> = Vec::with_capacity(t);
            while batch.len() < t {
                match self.queue.pop() {
                    Some(v) => batch.push((v, self.density[v])),
                    None => break,
                }
            }
            let results: Vec<f64> = {
                let sp = &self.sp;
                let proxy = &proxy;
                thread_pool.install(|| {
                    batch
                        .par_iter()
                        .zip(amds.par_iter_mut())
                        .map(|(&(v, stale), amds)| amds.run(v, p, stale / alpha, sp, proxy))
                        .collect()
                })
            };

            let mut by_density: Vec<usize> = (0..batch.len()).collect();
            by_density.sort_unstable_by(|&i, &j| {
                results[j]
                    .total_cmp(&results[i])
                    .then(batch[i].0.cmp(&batch[j].0))
            });
            for &i in &by_density {
                let (v, _) = batch[i];
                let fresh = results[i];
                // A candidate whose center graph went dry is dropped.
                if fresh > f64::EPSILON {
                    self.density[v] = fresh;
                    self.queue.update(v, (1.0 / fresh, v));
                }
            }
            if let Some(&i) = by_density.first() {
                let (v, stale) = batch[i];
                let fresh = results[i];
                if fresh > f64::EPSILON && fresh + f64::EPSILON >= stale / alpha {
                    self.increase_cover(v, &amds[i], &mut proxy);
                }
            }
            pl.light_update();
        }
        drop(proxy);
        labeling.sort();
        pl.done();
    }
}
