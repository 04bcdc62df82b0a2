//! Single-source shortest paths, with a dirty-set reset so repeated runs
//! cost time proportional to the vertices actually visited.

use crate::graph::{Direction, Distance, Graph, Vertex, INFTY, NONE};
use crate::utils::KHeap;
use sux::bits::BitVec;

/// The working arrays shared by the Dijkstra variants: tentative distances,
/// parents, the vertex queue and the list of entries touched by the current
/// run.
pub(crate) struct SearchState {
    pub queue: KHeap<Distance>,
    pub distance: Vec<Distance>,
    pub parent: Vec<Vertex>,
    pub dirty: Vec<Vertex>,
    is_dirty: BitVec,
}

impl SearchState {
    pub fn new(n: usize) -> Self {
        SearchState {
            queue: KHeap::new(n),
            distance: vec![INFTY; n],
            parent: vec![NONE; n],
            dirty: Vec::with_capacity(n),
            is_dirty: BitVec::new(n),
        }
    }

    /// Lowers `v`'s tentative distance and records it as touched.
    pub fn update(&mut self, v: Vertex, d: Distance, p: Vertex) {
        self.distance[v] = d;
        self.parent[v] = p;
        self.queue.update(v, d);
        if !self.is_dirty[v] {
            self.dirty.push(v);
            self.is_dirty.set(v, true);
        }
    }

    /// Resets only the entries touched by the last run.
    pub fn clear(&mut self) {
        self.queue.clear();
        for &v in &self.dirty {
            self.distance[v] = INFTY;
            self.parent[v] = NONE;
            self.is_dirty.set(v, false);
        }
        self.dirty.clear();
    }
}

/// Classic Dijkstra over either arc direction.
pub struct Dijkstra<'a> {
    graph: &'a Graph,
    state: SearchState,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            graph,
            state: SearchState::new(graph.n()),
        }
    }

    /// The distance from the last run's source to `v`.
    #[inline(always)]
    pub fn distance(&self, v: Vertex) -> Distance {
        self.state.distance[v]
    }

    /// `v`'s parent in the last run's shortest-path tree.
    #[inline(always)]
    pub fn parent(&self, v: Vertex) -> Vertex {
        self.state.parent[v]
    }

    /// Computes distances from `source` to every vertex along direction
    /// `dir`, together with a shortest-path tree.
    pub fn run(&mut self, source: Vertex, dir: Direction) {
        self.state.clear();
        self.state.update(source, 0, NONE);
        while let Some(u) = self.state.queue.pop() {
            let d = self.state.distance[u];
            for a in self.graph.arcs(u, dir) {
                let dd = d + a.length;
                assert!(dd > d && dd < INFTY);
                if dd < self.state.distance[a.head] {
                    self.state.update(a.head, dd, u);
                }
            }
        }
    }
}

/// Dijkstra with deterministic tie breaking, so the shortest-path tree is
/// canonical even when the graph has several equal-length shortest paths.
///
/// A relaxation of equal distance is accepted when it strictly lowers the
/// hop count, or keeps the hop count and lowers the parent id. Every vertex
/// therefore has a unique parent for each source, which the unique-paths
/// labeling algorithms rely on.
pub struct UspDijkstra<'a> {
    graph: &'a Graph,
    state: SearchState,
    hops: Vec<u32>,
}

impl<'a> UspDijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        UspDijkstra {
            graph,
            state: SearchState::new(graph.n()),
            hops: vec![0; graph.n()],
        }
    }

    #[inline(always)]
    pub fn distance(&self, v: Vertex) -> Distance {
        self.state.distance[v]
    }

    #[inline(always)]
    pub fn parent(&self, v: Vertex) -> Vertex {
        self.state.parent[v]
    }

    fn update(&mut self, v: Vertex, d: Distance, hops: u32, p: Vertex) {
        self.hops[v] = hops;
        self.state.update(v, d, p);
    }

    fn clear(&mut self) {
        for &v in &self.state.dirty {
            self.hops[v] = 0;
        }
        self.state.clear();
    }

    pub fn run(&mut self, source: Vertex, dir: Direction) {
        self.clear();
        self.update(source, 0, 0, NONE);
        while let Some(u) = self.state.queue.pop() {
            let d = self.state.distance[u];
            let h = self.hops[u];
            for a in self.graph.arcs(u, dir) {
                let dd = d + a.length;
                assert!(dd > d && dd < INFTY);
                let better = dd < self.state.distance[a.head]
                    || (dd == self.state.distance[a.head]
                        && (h + 1 < self.hops[a.head]
                            || (h + 1 == self.hops[a.head] && u < self.state.parent[a.head])));
                if better {
                    self.update(a.head, dd, h + 1, u);
                }
            }
        }
    }
}
