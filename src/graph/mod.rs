//! Basic types (vertices, distances, arcs) and the immutable graph
//! representation shared by all labeling algorithms.

pub mod io;

/// A vertex identifier in `[0, n)`.
pub type Vertex = usize;

/// Sentinel for a missing vertex (no parent, empty slot).
pub const NONE: Vertex = usize::MAX;

/// A non-negative arc length or path distance.
pub type Distance = u32;

/// Distance of unreachable pairs. No finite path may reach it.
pub const INFTY: Distance = Distance::MAX;

/// Arc-iteration direction, which doubles as the label side: hubs reached by
/// a traversal in direction `d` are recorded on side `d.flip()` of the
/// reached vertex.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Reverse,
    Forward,
}

impl Direction {
    /// Both directions, in the order the algorithms process them.
    pub const BOTH: [Direction; 2] = [Direction::Reverse, Direction::Forward];

    /// The opposite direction (or the mirrored label side).
    #[inline(always)]
    pub fn flip(self) -> Self {
        match self {
            Direction::Reverse => Direction::Forward,
            Direction::Forward => Direction::Reverse,
        }
    }

    /// Index for direction-dimensioned tables: reverse is 0, forward is 1.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single adjacency record.
///
/// One record can stand for an undirected edge (both flags set), a directed
/// arc seen from its tail (`forward`), or the same arc seen from its head
/// (`reverse`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc {
    pub head: Vertex,
    pub length: Distance,
    pub forward: bool,
    pub reverse: bool,
}

/// A directed graph with compact adjacency lists iterable in both
/// directions.
///
/// Arcs incident to a vertex are laid out as the pure-reverse records, then
/// the bidirectional records, then the pure-forward records, so that each
/// direction's arcs form one contiguous range (the two ranges overlap on the
/// bidirectional block).
pub struct Graph {
    n: usize,
    m: usize,
    arcs: Vec<Arc>,
    // Half-open arc ranges per direction, indexed by Direction::index.
    first: [Vec<usize>; 2],
    last: [Vec<usize>; 2],
}

impl Graph {
    /// The number of vertices.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The number of arcs, as added (an undirected edge counts twice).
    #[inline(always)]
    pub fn m(&self) -> usize {
        self.m
    }

    /// The arcs incident to `v` that are visible in direction `dir`.
    #[inline(always)]
    pub fn arcs(&self, v: Vertex, dir: Direction) -> &[Arc] {
        let d = dir.index();
        &self.arcs[self.first[d][v]..self.last[d][v]]
    }

    /// The degree of `v` in direction `dir`.
    #[inline(always)]
    pub fn degree(&self, v: Vertex, dir: Direction) -> usize {
        let d = dir.index();
        self.last[d][v] - self.first[d][v]
    }

    /// The total degree of `v` (bidirectional arcs count twice).
    pub fn total_degree(&self, v: Vertex) -> usize {
        self.degree(v, Direction::Forward) + self.degree(v, Direction::Reverse)
    }
}

/// Incremental [`Graph`] construction: create a builder over `n` vertices,
/// add arcs, then [`build`](GraphBuilder::build).
pub struct GraphBuilder {
    n: usize,
    m: usize,
    // (tail, record) pairs; every arc is recorded at both endpoints.
    tmp: Vec<(Vertex, Arc)>,
}

impl GraphBuilder {
    pub fn new(n: usize) -> Self {
        GraphBuilder {
            n,
            m: 0,
            tmp: Vec::new(),
        }
    }

    /// Adds the arc `(u, v)` of length `w`, or the edge `{u, v}` if
    /// `undirected`. Returns `false` if an endpoint is out of range or the
    /// length is not in `(0, INFTY)`.
    pub fn arc(&mut self, u: Vertex, v: Vertex, w: Distance, undirected: bool) -> bool {
        if u >= self.n || v >= self.n || w == 0 || w == INFTY {
            return false;
        }
        self.tmp.push((
            u,
            Arc {
                head: v,
                length: w,
                forward: true,
                reverse: undirected,
            },
        ));
        self.tmp.push((
            v,
            Arc {
                head: u,
                length: w,
                forward: undirected,
                reverse: true,
            },
        ));
        self.m += 1 + undirected as usize;
        true
    }

    /// Finalizes the adjacency lists.
    ///
    /// Records with equal (tail, head, direction flags) collapse to the
    /// shortest one; records equal up to direction flags merge into a single
    /// bidirectional record; the result is laid out so each direction is a
    /// contiguous range per vertex.
    pub fn build(self) -> Graph {
        let GraphBuilder { n, m, mut tmp } = self;

        // (tail, reverse desc, forward asc, head, length)
        let direction_key =
            |t: &(Vertex, Arc)| (t.0, !t.1.reverse, t.1.forward, t.1.head, t.1.length);

        tmp.sort_unstable_by_key(direction_key);
        tmp.dedup_by(|cur, prev| {
            cur.0 == prev.0
                && cur.1.head == prev.1.head
                && cur.1.forward == prev.1.forward
                && cur.1.reverse == prev.1.reverse
        });

        tmp.sort_unstable_by_key(|t| (t.0, t.1.head, t.1.length));
        tmp.dedup_by(|cur, prev| {
            if cur.0 == prev.0 && cur.1.head == prev.1.head && cur.1.length == prev.1.length {
                prev.1.forward |= cur.1.forward;
                prev.1.reverse |= cur.1.reverse;
                true
            } else {
                false
            }
        });

        tmp.sort_unstable_by_key(direction_key);

        let mut arcs = Vec::with_capacity(tmp.len());
        let mut first = [vec![0; n], vec![0; n]];
        let mut last = [vec![0; n], vec![0; n]];
        for (j, &(tail, arc)) in tmp.iter().enumerate() {
            arcs.push(arc);
            if j == 0 || tmp[j - 1].0 != tail {
                if arc.reverse {
                    first[0][tail] = j;
                }
                if arc.forward {
                    first[1][tail] = j;
                }
            }
            if j + 1 == tmp.len() || tmp[j + 1].0 != tail {
                if arc.reverse {
                    last[0][tail] = j + 1;
                }
                if arc.forward {
                    last[1][tail] = j + 1;
                }
            }
            if j > 0 && tmp[j - 1].0 == tail {
                let prev = tmp[j - 1].1;
                if arc.reverse != prev.reverse {
                    last[0][tail] = j;
                }
                if arc.forward != prev.forward {
                    first[1][tail] = j;
                }
            }
        }

        Graph {
            n,
            m,
            arcs,
            first,
            last,
        }
    }
}
