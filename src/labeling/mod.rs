//! The hub label store: two lists of (hub, distance) pairs per vertex,
//! answering distance queries by a sorted merge.

pub mod check;

use crate::graph::{Direction, Distance, Vertex, INFTY};
use anyhow::{ensure, Context, Result};
use std::io::Write;
use std::path::Path;

/// One hub record: the hub's identifier and the distance between the labeled
/// vertex and the hub, in the direction of the side it is stored on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelEntry {
    pub hub: Vertex,
    pub dist: Distance,
}

/// A two-sided hub labeling.
///
/// After [`sort`](Labeling::sort) each side holds hubs in strictly
/// increasing id order, and [`query`](Labeling::query) returns exact
/// distances provided the labels cover every shortest path.
pub struct Labeling {
    n: usize,
    labels: Vec<[Vec<LabelEntry>; 2]>,
}

impl Labeling {
    pub fn new(n: usize) -> Self {
        Labeling {
            n,
            labels: (0..n).map(|_| [Vec::new(), Vec::new()]).collect(),
        }
    }

    /// The number of labeled vertices.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The distance from `u` to `v` (from `v` to `u` when `dir` is reverse):
    /// the minimum of `d(u, h) + d(h, v)` over the hubs `h` shared by `u`'s
    /// `dir` label and `v`'s mirrored label. `INFTY` when no hub is shared.
    pub fn query(&self, u: Vertex, v: Vertex, dir: Direction) -> Distance {
        let lu = &self.labels[u][dir.index()];
        let lv = &self.labels[v][dir.flip().index()];
        let mut r = INFTY;
        let (mut i, mut j) = (0, 0);
        while i < lu.len() && j < lv.len() {
            match lu[i].hub.cmp(&lv[j].hub) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    assert!(lu[i].dist < INFTY - lv[j].dist);
                    r = r.min(lu[i].dist + lv[j].dist);
                    i += 1;
                    j += 1;
                }
            }
        }
        r
    }

    /// Appends hub `(hub, dist)` to the `side` label of `u`.
    #[inline(always)]
    pub fn add(&mut self, u: Vertex, side: Direction, hub: Vertex, dist: Distance) {
        self.labels[u][side.index()].push(LabelEntry { hub, dist });
    }

    /// The `side` label of `u`.
    #[inline(always)]
    pub fn label(&self, u: Vertex, side: Direction) -> &[LabelEntry] {
        &self.labels[u][side.index()]
    }

    /// Mutable access to the `side` label of `u`.
    pub fn label_mut(&mut self, u: Vertex, side: Direction) -> &mut Vec<LabelEntry> {
        &mut self.labels[u][side.index()]
    }

    /// Orders every label by hub id; required before [`query`](Labeling::query).
    pub fn sort(&mut self) {
        for label in &mut self.labels {
            for side in label {
                side.sort_unstable();
            }
        }
    }

    /// Removes all hubs.
    pub fn clear(&mut self) {
        for label in &mut self.labels {
            for side in label {
                side.clear();
            }
        }
    }

    /// The maximum label size over all vertices and sides.
    pub fn max(&self) -> usize {
        self.labels
            .iter()
            .flatten()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// The average label size over all vertices and sides.
    pub fn avg(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        let total: usize = self.labels.iter().flatten().map(Vec::len).sum();
        total as f64 / self.n as f64 / 2.0
    }

    /// Writes the labeling to a file: the vertex count, then for each vertex
    /// one line per side (forward first), each line the label size followed
    /// by interleaved hub ids and distances.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = std::io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("unable to create label file {}", path.display()))?,
        );
        writeln!(file, "{}", self.n)?;
        for label in &self.labels {
            for side in [Direction::Forward, Direction::Reverse] {
                let l = &label[side.index()];
                write!(file, "{}", l.len())?;
                for e in l {
                    write!(file, " {} {}", e.hub, e.dist)?;
                }
                writeln!(file)?;
            }
        }
        file.flush()?;
        Ok(())
    }

    /// Reads a labeling written by [`write`](Labeling::write). When
    /// `check_n` is given, the stored vertex count must match it.
    pub fn read(path: impl AsRef<Path>, check_n: Option<usize>) -> Result<Labeling> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to open label file {}", path.display()))?;
        Self::parse(&text, check_n)
            .with_context(|| format!("unable to read labels from {}", path.display()))
    }

    fn parse(text: &str, check_n: Option<usize>) -> Result<Labeling> {
        let mut toks = text.split_whitespace();
        let mut next = |what: &str| -> Result<usize> {
            toks.next()
                .with_context(|| format!("missing {what}"))?
                .parse::<usize>()
                .with_context(|| format!("malformed {what}"))
        };
        let n = next("vertex count")?;
        if let Some(check_n) = check_n {
            ensure!(n == check_n, "labeling is for {n} vertices, graph has {check_n}");
        }
        let mut labeling = Labeling::new(n);
        for v in 0..n {
            for side in [Direction::Forward, Direction::Reverse] {
                let k = next("label size")?;
                for _ in 0..k {
                    let hub = next("hub id")?;
                    let dist = next("hub distance")?;
                    ensure!(dist <= INFTY as usize, "hub distance out of range");
                    labeling.add(v, side, hub, dist as Distance);
                }
            }
        }
        ensure!(toks.next().is_none(), "trailing data after labels");
        Ok(labeling)
    }
}
