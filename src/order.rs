//! Vertex orders: file I/O and the degree-descending generator.
//!
//! An order is a permutation of the vertices, most important first. The file
//! format is the vertex count on the first line followed by one 0-based
//! vertex id per line.

use crate::graph::{Graph, Vertex};
use anyhow::{ensure, Context, Result};
use std::io::Write;
use std::path::Path;

pub fn write(path: impl AsRef<Path>, order: &[Vertex]) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::io::BufWriter::new(
        std::fs::File::create(path)
            .with_context(|| format!("unable to create order file {}", path.display()))?,
    );
    writeln!(file, "{}", order.len())?;
    for &v in order {
        writeln!(file, "{}", v)?;
    }
    file.flush()?;
    Ok(())
}

pub fn read(path: impl AsRef<Path>) -> Result<Vec<Vertex>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to open order file {}", path.display()))?;
    parse(&text).with_context(|| format!("unable to read vertex order from {}", path.display()))
}

fn parse(text: &str) -> Result<Vec<Vertex>> {
    let mut toks = text.split_whitespace();
    let n: usize = toks
        .next()
        .context("missing vertex count")?
        .parse()
        .context("malformed vertex count")?;
    let order = toks
        .by_ref()
        .take(n)
        .map(|t| t.parse::<Vertex>().context("malformed vertex id"))
        .collect::<Result<Vec<_>>>()?;
    ensure!(order.len() == n, "order file ends early");
    ensure!(toks.next().is_none(), "trailing data after order");
    Ok(order)
}

/// Orders the vertices by descending total degree, ties toward the larger
/// id.
pub fn by_degree(graph: &Graph) -> Vec<Vertex> {
    let mut keyed: Vec<(usize, Vertex)> = (0..graph.n())
        .map(|v| (graph.total_degree(v), v))
        .collect();
    keyed.sort_unstable();
    keyed.iter().rev().map(|&(_, v)| v).collect()
}
