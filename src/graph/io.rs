//! Graph loading: DIMACS shortest-paths files, METIS adjacency files, and
//! format autodetection.

use super::{Graph, GraphBuilder, Vertex, INFTY};
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use thiserror::Error;

/// A format-specific parse failure; autodetection tries the next format on
/// it.
#[derive(Error, Debug)]
#[error("line {line}: {msg}")]
pub struct ParseError {
    pub line: usize,
    pub msg: String,
}

fn err<T>(line: usize, msg: impl Into<String>) -> std::result::Result<T, ParseError> {
    Err(ParseError {
        line: line + 1,
        msg: msg.into(),
    })
}

/// Reads a graph from a file, autodetecting the format (DIMACS first, then
/// METIS). With `undirected`, every arc is loaded as a bidirectional edge.
pub fn load(path: impl AsRef<Path>, undirected: bool) -> Result<Graph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to open graph file {}", path.display()))?;
    read(&text, undirected).with_context(|| format!("unable to read graph from {}", path.display()))
}

/// Parses a graph from text, autodetecting the format.
pub fn read(text: &str, undirected: bool) -> Result<Graph> {
    match parse_dimacs(text, undirected) {
        Ok(g) => Ok(g),
        Err(dimacs) => match parse_metis(text, undirected) {
            Ok(g) => Ok(g),
            Err(metis) => Err(anyhow!(
                "unrecognized graph format (as DIMACS: {dimacs}; as METIS: {metis})"
            )),
        },
    }
}

fn parse_endpoint(tok: &str, n: usize) -> Option<Vertex> {
    // 1-based in both file formats.
    let id: usize = tok.parse().ok()?;
    if id == 0 || id > n {
        return None;
    }
    Some(id - 1)
}

fn parse_length(tok: &str) -> Option<u32> {
    let w: u64 = tok.parse().ok()?;
    if w == 0 || w >= INFTY as u64 {
        return None;
    }
    Some(w as u32)
}

/// DIMACS shortest-paths format: `c` comment lines, one `p sp n m` header,
/// and `m` lines `a u v w` with 1-based endpoints and positive lengths.
pub fn parse_dimacs(text: &str, undirected: bool) -> std::result::Result<Graph, ParseError> {
    let mut builder: Option<GraphBuilder> = None;
    let mut n = 0;
    let mut header_m = 0;
    let mut arc_lines = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        match line.bytes().next() {
            Some(b'c') => continue,
            Some(b'p') => {
                if builder.is_some() {
                    return err(lineno, "duplicate header");
                }
                let mut it = line.split_whitespace();
                if it.next() != Some("p") || it.next() != Some("sp") {
                    return err(lineno, "malformed header");
                }
                let (Some(nn), Some(mm), None) = (it.next(), it.next(), it.next()) else {
                    return err(lineno, "malformed header");
                };
                let (nn, mm) = match (nn.parse::<usize>(), mm.parse::<usize>()) {
                    (Ok(nn), Ok(mm)) => (nn, mm),
                    _ => return err(lineno, "malformed header"),
                };
                n = nn;
                header_m = mm;
                builder = Some(GraphBuilder::new(n));
            }
            Some(b'a') => {
                let Some(builder) = builder.as_mut() else {
                    return err(lineno, "arc before header");
                };
                let mut it = line.split_whitespace();
                it.next();
                let (Some(u), Some(v), Some(w), None) = (it.next(), it.next(), it.next(), it.next())
                else {
                    return err(lineno, "malformed arc line");
                };
                let (Some(u), Some(v), Some(w)) =
                    (parse_endpoint(u, n), parse_endpoint(v, n), parse_length(w))
                else {
                    return err(lineno, "arc endpoint or length out of range");
                };
                if !builder.arc(u, v, w, undirected) {
                    return err(lineno, "arc endpoint or length out of range");
                }
                arc_lines += 1;
            }
            _ => return err(lineno, "unrecognized line"),
        }
    }
    let Some(builder) = builder else {
        return err(0, "missing header");
    };
    if arc_lines != header_m {
        return err(
            0,
            format!("header announces {header_m} arcs, file contains {arc_lines}"),
        );
    }
    Ok(builder.build())
}

/// METIS adjacency format.
///
/// The header is `n m [fmt] [ncon]` where `fmt = ijk` flags the presence of
/// vertex sizes (`i`), vertex weights (`j`, `ncon` of them, default 1) and
/// edge weights (`k`). Vertex sizes and weights are parsed and discarded.
/// `%` lines are comments; every other line after the header is one vertex,
/// blank lines included. The header's edge count is not verified.
pub fn parse_metis(text: &str, undirected: bool) -> std::result::Result<Graph, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.starts_with('%'));

    let Some((header_line, header)) = lines.next() else {
        return err(0, "empty file");
    };
    let fields: Vec<u64> = match header
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
    {
        Ok(f) => f,
        Err(_) => return err(header_line, "malformed header"),
    };
    if fields.len() < 2 || fields.len() > 4 {
        return err(header_line, "malformed header");
    }
    let n = fields[0] as usize;
    let fmt = if fields.len() > 2 { fields[2] } else { 0 };
    if fmt > 111 || fmt % 10 > 1 || (fmt / 10) % 10 > 1 {
        return err(header_line, "unsupported format flags");
    }
    let has_sizes = fmt >= 100;
    let has_weights = fmt % 100 >= 10;
    let has_lengths = fmt % 10 == 1;
    let ncon = if fields.len() > 3 {
        if !has_weights {
            return err(header_line, "vertex weight count without weight flag");
        }
        fields[3] as usize
    } else {
        has_weights as usize
    };
    let skip = has_sizes as usize + ncon;

    let mut builder = GraphBuilder::new(n);
    let mut v: Vertex = 0;
    for (lineno, line) in lines {
        let toks: Vec<&str> = line.split_whitespace().collect();
        if toks.len() < skip {
            return err(lineno, "missing vertex size or weights");
        }
        for chunk in toks[skip..].chunks(if has_lengths { 2 } else { 1 }) {
            let (head, w) = match *chunk {
                [head] if !has_lengths => (head, Some(1)),
                [head, w] => (head, parse_length(w)),
                _ => return err(lineno, "neighbor without edge length"),
            };
            let (Some(head), Some(w)) = (parse_endpoint(head, n), w) else {
                return err(lineno, "neighbor or edge length out of range");
            };
            if !builder.arc(v, head, w, undirected) {
                return err(lineno, "vertex line beyond the announced vertex count");
            }
        }
        v += 1;
    }
    Ok(builder.build())
}
