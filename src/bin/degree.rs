use anyhow::Result;
use clap::Parser;
use hublab::graph::io;
use hublab::order;
use std::path::PathBuf;

/// Emit the degree-descending vertex order of a graph.
#[derive(Parser)]
struct Args {
    /// File to write the vertex order
    #[arg(short = 'o', value_name = "ordering")]
    ordering: PathBuf,
    /// Graph file (DIMACS or METIS)
    graph: PathBuf,
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let args = Args::parse();

    let graph = io::load(&args.graph, false)?;
    println!("Graph has {} vertices and {} arcs", graph.n(), graph.m());

    order::write(&args.ordering, &order::by_degree(&graph))?;
    Ok(())
}
