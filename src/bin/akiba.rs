use anyhow::{ensure, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use hublab::algo::pruned::PrunedLabeling;
use hublab::graph::io;
use hublab::labeling::Labeling;
use hublab::order;
use std::path::PathBuf;

/// Build a hierarchical hub labeling from a vertex order by pruned
/// labeling.
#[derive(Parser)]
struct Args {
    /// File to write the labeling
    #[arg(short = 'l', value_name = "labeling")]
    labeling: Option<PathBuf>,
    /// File with the vertex order
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

    let order = order::read(&args.ordering)?;
    ensure!(
        order.len() == graph.n() && order.iter().all(|&v| v < graph.n()),
        "order is incompatible with the graph"
    );

    let mut labels = Labeling::new(graph.n());
    let mut pl = progress_logger![];
    PrunedLabeling::new(&graph).run(&order, &mut labels, &mut pl);

    println!("Average label size {}", labels.avg());
    println!("Maximum label size {}", labels.max());

    if let Some(path) = &args.labeling {
        labels.write(path)?;
    }
    Ok(())
}
