use anyhow::{ensure, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use hublab::algo::ghl::GreedyHl;
use hublab::graph::io;
use hublab::labeling::Labeling;
use hublab::utils::threads::Threads;
use std::path::PathBuf;

/// Build an approximately p-norm-optimal hub labeling by greedy
/// maximum-density-subgraph augmentation.
#[derive(Parser)]
struct Args {
    /// p-norm to approximate; 'max' approximates the maximum label size
    #[arg(short = 'p', value_name = "norm", default_value = "1.0")]
    norm: String,
    /// Speed/size tradeoff (>= 1.0): stale densities within this factor are
    /// committed without re-queueing
    #[arg(short = 'a', value_name = "alpha", default_value_t = 1.1)]
    alpha: f64,
    /// File to write the labeling
    #[arg(short = 'l', value_name = "labeling")]
    labeling: Option<PathBuf>,
    /// Number of threads
    #[arg(short = 't', value_name = "threads")]
    threads: Option<usize>,
    /// Graph file (DIMACS or METIS)
    graph: PathBuf,
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let args = Args::parse();
    ensure!(args.alpha >= 1.0, "alpha must be at least 1.0");
    let thread_pool = match args.threads {
        Some(t) => Threads::NumThreads(t),
        None => Threads::Default,
    }
    .build();

    let graph = io::load(&args.graph, false)?;
    println!("Graph has {} vertices and {} arcs", graph.n(), graph.m());

    let p = if args.norm == "max" {
        (graph.n() as f64).ln()
    } else {
        args.norm
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("invalid norm {:?}", args.norm))?
    };

    let mut labels = Labeling::new(graph.n());
    let mut pl = progress_logger![];
    GreedyHl::new(&graph, &thread_pool, &mut pl).run(&mut labels, args.alpha, p, &thread_pool, &mut pl);

    println!("Average label size {}", labels.avg());
    println!("Maximum label size {}", labels.max());

    if let Some(path) = &args.labeling {
        labels.write(path)?;
    }
    Ok(())
}
