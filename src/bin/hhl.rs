use anyhow::Result;
use clap::Parser;
use dsi_progress_logger::prelude::*;
use hublab::algo::hhl::GreedyHhl;
use hublab::algo::uhhl::UspGreedyHhl;
use hublab::algo::GreedyKind;
use hublab::graph::io;
use hublab::labeling::Labeling;
use hublab::order;
use hublab::utils::threads::Threads;
use std::path::PathBuf;

/// Build a hierarchical hub labeling (and the vertex order it induces) by
/// greedy selection.
#[derive(Parser)]
struct Args {
    /// Use the label-greedy metric instead of path-greedy
    #[arg(short = 'w')]
    label_greedy: bool,
    /// Assume that shortest paths are unique
    #[arg(short = 'u')]
    usp: bool,
    /// File to write the labeling
    #[arg(short = 'l', value_name = "labeling")]
    labeling: Option<PathBuf>,
    /// File to write the vertex order
    #[arg(short = 'o', value_name = "ordering")]
    ordering: Option<PathBuf>,
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
    let thread_pool = match args.threads {
        Some(t) => Threads::NumThreads(t),
        None => Threads::Default,
    }
    .build();

    let graph = io::load(&args.graph, false)?;
    println!("Graph has {} vertices and {} arcs", graph.n(), graph.m());

    let kind = if args.label_greedy {
        GreedyKind::Label
    } else {
        GreedyKind::Path
    };
    let mut labels = Labeling::new(graph.n());
    let mut order = Vec::new();
    let mut pl = progress_logger![];

    if args.usp {
        UspGreedyHhl::new(&graph, &thread_pool, &mut pl).run(
            kind,
            &mut order,
            &mut labels,
            &thread_pool,
            &mut pl,
        );
    } else {
        GreedyHhl::new(&graph, &thread_pool, &mut pl).run(
            kind,
            &mut order,
            &mut labels,
            &thread_pool,
            &mut pl,
        );
    }

    println!("Average label size {}", labels.avg());
    println!("Maximum label size {}", labels.max());

    if let Some(path) = &args.labeling {
        labels.write(path)?;
    }
    if let Some(path) = &args.ordering {
        order::write(path, &order)?;
    }
    Ok(())
}
