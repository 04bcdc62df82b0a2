use anyhow::Result;
use clap::Parser;
use dsi_progress_logger::prelude::*;
use hublab::graph::io;
use hublab::labeling::{check, Labeling};
use hublab::utils::threads::Threads;
use std::path::PathBuf;
use std::process::ExitCode;

/// Print hub labeling statistics and optionally verify the labels against
/// ground-truth shortest paths.
#[derive(Parser)]
struct Args {
    /// Check the labels (otherwise print statistics only)
    #[arg(short = 'c')]
    check: bool,
    /// File with the labeling
    #[arg(short = 'l', value_name = "labeling")]
    labeling: PathBuf,
    /// Number of threads
    #[arg(short = 't', value_name = "threads")]
    threads: Option<usize>,
    /// Graph file (DIMACS or METIS)
    graph: PathBuf,
}

fn run(args: &Args) -> Result<bool> {
    let thread_pool = match args.threads {
        Some(t) => Threads::NumThreads(t),
        None => Threads::Default,
    }
    .build();

    let graph = io::load(&args.graph, false)?;
    println!("Graph has {} vertices and {} arcs", graph.n(), graph.m());

    let labels = Labeling::read(&args.labeling, Some(graph.n()))?;

    let mut good = true;
    if args.check {
        let mut pl = progress_logger![];
        good = check::run(&graph, &labels, &thread_pool, &mut pl);
        println!("{}", if good { "Labels OK" } else { "Bad Labels" });
    }

    println!("Average label size {}", labels.avg());
    println!("Maximum label size {}", labels.max());
    Ok(good)
}

fn main() -> ExitCode {
    if let Err(e) = stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
    {
        eprintln!("{e}");
        return ExitCode::from(1);
    }
    let args = Args::parse();
    match run(&args) {
        // Incorrect labels are a result, not an I/O failure; keep the exit
        // codes apart.
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
