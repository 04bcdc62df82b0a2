use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsi_progress_logger::no_logging;
use hublab::algo::pruned::PrunedLabeling;
use hublab::graph::{Direction, Graph, GraphBuilder};
use hublab::labeling::Labeling;
use hublab::order;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_graph(n: usize, extra: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(n);
    for v in 1..n {
        builder.arc(rng.gen_range(0..v), v, rng.gen_range(1..=100), true);
    }
    for _ in 0..extra {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            builder.arc(u, v, rng.gen_range(1..=100), true);
        }
    }
    builder.build()
}

fn bench_pruned_labeling(c: &mut Criterion) {
    let graph = random_graph(256, 512, 0xDA7A);
    let degree_order = order::by_degree(&graph);
    c.bench_function("pruned labeling n=256", |b| {
        b.iter(|| {
            let mut labels = Labeling::new(graph.n());
            PrunedLabeling::new(&graph).run(&degree_order, &mut labels, no_logging![]);
            black_box(labels.max())
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let graph = random_graph(256, 512, 0xDA7A);
    let mut labels = Labeling::new(graph.n());
    PrunedLabeling::new(&graph).run(&order::by_degree(&graph), &mut labels, no_logging![]);
    let mut rng = StdRng::seed_from_u64(1);
    let pairs: Vec<(usize, usize)> = (0..1024)
        .map(|_| (rng.gen_range(0..graph.n()), rng.gen_range(0..graph.n())))
        .collect();
    c.bench_function("query x1024 n=256", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for &(u, v) in &pairs {
                acc += labels.query(u, v, Direction::Forward) as u64;
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_pruned_labeling, bench_query);
criterion_main!(benches);
