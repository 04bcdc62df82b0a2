use hublab::algo::dijkstra::Dijkstra;
use hublab::graph::{Direction, Graph, GraphBuilder, Vertex};
use hublab::labeling::Labeling;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A connected random graph with weights in `1..=max_w`: an undirected
/// random tree or a directed cycle as backbone, plus `extra` random arcs.
#[allow(dead_code)]
pub fn random_graph(n: usize, extra: usize, max_w: u32, undirected: bool, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(n);
    if undirected {
        for v in 1..n {
            let u = rng.gen_range(0..v);
            assert!(builder.arc(u, v, rng.gen_range(1..=max_w), true));
        }
    } else {
        for v in 0..n {
            assert!(builder.arc(v, (v + 1) % n, rng.gen_range(1..=max_w), false));
        }
    }
    for _ in 0..extra {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            assert!(builder.arc(u, v, rng.gen_range(1..=max_w), undirected));
        }
    }
    builder.build()
}

/// Asserts that every query answer matches a fresh Dijkstra, in both
/// directions.
#[allow(dead_code)]
pub fn assert_correct(graph: &Graph, labeling: &Labeling) {
    let mut dijkstra = Dijkstra::new(graph);
    for v in 0..graph.n() {
        for dir in Direction::BOTH {
            dijkstra.run(v, dir);
            for u in 0..graph.n() {
                assert_eq!(
                    labeling.query(v, u, dir),
                    dijkstra.distance(u),
                    "wrong distance for ({v}, {u}) {dir:?}"
                );
            }
        }
    }
}

/// Asserts the hierarchy property of a labeling whose hubs are order
/// positions: no vertex has a hub less important than itself.
#[allow(dead_code)]
pub fn assert_hierarchical(labeling: &Labeling, order: &[Vertex]) {
    let mut position = vec![0; order.len()];
    for (i, &v) in order.iter().enumerate() {
        position[v] = i;
    }
    for v in 0..labeling.n() {
        for side in Direction::BOTH {
            for e in labeling.label(v, side) {
                assert!(
                    e.hub <= position[v],
                    "vertex {v} has hub {} below its position {}",
                    e.hub,
                    position[v]
                );
            }
        }
    }
}

/// Asserts that `order` is a permutation of the vertices.
#[allow(dead_code)]
pub fn assert_permutation(order: &[Vertex], n: usize) {
    assert_eq!(order.len(), n);
    let mut seen = vec![false; n];
    for &v in order {
        assert!(v < n && !seen[v]);
        seen[v] = true;
    }
}

/// Asserts that hubs are strictly increasing within every label.
#[allow(dead_code)]
pub fn assert_sorted(labeling: &Labeling) {
    for v in 0..labeling.n() {
        for side in Direction::BOTH {
            let label = labeling.label(v, side);
            for pair in label.windows(2) {
                assert!(pair[0].hub < pair[1].hub);
            }
        }
    }
}
