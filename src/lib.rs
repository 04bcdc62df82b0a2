//! Hub labeling construction for weighted directed graphs.
//!
//! A hub labeling attaches to every vertex two sorted lists of (hub,
//! distance) pairs, one per direction, such that the exact distance between
//! any two vertices is the minimum, over the hubs shared by the source's
//! forward list and the target's reverse list, of the two stored distances.
//!
//! This crate builds such labelings three ways: [pruned
//! labeling](algo::pruned::PrunedLabeling) from a given vertex order, greedy
//! hierarchical labeling ([general](algo::hhl::GreedyHhl) or
//! [specialized to unique shortest paths](algo::uhhl::UspGreedyHhl)), and
//! [p-norm greedy labeling](algo::ghl::GreedyHl) via approximate
//! maximum-density subgraphs.

pub mod algo;
pub mod graph;
pub mod labeling;
pub mod order;
pub mod utils;

pub mod prelude {
    pub use crate::algo::dijkstra::{Dijkstra, UspDijkstra};
    pub use crate::algo::ghl::GreedyHl;
    pub use crate::algo::hhl::GreedyHhl;
    pub use crate::algo::pruned::PrunedLabeling;
    pub use crate::algo::uhhl::UspGreedyHhl;
    pub use crate::algo::GreedyKind;
    pub use crate::graph::{Direction, Distance, Graph, GraphBuilder, Vertex, INFTY, NONE};
    pub use crate::labeling::{LabelEntry, Labeling};
    pub use crate::utils::threads::Threads;
}
