//! The label-construction algorithms and their shared scaffolding.

pub mod dijkstra;

pub mod sp;

pub mod pruned;

pub mod hhl;
pub mod uhhl;

pub mod ghl;

/// The greedy selection metric of the hierarchical algorithms.
///
/// `Path` picks the vertex covering the most still-uncovered shortest
/// paths; `Label` normalizes that count by the number of uncovered pairs
/// the vertex is an endpoint of.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GreedyKind {
    Path,
    Label,
}
