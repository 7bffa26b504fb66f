//! Multipath SSSP - Single-Source Shortest Paths with tied predecessors
//!
//! This library computes, for a weighted directed graph with non-negative edge
//! weights, the minimum distance from a source vertex to every other vertex
//! together with *every* immediate predecessor that lies on some shortest path.
//!
//! Unreachable vertices report a distance of zero; use
//! [`ShortestPaths::is_reachable`] to tell them apart from the source.

pub mod algorithm;
pub mod data_structures;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;
pub mod web;

pub use algorithm::{ShortestPathEngine, ShortestPaths, VertexReport};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight on edge from {from} to {to}")]
    NegativeWeight { from: usize, to: usize },

    #[error("Distance overflows the weight type on edge from {from} to {to}")]
    DistanceOverflow { from: usize, to: usize },

    #[error("Graph has no vertices")]
    EmptyGraph,

    #[error("Unable to allocate shortest path state for {0} vertices")]
    ResourceExhausted(usize),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
