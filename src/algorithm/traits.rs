use crate::algorithm::ShortestPaths;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPaths<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
