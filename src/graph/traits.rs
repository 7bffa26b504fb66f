use std::fmt::Debug;
use num_traits::{CheckedAdd, Zero};
use ordered_float::OrderedFloat;

/// Edge weight usable by the shortest path engine.
///
/// Weights must be totally ordered so that ties can be detected exactly;
/// use `ordered_float::OrderedFloat` for floating point weights.
pub trait Weight: Copy + Ord + Zero + Debug {
    /// Sum of two weights, or `None` if it is not representable
    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_weight {
    ($($t:ty),*) => {
        $(
            // Infinite sums count as overflow
            impl Weight for OrderedFloat<$t> {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    if sum.into_inner().is_finite() {
                        Some(sum)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

float_weight!(f32, f64);

/// Trait representing a weighted directed graph
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns an iterator over the incoming edges to a vertex
    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_edges(from).any(|(target, _)| target == to)
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Weight,
{
    /// Adds a vertex to the graph and returns its ID
    fn add_vertex(&mut self) -> usize;

    /// Removes every edge touching the vertex. The ID stays allocated.
    fn remove_vertex(&mut self, vertex: usize) -> bool;

    /// Adds a directed edge between vertices with the given weight
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool;

    /// Removes an edge from the graph
    fn remove_edge(&mut self, from: usize, to: usize) -> bool;

    /// Updates the weight of an existing edge
    fn update_edge_weight(&mut self, from: usize, to: usize, weight: W) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sums_report_overflow() {
        assert_eq!(200u8.checked_sum(55), Some(255));
        assert_eq!(200u8.checked_sum(56), None);
        assert_eq!(u32::MAX.checked_sum(0), Some(u32::MAX));
    }

    #[test]
    fn float_sums_overflow_to_none() {
        assert_eq!(OrderedFloat(1.5f64).checked_sum(OrderedFloat(2.0)), Some(OrderedFloat(3.5)));
        assert_eq!(OrderedFloat(f64::MAX).checked_sum(OrderedFloat(f64::MAX)), None);
    }
}
