use crate::graph::{DirectedGraph, MutableGraph};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random directed graph with roughly `edge_factor * n` edges.
/// Weights are drawn from `1.0..100.0`; the same seed always yields the same graph.
pub fn generate_random(n: usize, edge_factor: f64, seed: u64) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(n);
    if n < 2 {
        return graph;
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        // Avoid self-loops
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..100.0));
            graph.add_edge(u, v, weight);
        }
    }

    graph
}

/// Generates a `width * height` grid with unit weights and 4-connectivity.
///
/// Every interior vertex is reachable along many equally short staircase paths,
/// so predecessor sets of size two are the norm.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(width * height);

    let index = |x: usize, y: usize| -> usize { y * width + x };

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x > 0 {
                graph.add_edge(current, index(x - 1, y), OrderedFloat(1.0));
            }
            if x + 1 < width {
                graph.add_edge(current, index(x + 1, y), OrderedFloat(1.0));
            }
            if y > 0 {
                graph.add_edge(current, index(x, y - 1), OrderedFloat(1.0));
            }
            if y + 1 < height {
                graph.add_edge(current, index(x, y + 1), OrderedFloat(1.0));
            }
        }
    }

    graph
}

/// Generates a layered graph: vertex 0 feeds the first layer, and every vertex
/// of a layer links to every vertex of the next one with unit weight.
///
/// A vertex in layer `k > 0` ends up with all `width` vertices of layer `k - 1`
/// as tied predecessors.
pub fn generate_layered(layers: usize, width: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::new();
    let root = graph.add_vertex();

    let mut previous = vec![root];
    for _ in 0..layers {
        let current: Vec<usize> = (0..width).map(|_| graph.add_vertex()).collect();
        for &u in &previous {
            for &v in &current {
                graph.add_edge(u, v, OrderedFloat(1.0));
            }
        }
        previous = current;
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn random_graph_is_deterministic_per_seed() {
        let a = generate_random(200, 3.0, 7);
        let b = generate_random(200, 3.0, 7);
        assert_eq!(a.edge_count(), b.edge_count());
        for u in 0..a.vertex_count() {
            let ea: Vec<_> = a.outgoing_edges(u).collect();
            let eb: Vec<_> = b.outgoing_edges(u).collect();
            assert_eq!(ea, eb);
        }
    }

    #[test]
    fn grid_has_four_connectivity() {
        let graph = generate_grid(3, 2);
        assert_eq!(graph.vertex_count(), 6);
        // 2 * (horizontal pairs + vertical pairs)
        assert_eq!(graph.edge_count(), 2 * (2 * 2 + 3));
    }

    #[test]
    fn layered_graph_shape() {
        let graph = generate_layered(3, 4);
        assert_eq!(graph.vertex_count(), 1 + 3 * 4);
        assert_eq!(graph.edge_count(), 4 + 2 * 16);
    }
}
