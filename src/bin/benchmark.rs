use std::time::{Duration, Instant};

use multipath_sssp::algorithm::{ShortestPathAlgorithm, ShortestPathEngine};
use multipath_sssp::graph::generators::{generate_grid, generate_random};
use multipath_sssp::graph::{DirectedGraph, Graph};
use ordered_float::OrderedFloat;

type BenchGraph = DirectedGraph<OrderedFloat<f64>>;

// Function to benchmark an algorithm on a graph
fn benchmark_algorithm<A>(algorithm: &A, graph: &BenchGraph, source: usize) -> Result<Duration, multipath_sssp::Error>
where
    A: ShortestPathAlgorithm<OrderedFloat<f64>, BenchGraph>,
{
    println!("Running {} on graph with {} vertices...", algorithm.name(), graph.vertex_count());

    let start = Instant::now();
    let result = algorithm.compute_shortest_paths(graph, source)?;
    let duration = start.elapsed();

    let tied = result.predecessors().iter().filter(|p| p.len() > 1).count();
    println!(
        "  - Found {} reachable vertices ({} with tied predecessors) in {:?}",
        result.reachable_count(),
        tied,
        duration
    );

    Ok(duration)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let graph_sizes = [1_000, 10_000, 50_000, 100_000, 200_000];
    let edge_factor = 2.0;
    let batch_sources = 16;

    println!("=====================================================");
    println!("Benchmark: tied-predecessor Dijkstra");
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let engine = ShortestPathEngine::new();
    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let graph = generate_random(size, edge_factor, size as u64);
        println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

        let single = benchmark_algorithm(&engine, &graph, 0)?;

        let sources: Vec<usize> = (0..batch_sources).map(|i| i * size / batch_sources).collect();
        let start = Instant::now();
        engine.compute_from_sources(&graph, &sources)?;
        let batch = start.elapsed();
        println!("  - {} sources in parallel in {:?}", sources.len(), batch);

        results.push((size, single, batch));
    }

    let side = 300;
    println!("\nGrid {}x{} (heavy ties)", side, side);
    let grid = generate_grid(side, side);
    benchmark_algorithm(&engine, &grid, 0)?;

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15}", "Vertices", "Single (ms)", "Batch x16 (ms)");
    println!("-----------------------------------------------------");
    for (size, single, batch) in &results {
        println!("{:<10} | {:<15} | {:<15}", size, single.as_millis(), batch.as_millis());
    }

    Ok(())
}
