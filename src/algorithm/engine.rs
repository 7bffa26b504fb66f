use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPaths};
use crate::data_structures::{BinaryHeapWrapper, PriorityQueue};
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Dijkstra's algorithm that keeps every tied predecessor.
///
/// The engine is stateless: each call allocates its own queue and bookkeeping,
/// so a single engine may serve concurrent calls over a shared graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestPathEngine;

impl ShortestPathEngine {
    /// Creates a new engine instance
    pub fn new() -> Self {
        ShortestPathEngine
    }

    /// Computes distances and predecessor sets from `src` using a binary heap.
    pub fn compute<W, G>(&self, graph: &G, src: usize) -> Result<ShortestPaths<W>>
    where
        W: Weight,
        G: Graph<W>,
    {
        let queue: BinaryHeapWrapper<usize, W> = BinaryHeapWrapper::with_capacity(graph.vertex_count());
        self.compute_with_queue(graph, src, queue)
    }

    /// Same as [`compute`](Self::compute) but drives the supplied queue.
    ///
    /// A vertex is re-inserted whenever its tentative distance improves or ties;
    /// stale copies are dropped when extracted, so the queue never needs a
    /// decrease-key operation. The queue is consumed.
    ///
    /// A relaxation whose sum does not fit in `W` is longer than any
    /// representable distance and is skipped. If some vertex can only be
    /// reached that way the call fails with [`Error::DistanceOverflow`].
    pub fn compute_with_queue<W, G, Q>(&self, graph: &G, src: usize, mut queue: Q) -> Result<ShortestPaths<W>>
    where
        W: Weight,
        G: Graph<W>,
        Q: PriorityQueue<usize, W>,
    {
        let n = graph.vertex_count();
        if n == 0 {
            warn!("refusing shortest path computation on an empty graph");
            return Err(Error::EmptyGraph);
        }
        if src >= n {
            warn!("source vertex {} out of range for {} vertices", src, n);
            return Err(Error::InvalidVertex(src));
        }

        debug!("computing shortest paths from {} over {} vertices", src, n);

        // `None` is infinity
        let mut dist: Vec<Option<W>> = allocate(n, None)?;
        let mut pred: Vec<Vec<usize>> = allocate(n, Vec::new())?;
        let mut finalized: Vec<bool> = allocate(n, false)?;
        // Relaxations whose sum did not fit in `W`: (from, to)
        let mut overflowed: Vec<(usize, usize)> = Vec::new();

        dist[src] = Some(W::zero());
        queue.insert(src, W::zero());

        let mut inserts = 1usize;
        let mut stale = 0usize;
        let mut settled = 0usize;

        while let Some((u, _)) = queue.extract_min() {
            if finalized[u] {
                trace!("discarding stale queue entry for {}", u);
                stale += 1;
                continue;
            }

            let dist_u = match dist[u] {
                Some(d) => d,
                None => continue,
            };

            for (w, weight) in graph.outgoing_edges(u) {
                if weight < W::zero() {
                    warn!("negative weight {:?} on edge {} -> {}", weight, u, w);
                    return Err(Error::NegativeWeight { from: u, to: w });
                }
                if w >= n {
                    return Err(Error::InvalidEdge(u, w));
                }
                // The source is settled at zero; nothing may precede it.
                if w == src {
                    continue;
                }

                // An unrepresentable sum is longer than any representable distance
                let candidate = match dist_u.checked_sum(weight) {
                    Some(candidate) => candidate,
                    None => {
                        trace!("distance overflow on edge {} -> {}", u, w);
                        overflowed.push((u, w));
                        continue;
                    }
                };
                match dist[w] {
                    Some(current) if candidate > current => continue,
                    Some(current) if candidate == current => {
                        if !pred[w].contains(&u) {
                            pred[w].push(u);
                        }
                    }
                    _ => {
                        dist[w] = Some(candidate);
                        pred[w] = vec![u];
                    }
                }

                queue.insert(w, candidate);
                inserts += 1;
            }

            finalized[u] = true;
            settled += 1;
        }

        debug!(
            "settled {} of {} vertices from {} ({} queue inserts, {} stale)",
            settled, n, src, inserts, stale
        );

        // A vertex reached only through overflowing sums has no representable distance
        if let Some(&(from, to)) = overflowed.iter().find(|&&(_, to)| dist[to].is_none()) {
            warn!("distance to {} overflows the weight type", to);
            return Err(Error::DistanceOverflow { from, to });
        }

        let dist = dist.into_iter().map(|d| d.unwrap_or_else(W::zero)).collect();

        Ok(ShortestPaths::from_parts(src, dist, pred))
    }

    /// Runs one independent computation per source in parallel.
    ///
    /// Each computation is itself sequential. Results are returned in the order
    /// of `sources`; the first error encountered is returned instead.
    pub fn compute_from_sources<W, G>(&self, graph: &G, sources: &[usize]) -> Result<Vec<ShortestPaths<W>>>
    where
        W: Weight + Send,
        G: Graph<W> + Sync,
    {
        sources
            .par_iter()
            .map(|&src| self.compute(graph, src))
            .collect()
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for ShortestPathEngine
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (tied predecessors)"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPaths<W>> {
        self.compute(graph, source)
    }
}

fn allocate<T: Clone>(n: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| Error::ResourceExhausted(n))?;
    v.resize(n, value);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;

    /// Graph whose adjacency is given verbatim, so tests can feed the engine
    /// inputs `DirectedGraph` refuses to store.
    #[derive(Debug)]
    struct RawGraph {
        adjacency: Vec<Vec<(usize, i64)>>,
    }

    impl Graph<i64> for RawGraph {
        fn vertex_count(&self) -> usize {
            self.adjacency.len()
        }

        fn edge_count(&self) -> usize {
            self.adjacency.iter().map(Vec::len).sum()
        }

        fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, i64)> + '_> {
            Box::new(self.adjacency[vertex].iter().copied())
        }

        fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, i64)> + '_> {
            Box::new(
                self.adjacency
                    .iter()
                    .enumerate()
                    .flat_map(move |(u, edges)| {
                        edges.iter().filter(move |(v, _)| *v == vertex).map(move |&(_, w)| (u, w))
                    }),
            )
        }
    }

    /// Queue that counts extractions, to check the engine drains what it is given.
    #[derive(Debug, Default)]
    struct CountingQueue {
        inner: BinaryHeapWrapper<usize, u32>,
        extracted: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl PriorityQueue<usize, u32> for CountingQueue {
        fn insert(&mut self, key: usize, priority: u32) {
            self.inner.insert(key, priority);
        }

        fn extract_min(&mut self) -> Option<(usize, u32)> {
            let entry = self.inner.extract_min();
            if entry.is_some() {
                self.extracted.set(self.extracted.get() + 1);
            }
            entry
        }

        fn is_empty(&self) -> bool {
            self.inner.is_empty()
        }

        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn negative_weight_fails_fast() {
        let graph = RawGraph {
            adjacency: vec![vec![(1, 4)], vec![(2, -1)], vec![]],
        };
        let err = ShortestPathEngine::new().compute(&graph, 0).unwrap_err();
        assert_eq!(err, Error::NegativeWeight { from: 1, to: 2 });
    }

    #[test]
    fn overflowing_detour_is_ignored_when_a_representable_path_exists() {
        let graph = DirectedGraph::<u32>::from_edges(3, vec![(0, 1, u32::MAX), (1, 2, 2), (0, 2, 5)]).unwrap();
        let paths = ShortestPathEngine::new().compute(&graph, 0).unwrap();
        assert_eq!(paths.distances(), &[0, u32::MAX, 5]);
        assert_eq!(paths.predecessors_of(2), &[0]);
    }

    #[test]
    fn overflow_before_the_real_path_is_found() {
        // 1 -> 2 overflows while 2 is still undiscovered; 3 -> 2 reaches it later
        let graph = DirectedGraph::<u8>::from_edges(4, vec![(0, 1, 10), (1, 2, 250), (0, 3, 20), (3, 2, 5)]).unwrap();
        let paths = ShortestPathEngine::new().compute(&graph, 0).unwrap();
        assert_eq!(paths.distances(), &[0, 10, 25, 20]);
        assert_eq!(paths.predecessors_of(2), &[3]);
    }

    #[test]
    fn unrepresentable_distance_is_an_error() {
        let graph = DirectedGraph::<u8>::from_edges(3, vec![(0, 1, 200), (1, 2, 100)]).unwrap();
        let err = ShortestPathEngine::new().compute(&graph, 0).unwrap_err();
        assert_eq!(err, Error::DistanceOverflow { from: 1, to: 2 });
    }

    #[test]
    fn edge_to_missing_vertex_is_rejected() {
        let graph = RawGraph {
            adjacency: vec![vec![(5, 1)]],
        };
        let err = ShortestPathEngine::new().compute(&graph, 0).unwrap_err();
        assert_eq!(err, Error::InvalidEdge(0, 5));
    }

    #[test]
    fn parallel_edges_do_not_duplicate_predecessors() {
        let graph = RawGraph {
            adjacency: vec![vec![(1, 3), (1, 3)], vec![]],
        };
        let paths = ShortestPathEngine::new().compute(&graph, 0).unwrap();
        assert_eq!(paths.predecessors_of(1), &[0]);
    }

    #[test]
    fn zero_weight_cycle_through_source_keeps_source_clean() {
        let graph = RawGraph {
            adjacency: vec![vec![(0, 0), (1, 0)], vec![(0, 0)]],
        };
        let paths = ShortestPathEngine::new().compute(&graph, 0).unwrap();
        assert!(paths.predecessors_of(0).is_empty());
        assert_eq!(paths.predecessors_of(1), &[0]);
        assert_eq!(paths.distances(), &[0, 0]);
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = DirectedGraph::<u32>::new();
        let err = ShortestPathEngine::new().compute(&graph, 0).unwrap_err();
        assert_eq!(err, Error::EmptyGraph);
    }

    #[test]
    fn custom_queue_is_drained() {
        let graph = DirectedGraph::<u32>::from_edges(3, vec![(0, 1, 1), (0, 2, 5), (1, 2, 1)]).unwrap();
        let queue = CountingQueue::default();
        let extracted = queue.extracted.clone();
        let paths = ShortestPathEngine::new().compute_with_queue(&graph, 0, queue).unwrap();
        assert_eq!(paths.distances(), &[0, 1, 2]);
        // (0,0), (1,1), (2,2), then the stale (2,5)
        assert_eq!(extracted.get(), 4);
    }

    #[test]
    fn reports_its_name() {
        let engine = ShortestPathEngine::new();
        let name = <ShortestPathEngine as ShortestPathAlgorithm<u32, DirectedGraph<u32>>>::name(&engine);
        assert_eq!(name, "Dijkstra (tied predecessors)");
    }
}
