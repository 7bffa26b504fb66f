use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::graph::Weight;

/// Output of a single-source shortest path computation.
///
/// `dist` and `pred` are sized to the vertex count of the graph at computation
/// time. A vertex the source cannot reach has distance zero and no
/// predecessors; only [`is_reachable`](Self::is_reachable) tells it apart from
/// the source itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<W> {
    num_nodes: usize,
    src: usize,
    dist: Vec<W>,
    pred: Vec<Vec<usize>>,
}

/// Per-vertex view of a [`ShortestPaths`] result, used for structured export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexReport<W> {
    pub distance: W,
    pub predecessors: Vec<usize>,
    pub reachable: bool,
}

impl<W> ShortestPaths<W>
where
    W: Weight,
{
    pub(crate) fn from_parts(src: usize, dist: Vec<W>, pred: Vec<Vec<usize>>) -> Self {
        debug_assert_eq!(dist.len(), pred.len());
        ShortestPaths {
            num_nodes: dist.len(),
            src,
            dist,
            pred,
        }
    }

    /// Number of vertices the graph had when the result was computed
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The source vertex
    pub fn source(&self) -> usize {
        self.src
    }

    /// Raw distances, with zero standing in for "unreachable"
    pub fn distances(&self) -> &[W] {
        &self.dist
    }

    /// Predecessor sets for every vertex
    pub fn predecessors(&self) -> &[Vec<usize>] {
        &self.pred
    }

    /// Raw distance of `vertex`, zero when unreachable
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.dist.get(vertex).copied()
    }

    /// Distance of `vertex`, or `None` if the source cannot reach it
    pub fn distance_to(&self, vertex: usize) -> Option<W> {
        if self.is_reachable(vertex) {
            self.distance(vertex)
        } else {
            None
        }
    }

    /// Immediate predecessors of `vertex` on its shortest paths. Order is unspecified.
    pub fn predecessors_of(&self, vertex: usize) -> &[usize] {
        self.pred.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True for the source and every vertex with at least one predecessor
    pub fn is_reachable(&self, vertex: usize) -> bool {
        vertex < self.num_nodes && (vertex == self.src || !self.pred[vertex].is_empty())
    }

    pub fn reachable_count(&self) -> usize {
        (0..self.num_nodes).filter(|&v| self.is_reachable(v)).count()
    }

    /// Compares two results treating predecessor sets as unordered
    pub fn equivalent_to(&self, other: &Self) -> bool {
        self.num_nodes == other.num_nodes
            && self.src == other.src
            && self.dist == other.dist
            && self.pred.iter().zip(&other.pred).all(|(a, b)| {
                let mut a = a.clone();
                let mut b = b.clone();
                a.sort_unstable();
                b.sort_unstable();
                a == b
            })
    }

    /// Structured export: vertex -> {distance, predecessors, reachable}
    pub fn report(&self) -> BTreeMap<usize, VertexReport<W>> {
        (0..self.num_nodes)
            .map(|v| {
                (
                    v,
                    VertexReport {
                        distance: self.dist[v],
                        predecessors: self.pred[v].clone(),
                        reachable: self.is_reachable(v),
                    },
                )
            })
            .collect()
    }
}

impl<W> fmt::Display for ShortestPaths<W>
where
    W: Weight + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/*")?;
        writeln!(f, "Num nodes: {}", self.num_nodes)?;
        writeln!(f)?;
        writeln!(f, "Source vertex: {}", self.src)?;
        writeln!(f)?;
        for v in 0..self.num_nodes {
            writeln!(f, "Distance to vertex {} is {}", v, self.dist[v])?;
            write!(f, "        Preds are: ")?;
            for p in &self.pred[v] {
                write!(f, "[{}] -> ", p)?;
            }
            writeln!(f, "X")?;
        }
        writeln!(f, "*/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShortestPaths<u32> {
        ShortestPaths::from_parts(0, vec![0, 5, 0], vec![vec![], vec![0], vec![]])
    }

    #[test]
    fn reachability_does_not_depend_on_raw_distance() {
        let paths = sample();
        assert!(paths.is_reachable(0));
        assert!(paths.is_reachable(1));
        assert!(!paths.is_reachable(2));
        assert!(!paths.is_reachable(3));
        assert_eq!(paths.distance(2), Some(0));
        assert_eq!(paths.distance_to(2), None);
        assert_eq!(paths.distance_to(0), Some(0));
        assert_eq!(paths.reachable_count(), 2);
        assert!(paths.predecessors_of(7).is_empty());
    }

    #[test]
    fn display_matches_diagnostic_layout() {
        let rendered = sample().to_string();
        let expected = "/*\nNum nodes: 3\n\nSource vertex: 0\n\n\
            Distance to vertex 0 is 0\n        Preds are: X\n\
            Distance to vertex 1 is 5\n        Preds are: [0] -> X\n\
            Distance to vertex 2 is 0\n        Preds are: X\n*/\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn report_serializes_as_vertex_map() {
        let json = serde_json::to_value(sample().report()).unwrap();
        assert_eq!(json["1"]["distance"], 5);
        assert_eq!(json["1"]["predecessors"], serde_json::json!([0]));
        assert_eq!(json["2"]["reachable"], false);
    }

    #[test]
    fn equivalence_ignores_predecessor_order() {
        let a = ShortestPaths::<u32>::from_parts(0, vec![0, 1, 1], vec![vec![], vec![0], vec![0, 1]]);
        let b = ShortestPaths::<u32>::from_parts(0, vec![0, 1, 1], vec![vec![], vec![0], vec![1, 0]]);
        assert_ne!(a, b);
        assert!(a.equivalent_to(&b));
    }
}
