use crate::algorithm::ShortestPathEngine;
use crate::graph::directed::DirectedGraph;
use crate::graph::{Graph, MutableGraph};
use crate::Error;
use ordered_float::OrderedFloat;
use pyo3::exceptions::{PyOverflowError, PyValueError};
use pyo3::prelude::*;

#[pyclass]
pub struct PyGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[pymethods]
impl PyGraph {
    #[new]
    #[pyo3(signature = (vertices = 0))]
    fn new(vertices: usize) -> PyResult<Self> {
        let graph = DirectedGraph::try_with_capacity(vertices).map_err(to_py_err)?;
        Ok(PyGraph { graph })
    }

    fn add_vertex(&mut self) -> usize {
        self.graph.add_vertex()
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> bool {
        weight.is_finite() && self.graph.add_edge(from, to, OrderedFloat(weight))
    }

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }
}

#[pyclass]
pub struct PyShortestPathEngine {
    inner: ShortestPathEngine,
}

#[pymethods]
impl PyShortestPathEngine {
    #[new]
    fn new() -> Self {
        PyShortestPathEngine {
            inner: ShortestPathEngine::new(),
        }
    }

    /// Returns `(distances, predecessors)`; unreachable vertices have distance 0
    /// and no predecessors.
    fn compute(&self, graph: &PyGraph, source: usize) -> PyResult<(Vec<f64>, Vec<Vec<usize>>)> {
        let result = self.inner.compute(&graph.graph, source).map_err(to_py_err)?;
        let distances = result.distances().iter().map(|d| d.into_inner()).collect();
        Ok((distances, result.predecessors().to_vec()))
    }

    /// Human-readable rendering of the result
    fn show(&self, graph: &PyGraph, source: usize) -> PyResult<String> {
        let result = self.inner.compute(&graph.graph, source).map_err(to_py_err)?;
        Ok(result.to_string())
    }
}

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::DistanceOverflow { .. } => PyOverflowError::new_err(err.to_string()),
        Error::InvalidVertex(_)
        | Error::InvalidEdge(..)
        | Error::NegativeWeight { .. }
        | Error::EmptyGraph
        | Error::ResourceExhausted(_) => PyValueError::new_err(err.to_string()),
    }
}

#[pymodule]
fn multipath_sssp_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    m.add_class::<PyShortestPathEngine>()?;
    Ok(())
}
