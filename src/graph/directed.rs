use crate::graph::traits::{Graph, MutableGraph, Weight};
use crate::{Error, Result};

/// A directed graph stored as dense adjacency lists indexed by vertex ID
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Weight,
{
    /// Outgoing edges for each vertex: [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, W)>>,

    /// Incoming edges for each vertex: [(source_vertex, weight)]
    incoming_edges: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Weight,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing_edges: Vec::new(),
            incoming_edges: Vec::new(),
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            outgoing_edges: vec![Vec::new(); vertices],
            incoming_edges: vec![Vec::new(); vertices],
        }
    }

    /// Like [`with_capacity`](Self::with_capacity) but reports allocation
    /// failure as [`Error::ResourceExhausted`] instead of aborting.
    pub fn try_with_capacity(vertices: usize) -> Result<Self> {
        let mut outgoing_edges = Vec::new();
        let mut incoming_edges = Vec::new();
        outgoing_edges
            .try_reserve_exact(vertices)
            .and_then(|_| incoming_edges.try_reserve_exact(vertices))
            .map_err(|_| Error::ResourceExhausted(vertices))?;
        outgoing_edges.resize_with(vertices, Vec::new);
        incoming_edges.resize_with(vertices, Vec::new);
        Ok(DirectedGraph {
            outgoing_edges,
            incoming_edges,
        })
    }

    /// Builds a graph with `vertices` vertices from an edge list.
    ///
    /// Fails with [`Error::InvalidEdge`] if an endpoint is out of range and with
    /// [`Error::NegativeWeight`] if a weight is below zero. A repeated
    /// `(from, to)` pair overwrites the earlier weight. A vertex count that
    /// cannot be allocated yields [`Error::ResourceExhausted`].
    pub fn from_edges<I>(vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::try_with_capacity(vertices)?;
        for (from, to, weight) in edges {
            if !graph.has_vertex(from) || !graph.has_vertex(to) {
                return Err(Error::InvalidEdge(from, to));
            }
            if weight < W::zero() {
                return Err(Error::NegativeWeight { from, to });
            }
            graph.add_edge(from, to, weight);
        }
        Ok(graph)
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.outgoing_edges
            .iter()
            .flatten()
            .all(|(_, weight)| *weight >= W::zero())
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing_edges.iter().map(|edges| edges.len()).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.incoming_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Weight,
{
    fn add_vertex(&mut self) -> usize {
        let new_id = self.outgoing_edges.len();
        self.outgoing_edges.push(Vec::new());
        self.incoming_edges.push(Vec::new());
        new_id
    }

    fn remove_vertex(&mut self, vertex: usize) -> bool {
        if !self.has_vertex(vertex) {
            return false;
        }

        for (target, _) in std::mem::take(&mut self.outgoing_edges[vertex]) {
            self.incoming_edges[target].retain(|(source, _)| *source != vertex);
        }

        for (source, _) in std::mem::take(&mut self.incoming_edges[vertex]) {
            self.outgoing_edges[source].retain(|(target, _)| *target != vertex);
        }

        // Note: the ID is kept so that other vertices are not re-indexed
        true
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || weight < W::zero() {
            return false;
        }

        if let Some(edge) = self.outgoing_edges[from].iter_mut().find(|(t, _)| *t == to) {
            edge.1 = weight;
            if let Some(edge) = self.incoming_edges[to].iter_mut().find(|(s, _)| *s == from) {
                edge.1 = weight;
            }
            return true;
        }

        self.outgoing_edges[from].push((to, weight));
        self.incoming_edges[to].push((from, weight));
        true
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) {
            return false;
        }

        let outgoing = &mut self.outgoing_edges[from];
        let len_before = outgoing.len();
        outgoing.retain(|(target, _)| *target != to);
        let removed = len_before > outgoing.len();

        self.incoming_edges[to].retain(|(source, _)| *source != from);

        removed
    }

    fn update_edge_weight(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_edge(from, to) || weight < W::zero() {
            return false;
        }
        self.add_edge(from, to, weight)
    }
}
