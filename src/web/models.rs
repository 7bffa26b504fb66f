use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::algorithm::VertexReport;
use crate::graph::DirectedGraph;

/// Weight type used by every graph served over HTTP
pub type WebWeight = OrderedFloat<f64>;

/// Represents an edge in the graph for the web API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for the web API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub vertex_count: usize,
    pub links: Vec<WebEdge>,
}

/// Body of `POST /api/graphs`
#[derive(Debug, Deserialize)]
pub struct CreateGraphRequest {
    pub vertex_count: usize,
    #[serde(default)]
    pub edges: Vec<WebEdge>,
}

/// Parameters for graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub graph_type: String,
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    #[serde(default = "default_edge_factor")]
    pub edge_factor: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub layers: Option<usize>,
}

fn default_node_count() -> usize { 100 }
fn default_edge_factor() -> f64 { 3.0 }

/// Parameters for a shortest path computation
#[derive(Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub source: usize,
    /// Also return the plain-text diagnostic rendering
    #[serde(default)]
    pub include_text: bool,
}

/// Response containing shortest path results
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub source: usize,
    pub num_nodes: usize,
    pub reachable: usize,
    pub execution_time_ms: f64,
    pub vertices: BTreeMap<usize, VertexReport<WebWeight>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session holding one immutable graph and the latest result computed on it
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    /// Shared with in-flight computations, which never take the session lock
    #[serde(skip)]
    pub shared_graph: Arc<DirectedGraph<WebWeight>>,
    pub last_result: Option<ShortestPathResponse>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: DirectedGraph<WebWeight>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph: WebGraph::from(&graph),
            shared_graph: Arc::new(graph),
            last_result: None,
            created_at: Utc::now(),
        }
    }
}

impl From<&DirectedGraph<WebWeight>> for WebGraph {
    fn from(graph: &DirectedGraph<WebWeight>) -> Self {
        use crate::graph::Graph;

        let mut links = Vec::with_capacity(graph.edge_count());
        for u in 0..graph.vertex_count() {
            for (v, weight) in graph.outgoing_edges(u) {
                links.push(WebEdge {
                    source: u,
                    target: v,
                    weight: weight.into_inner(),
                });
            }
        }

        WebGraph {
            vertex_count: graph.vertex_count(),
            links,
        }
    }
}
