use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::ShortestPathEngine;
use crate::graph::generators::{generate_grid, generate_layered, generate_random};
use crate::graph::DirectedGraph;
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_MAX_VERTICES: usize = 1_000_000;
pub const DEFAULT_MAX_EDGES: usize = 10_000_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub engine: ShortestPathEngine,
    /// Once reached, the oldest session is evicted to make room
    pub max_sessions: usize,
    pub max_vertices: usize,
    pub max_edges: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }

    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self::with_limits(max_sessions, DEFAULT_MAX_VERTICES, DEFAULT_MAX_EDGES)
    }

    pub fn with_limits(max_sessions: usize, max_vertices: usize, max_edges: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            engine: ShortestPathEngine::new(),
            max_sessions,
            max_vertices,
            max_edges,
        }
    }

    /// `None` stands for a size that does not even fit in `usize`.
    fn check_graph_size(&self, vertices: Option<usize>, edges: Option<usize>) -> Result<(), ApiError> {
        match (vertices, edges) {
            (Some(v), Some(e)) if v <= self.max_vertices && e <= self.max_edges => Ok(()),
            _ => {
                warn!("rejected graph of {:?} vertices and {:?} edges", vertices, edges);
                Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "graph_too_large",
                    format!(
                        "Graphs are limited to {} vertices and {} edges",
                        self.max_vertices, self.max_edges
                    ),
                ))
            }
        }
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_store_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }

    fn insert_session(&self, session: Session) -> Result<(), ApiError> {
        if self.max_sessions == 0 {
            return Err(api_error(
                StatusCode::TOO_MANY_REQUESTS,
                "session_limit_reached",
                "Sessions are disabled".to_string(),
            ));
        }

        let mut sessions = self.lock_sessions()?;
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(id) => {
                    info!("session limit of {} reached, evicting {}", self.max_sessions, id);
                    sessions.remove(&id);
                }
                None => break,
            }
        }
        sessions.insert(session.id, session);
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/shortest-paths/:session_id", post(compute_shortest_paths))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/api/health", get(health_check))
}

/// Create a session from an explicit edge list
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<CreateGraphRequest>,
) -> ApiResult<Session> {
    state.check_graph_size(Some(request.vertex_count), Some(request.edges.len()))?;

    if let Some(edge) = request.edges.iter().find(|e| !e.weight.is_finite()) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_weight",
            format!("Edge {} -> {} has a non-finite weight", edge.source, edge.target),
        ));
    }

    let edges = request
        .edges
        .iter()
        .map(|e| (e.source, e.target, OrderedFloat(e.weight)));
    let graph = DirectedGraph::from_edges(request.vertex_count, edges).map_err(engine_error)?;

    let session = Session::new(graph);
    info!(
        "created session {} with {} vertices and {} edges",
        session.id,
        session.graph.vertex_count,
        session.graph.links.len()
    );
    state.insert_session(session.clone())?;
    Ok(Json(session))
}

/// Generate a new graph
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> ApiResult<Session> {
    let graph = match request.graph_type.as_str() {
        "random" => {
            let n = request.node_count;
            let edges = request.edge_factor * n as f64;
            let edges = (edges.is_finite() && edges < usize::MAX as f64).then(|| edges.max(0.0) as usize);
            state.check_graph_size(Some(n), edges)?;
            let seed = request.seed.unwrap_or_else(rand::random);
            generate_random(n, request.edge_factor, seed)
        }
        "grid" => {
            let side = (request.node_count as f64).sqrt().ceil() as usize;
            let width = request.width.unwrap_or(side);
            let height = request.height.unwrap_or(side);
            let vertices = width.checked_mul(height);
            state.check_graph_size(vertices, vertices.and_then(|v| v.checked_mul(4)))?;
            generate_grid(width, height)
        }
        "layered" => {
            let width = request.width.unwrap_or(4);
            let layers = request.layers.unwrap_or_else(|| request.node_count / width.max(1));
            let vertices = layers.checked_mul(width).and_then(|v| v.checked_add(1));
            let edges = width
                .checked_mul(width)
                .and_then(|e| e.checked_mul(layers))
                .and_then(|e| e.checked_add(width));
            state.check_graph_size(vertices, edges)?;
            generate_layered(layers, width)
        }
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_type",
                format!("Unknown graph type: {}", request.graph_type),
            ));
        }
    };

    let session = Session::new(graph);
    info!(
        "generated {} graph for session {} ({} vertices)",
        request.graph_type, session.id, session.graph.vertex_count
    );
    state.insert_session(session.clone())?;
    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<WebGraph> {
    let sessions = state.lock_sessions()?;
    let graph = sessions.get(&session_id).map(|session| session.graph.clone());
    graph.map(Json).ok_or_else(session_not_found)
}

/// Compute shortest paths on a session's graph
pub async fn compute_shortest_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ShortestPathRequest>,
) -> ApiResult<ShortestPathResponse> {
    let graph = {
        let sessions = state.lock_sessions()?;
        match sessions.get(&session_id) {
            Some(session) => Arc::clone(&session.shared_graph),
            None => return Err(session_not_found()),
        }
    };

    let engine = state.engine;
    let source = request.source;
    let start_time = Instant::now();
    let result = tokio::task::spawn_blocking(move || engine.compute(&*graph, source))
        .await
        .map_err(|err| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "computation_failed",
                format!("Computation task failed: {}", err),
            )
        })?
        .map_err(engine_error)?;
    let execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "session {}: {} of {} vertices reachable from {} in {:.3} ms",
        session_id,
        result.reachable_count(),
        result.num_nodes(),
        source,
        execution_time_ms
    );

    let response = ShortestPathResponse {
        execution_id: Uuid::new_v4(),
        source,
        num_nodes: result.num_nodes(),
        reachable: result.reachable_count(),
        execution_time_ms,
        vertices: result.report(),
        text: request.include_text.then(|| result.to_string()),
    };

    let mut sessions = state.lock_sessions()?;
    if let Some(session) = sessions.get_mut(&session_id) {
        session.last_result = Some(response.clone());
    }

    Ok(Json(response))
}

/// List all session IDs
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Vec<Uuid>> {
    let sessions = state.lock_sessions()?;
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Session> {
    let sessions = state.lock_sessions()?;
    let session = sessions.get(&session_id).cloned();
    session.map(Json).ok_or_else(session_not_found)
}

/// Delete a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.lock_sessions()?;
    match sessions.remove(&session_id) {
        Some(_) => {
            info!("deleted session {}", session_id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found()),
    }
}

/// Health check endpoint
pub async fn health_check() -> ApiResult<serde_json::Value> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found".to_string())
}

fn engine_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::InvalidVertex(_) => (StatusCode::BAD_REQUEST, "invalid_vertex"),
        Error::InvalidEdge(..) => (StatusCode::BAD_REQUEST, "invalid_edge"),
        Error::NegativeWeight { .. } => (StatusCode::BAD_REQUEST, "negative_weight"),
        Error::DistanceOverflow { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "distance_overflow"),
        Error::EmptyGraph => (StatusCode::BAD_REQUEST, "empty_graph"),
        Error::ResourceExhausted(_) => (StatusCode::INTERNAL_SERVER_ERROR, "resource_exhausted"),
    };
    api_error(status, code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_client_errors() {
        let (status, body) = engine_error(Error::InvalidVertex(9));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "invalid_vertex");

        let (status, _) = engine_error(Error::ResourceExhausted(1 << 40));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, body) = engine_error(Error::DistanceOverflow { from: 1, to: 2 });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.0.error, "distance_overflow");
    }

    #[test]
    fn session_limit_evicts_oldest() {
        let state = AppState::with_max_sessions(2);
        let graph = DirectedGraph::with_capacity(1);

        let mut oldest = Session::new(graph.clone());
        oldest.created_at = chrono::Utc::now() - chrono::Duration::seconds(60);
        let oldest_id = oldest.id;
        let middle = Session::new(graph.clone());
        let middle_id = middle.id;
        let newest = Session::new(graph.clone());
        let newest_id = newest.id;

        state.insert_session(middle).unwrap();
        state.insert_session(oldest).unwrap();
        state.insert_session(newest).unwrap();

        let sessions = state.sessions.lock().unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(!sessions.contains_key(&oldest_id));
        assert!(sessions.contains_key(&middle_id));
        assert!(sessions.contains_key(&newest_id));
        drop(sessions);

        // Keeps accepting sessions at the cap
        for _ in 0..5 {
            state.insert_session(Session::new(graph.clone())).unwrap();
        }
        assert_eq!(state.sessions.lock().unwrap().len(), 2);
    }

    #[test]
    fn zero_session_limit_rejects() {
        let state = AppState::with_max_sessions(0);
        let (status, _) = state
            .insert_session(Session::new(DirectedGraph::with_capacity(1)))
            .unwrap_err();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn graph_size_limits() {
        let state = AppState::with_limits(10, 100, 1000);
        assert!(state.check_graph_size(Some(100), Some(1000)).is_ok());
        let (status, body) = state.check_graph_size(Some(101), Some(0)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "graph_too_large");
        assert!(state.check_graph_size(Some(1), Some(1001)).is_err());
        assert!(state.check_graph_size(None, Some(0)).is_err());
    }
}
