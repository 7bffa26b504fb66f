use axum::{
    http::{header, Method},
    Router,
};
use log::info;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::web::api::{
    create_router, AppState, DEFAULT_MAX_EDGES, DEFAULT_MAX_SESSIONS, DEFAULT_MAX_VERTICES,
};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub enable_cors: bool,
    /// Oldest sessions are evicted beyond this count
    pub max_sessions: usize,
    /// Larger graphs are rejected with `graph_too_large`
    pub max_vertices: usize,
    pub max_edges: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3005,
            static_dir: "web".to_string(),
            enable_cors: true,
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_vertices: DEFAULT_MAX_VERTICES,
            max_edges: DEFAULT_MAX_EDGES,
        }
    }
}

/// Build the application router for the given configuration
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::with_limits(config.max_sessions, config.max_vertices, config.max_edges);

    let mut app = Router::new()
        // API routes
        .merge(create_router())
        // Everything else is served from the static directory
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(app_state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        app = app.layer(ServiceBuilder::new().layer(cors).into_inner());
    }

    app
}

/// Start the web server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("shortest path server listening on http://{}", addr);
    info!("serving static files from {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
