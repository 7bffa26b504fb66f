use log::{info, warn};
use multipath_sssp::web::server::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::default();

    // Parse command line arguments
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(_) => warn!("ignoring invalid port {:?}, using {}", arg, config.port),
        }
    }
    if let Ok(dir) = env::var("MULTIPATH_SSSP_STATIC_DIR") {
        config.static_dir = dir;
    }

    info!("port: {}", config.port);
    info!("static files: {}", config.static_dir);
    info!("CORS enabled: {}", config.enable_cors);
    info!("max sessions: {}", config.max_sessions);

    start_server(config).await?;

    Ok(())
}
