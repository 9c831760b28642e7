//! Insight Hub HTTP Server Binary
//!
//! This is the main entry point for the Insight Hub REST API server.
//! It loads the configuration, creates the record source, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve the JSON exports under ./data
//! INSIGHT_HUB_SOURCE=json INSIGHT_HUB_DATA_DIR=./data \
//!   cargo run --bin insight-hub-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `INSIGHT_HUB_SOURCE`: `local` or `json` (default: from insight-hub.toml)
//! - `INSIGHT_HUB_DATA_DIR`: Directory holding the JSON exports
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use insight_hub::config::HubConfig;
use insight_hub::http::{create_router, AppState};
use insight_hub::services::AnalyticsContext;
use insight_hub::source::SourceFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Insight Hub HTTP Server");

    let config = HubConfig::load()?;
    info!(
        "Using {} source (data dir: {})",
        config.source.source_type,
        config.source.data_dir.display()
    );

    let source = SourceFactory::from_config(&config)?;
    let state = AppState::new(source, AnalyticsContext::from_config(&config));

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
