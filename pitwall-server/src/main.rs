//! PitWall Server
//!
//! Drives the telemetry simulation at a fixed cadence and serves snapshots
//! to the dashboard over a REST and SSE API

use anyhow::Result;
use pitwall_server::{api, config::ServerConfig, manager, state};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env file; real environment variables win
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting PitWall Server");

    let config = ServerConfig::from_env()?;

    // Create application state
    let state = state::AppState::new();

    // Build the router
    let app = api::create_router(state.clone());

    // Start the session manager in background
    let manager = tokio::spawn(manager::run(
        state.clone(),
        config.sim.clone(),
        config.tick_interval,
    ));

    // Start server
    let addr = config.addr();
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.shutdown.clone()))
        .await?;

    state.shutdown.cancel();
    manager.await?;

    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            info!("Shutdown requested");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }
}
