//! Code tutor chat proxy.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::{http, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up NVIDIA_API_KEY and friends from a local .env during development
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::load()?;
    let addr: SocketAddr = config.bind_addr.parse()?;

    if config.upstream.has_credential() {
        info!(upstream = %config.upstream.chat_url(), timeout_ms = config.upstream.timeout.as_millis() as u64, "Upstream configured");
    } else {
        warn!("NVIDIA_API_KEY is not set - /api/chat will answer 500 until it is configured");
    }

    let state = AppState::new(config.upstream, config.max_body_bytes)?;
    let router = http::create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
