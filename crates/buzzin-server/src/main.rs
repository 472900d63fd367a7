//! # buzzin-server
//!
//! HTTP API server for Buzzin saved links.
//!
//! Configuration comes from the environment once at startup (see
//! [`ServerConfig`]). If the link store cannot be opened the process exits
//! with an error before binding any port.

use tracing::info;
use tracing_subscriber::EnvFilter;

use buzzin_server::{serve, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,buzzin_server=debug,buzzin_store=info")),
        )
        .init();

    info!("Starting Buzzin API server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the store; a store we cannot reach is fatal
    // -----------------------------------------------------------------------
    let db = config.open_store().map_err(|e| {
        tracing::error!(error = %e, path = ?config.database_path, "Store connection failed");
        e
    })?;
    info!(links = db.count_links()?, "Store connected");

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server until Ctrl+C
    // -----------------------------------------------------------------------
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;

    serve(AppState::new(db), listener, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                // Without a signal handler, run until killed.
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await
            }
        }
    })
    .await
}
