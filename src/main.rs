use anyhow::Result;
use swift_mock_server::{AppConfig, SwiftServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = AppConfig::from_env_and_args()?;
    tracing::info!("Starting swift-mock-server with config: {:?}", cfg);

    // --- Start server ---
    let server = SwiftServer::start(cfg).await?;
    tracing::info!("Auth URL {}", server.auth_url);
    tracing::info!("Storage URL {}", server.url);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    server.close().await?;

    Ok(())
}
