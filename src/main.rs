//! Solana Token Creator API - Main executable
//!
//! HTTP backend that takes a signed fee payment from a browser wallet and
//! mints a new SPL token with Metaplex metadata for the payer.
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use solana_token_creator::config::AppConfig;
use solana_token_creator::{create_router, load_keypair, ServerIdentity, ServiceContainer};
use std::sync::Arc;

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Solana Token Creator API v{}",
        solana_token_creator::VERSION
    );

    let config = AppConfig::from_env()?;

    let keypair =
        load_keypair(&config.server_keypair).context("Failed to load SERVER_KEYPAIR")?;
    let identity = Arc::new(ServerIdentity::new(keypair));

    info!("Connecting to Solana network at {}", config.solana_rpc_url);
    let port = config.port;
    let services = Arc::new(
        ServiceContainer::new(config, identity.clone())
            .context("Failed to initialize services")?,
    );
    let app = create_router(services)?;

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, releasing server identity {}", identity.pubkey());
    drop(identity);

    Ok(())
}
