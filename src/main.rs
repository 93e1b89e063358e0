//! Chat relay server binary.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use chat_relay::adapters::{build_app, OnlySqConfig, OnlySqProvider, RelayAppState};
use chat_relay::application::handlers::RelayMessageHandler;
use chat_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let provider = OnlySqProvider::new(OnlySqConfig::from(&config.upstream))?;
    let handler = RelayMessageHandler::new(Arc::new(provider));
    let app = build_app(RelayAppState::new(Arc::new(handler)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        upstream = %config.upstream.base_url,
        model = %config.upstream.model,
        "Chat relay listening"
    );

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    if let Err(err) = server.await {
        error!(error = %err, "Server exited with error");
        return Err(err.into());
    }

    info!("Chat relay stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.trim()));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
