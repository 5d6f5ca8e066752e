use chat_server::core::{AppState, Config, connect_pool};
use chat_server::{create_router, maintenance};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Inizializza la configurazione
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    config.log_info();

    // Pool creato una sola volta e condiviso da tutti i repository
    let pool = connect_pool(&config).await?;
    let state = Arc::new(AppState::new(pool, config.is_production()));

    tokio::spawn(maintenance::start_session_cleanup(
        state.clone(),
        config.session_cleanup_interval_secs,
    ));

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
