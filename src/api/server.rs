use crate::api::routes;
use crate::config::ServerConfig;
use crate::errors::Error;
use crate::store::open_store;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Opens the configured store and serves the API until Ctrl-C
///
/// # Errors
///
/// Returns `Error::Storage` if the store cannot be opened and
/// `Error::Server` if the listener cannot be bound or fails while serving
pub async fn launch_server(config: &ServerConfig) -> Result<(), Error> {
    let store = open_store(&config.store)?;
    let app = routes::app(store);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", addr, e)))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
