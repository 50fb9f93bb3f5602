use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::store::{GameStore, MemoryGameStore};

use super::routes;

const LOG_TARGET: &str = "secret_societies::server::bootstrap";

pub struct ServerConfig {
    pub bind: SocketAddr,
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let store: Arc<dyn GameStore> = Arc::new(MemoryGameStore::new());
    let router = routes::router(store);
    let make_service = router.into_make_service();

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr()?;
    info!(target = LOG_TARGET, %local_addr, "secret societies server listening");

    axum::serve(listener, make_service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target = LOG_TARGET,
            error = %err,
            "failed to install ctrl-c handler"
        );
    }
    info!(target = LOG_TARGET, "shutdown signal received");
}
