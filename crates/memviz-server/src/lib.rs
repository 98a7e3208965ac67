//! HTTP server for the memory graph API

pub mod router;
pub mod handlers;
pub mod error;

use std::sync::Arc;

use memviz_core::ResolutionService;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use router::{create_router, cors_layer};

/// Shared state handed to every handler.
pub struct ServerState {
    pub service: ResolutionService,
}

impl ServerState {
    pub fn new(service: ResolutionService) -> Self {
        ServerState { service }
    }
}

/// Bind address and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct MemvizServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl MemvizServer {
    pub fn new(service: ResolutionService, config: ServerConfig) -> Self {
        MemvizServer {
            state: Arc::new(ServerState::new(service)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind to the configured address and serve until Ctrl-C.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let router = create_router(self.state, &self.config.cors_origins)?;
        info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
