//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use anyhow::Context;

use crate::api::build_app;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with an initialized state
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        if self.config.is_production() && !self.config.session.cookie_secure {
            tracing::warn!("⚠️  SESSION_COOKIE_SECURE=false in production, admin cookie sent over plain HTTP");
        }

        let app = build_app(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("🍽️  Restaurant server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
