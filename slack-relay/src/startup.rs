//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::handlers::{health_check, metrics, send_message, status};
use crate::services::{SlackWebhookProvider, WebhookProvider};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::RouterExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

/// Shared application state. Read-only once built.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub provider: Arc<dyn WebhookProvider>,
}

impl AppState {
    pub fn new(config: RelayConfig, provider: Arc<dyn WebhookProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/slack/send", post(send_message))
        .layer(CorsLayer::permissive())
        .with_request_observability()
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Slack webhook provider from `config`.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let provider = SlackWebhookProvider::new(config.slack.clone()).map_err(|e| {
            tracing::error!("Failed to initialize Slack webhook provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an arbitrary webhook provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        provider: Arc<dyn WebhookProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random free port (tests).
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
