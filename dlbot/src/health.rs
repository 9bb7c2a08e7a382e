//! HTTP health endpoints: `GET /health` and `GET /api`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use proxy_pool::ProxyProvider;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone, Default)]
pub struct HealthState {
    pub proxies: Option<Arc<ProxyProvider>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    proxies: usize,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    let proxies = match &state.proxies {
        Some(pool) => pool.proxy_count().await,
        None => 0,
    };
    Json(HealthResponse {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
        proxies,
    })
}

async fn api_ready() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Application ready" }))
}

pub fn create_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(api_ready))
        .with_state(state)
}

/// Serves the health router on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: HealthState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Health server listening");
    axum::serve(listener, create_router(state))
        .await
        .context("Health server failed")
}

/// Binds `addr` and runs the health server in the background.
pub async fn spawn_health_server(addr: &str, state: HealthState) -> Result<tokio::task::JoinHandle<()>> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid health address: {}", addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind health server on {}", addr))?;
    Ok(tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            error!(error = %e, "Health server stopped");
        }
    }))
}
