//! HTTP server wiring.
//!
//! Builds the shared state (embedding provider, job client, config), the
//! axum router, and the serve loop with graceful shutdown. The embedding
//! model is loaded once here — a load failure aborts startup instead of
//! failing per-request.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ResumatchConfig;
use crate::embedding::{self, EmbeddingProvider};
use crate::handlers;
use crate::jobs::JobClient;

/// Uploaded resumes are small documents; anything bigger is rejected upstream.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared per-process state. The provider is read-only after startup;
/// concurrent requests may call it concurrently.
#[derive(Clone)]
pub struct AppState {
    pub embedding: Arc<dyn EmbeddingProvider>,
    pub jobs: JobClient,
    pub config: Arc<ResumatchConfig>,
}

/// Create the embedding provider and job client from config.
pub fn build_state(config: ResumatchConfig) -> Result<AppState> {
    let provider = embedding::create_provider(&config.embedding)?;
    let embedding: Arc<dyn EmbeddingProvider> = Arc::from(provider);
    tracing::info!("embedding provider ready");

    let jobs = JobClient::new(&config.jobs)?;

    Ok(AppState {
        embedding,
        jobs,
        config: Arc::new(config),
    })
}

/// CORS is fully open — an operational choice for the browser frontend,
/// not a security boundary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/upload", post(handlers::upload_resume))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and run until ctrl-c.
pub async fn serve(config: ResumatchConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config)?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "resumatch listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
