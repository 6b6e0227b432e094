//! Router definition

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{health_check, post_ner, post_pos_tag, post_sentiment, post_tokenize};
use super::state::AppState;
use crate::errors::ApiError;

/// Create API router
///
/// # Arguments
/// * `state` - Application state
///
/// # Returns
/// Configured Router (any origin, method and header allowed by CORS)
pub fn create_router(state: AppState) -> Router {
  // Without a text limit the body is unbounded too
  let body_limit = match state.config.max_body_bytes() {
    Some(bytes) => DefaultBodyLimit::max(bytes),
    None => DefaultBodyLimit::disable(),
  };

  Router::new()
    .route("/health", get(health_check))
    .route("/api/tokenize", post(post_tokenize))
    .route("/api/pos-tag", post(post_pos_tag))
    .route("/api/ner", post(post_ner))
    .route("/api/sentiment", post(post_sentiment))
    .layer(body_limit)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Start server
///
/// Runs until Ctrl+C is received.
///
/// # Arguments
/// * `state` - Application state
///
/// # Errors
/// Returns error if server fails to bind or serve
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr.clone();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("failed to bind {addr}: {e}")))?;

  tracing::info!("Starting server: http://{}", addr);

  let router = create_router(state);

  axum::serve(listener, router)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| ApiError::processing(format!("server error: {e}")))?;

  tracing::info!("Server stopped");

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("Shutdown signal received");
}
