//! yomu-api server entry point

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use yomu_api::ApiError;
use yomu_api::api::{AppState, run_server};
use yomu_api::config::Config;
use yomu_api::service::YomuBackend;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // Configuration first: it carries the default log level
  let config = Config::from_env()?;

  // Logging initialization (RUST_LOG overrides YOMU_LOG_LEVEL)
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

  tracing::info!(
    bind_addr = %config.bind_addr,
    data_dir = ?config.data_dir,
    max_text_bytes = ?config.max_text_bytes,
    "Configuration loaded"
  );

  // Resources are loaded once, before the first request
  let backend = Arc::new(YomuBackend::new(&config)?);
  tracing::info!("NLP toolkit initialized");

  let state = AppState::new(config, backend);

  run_server(state).await
}
