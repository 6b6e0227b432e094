//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::NlpBackend;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and the NLP backend.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// NLP backend
  ///
  /// - Production: `Arc::new(YomuBackend::new(&config)?)`
  /// - Test: `Arc::new(StubBackend)`
  pub backend: Arc<dyn NlpBackend>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, backend: Arc<dyn NlpBackend>) -> Self {
    Self { config, backend }
  }
}
