//! Config loading from environment variables

use std::path::PathBuf;
use std::str::FromStr;

use yomu::config::{LogLevel, YomuConfig};

use super::constants::{
  BODY_OVERHEAD_BYTES, DEFAULT_BIND_ADDR, DEFAULT_LOG_LEVEL, ENV_BIND_ADDR, ENV_DATA_DIR,
  ENV_LOG_LEVEL, ENV_MAX_TEXT_BYTES, JSON_ESCAPE_FACTOR,
};
use crate::errors::ApiError;

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:5000")
  pub bind_addr: String,
  /// Resource directory extending the embedded resources
  pub data_dir: Option<PathBuf>,
  /// Default log level (`RUST_LOG` still takes precedence)
  pub log_level: LogLevel,
  /// Maximum input text length (bytes), `None` for no limit
  pub max_text_bytes: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind_addr: DEFAULT_BIND_ADDR.to_string(),
      data_dir: None,
      log_level: LogLevel::Info,
      max_text_bytes: None,
    }
  }
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through `lookup` (environment variable name → value)
  ///
  /// Empty values count as unset.
  ///
  /// # Errors
  /// - Unknown log level
  /// - Maximum text length that is not a positive integer
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let bind_addr = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let data_dir = get(ENV_DATA_DIR).map(PathBuf::from);

    let log_level_str = get(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_level = LogLevel::from_str(&log_level_str).map_err(|e| ApiError::config(e.to_string()))?;

    let max_text_bytes =
      get(ENV_MAX_TEXT_BYTES).map(|value| parse_max_text_bytes(&value)).transpose()?;

    Ok(Self {
      bind_addr,
      data_dir,
      log_level,
      max_text_bytes,
    })
  }

  /// Request body limit derived from the text limit, `None` when text length is unlimited
  ///
  /// Large enough for a fully escaped text of `max_text_bytes`, so over-long texts
  /// reach the text length check instead of the body limit.
  pub fn max_body_bytes(&self) -> Option<usize> {
    self
      .max_text_bytes
      .map(|bytes| bytes.saturating_mul(JSON_ESCAPE_FACTOR).saturating_add(BODY_OVERHEAD_BYTES))
  }

  /// Toolkit configuration derived from this configuration
  pub fn yomu_config(&self) -> YomuConfig {
    let mut config = YomuConfig::default();
    config.resources.data_dir = self.data_dir.clone();
    config.logging.level = self.log_level;
    config
  }
}

fn parse_max_text_bytes(value: &str) -> crate::errors::Result<usize> {
  match value.parse::<usize>() {
    Ok(0) | Err(_) => Err(ApiError::config(format!(
      "{ENV_MAX_TEXT_BYTES} must be a positive integer, got: {value}"
    ))),
    Ok(bytes) => Ok(bytes),
  }
}
