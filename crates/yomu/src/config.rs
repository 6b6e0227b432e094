// crates/yomu/src/config.rs

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{ConfigError, ResourceError};
use crate::resources::ResourceManager;

/// Top-level configuration for yomu.
///
/// Every section is optional; `YomuConfig::default()` uses the embedded resources only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YomuConfig {
  /// [resources] section
  pub resources: ResourceConfig,
  /// [logging] section
  pub logging: LoggingConfig,
}

/// [resources] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
  /// Directory whose resource files extend the embedded ones.
  ///
  /// Takes precedence over `use_default_dir`.
  pub data_dir: Option<PathBuf>,
  /// Look for resource files in the OS data directory (`<data_dir>/yomu`) when `data_dir` is unset.
  pub use_default_dir: bool,
}

/// [logging] section configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  /// error
  Error,
}

impl LogLevel {
  /// Returns the level as a `tracing` filter directive.
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LogLevel {
  type Err = ConfigError;

  /// Case-insensitive; surrounding whitespace is ignored.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "trace" => Ok(LogLevel::Trace),
      "debug" => Ok(LogLevel::Debug),
      "info" => Ok(LogLevel::Info),
      "warn" | "warning" => Ok(LogLevel::Warn),
      "error" => Ok(LogLevel::Error),
      _ => Err(ConfigError::InvalidLogLevel {
        value: s.to_string(),
      }),
    }
  }
}

// ===== Accessor Methods =====

impl YomuConfig {
  /// Returns the configured resource directory, `None` if unspecified.
  pub fn data_dir(&self) -> Option<&Path> {
    self.resources.data_dir.as_deref()
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `resources.data_dir` is a directory if it exists
  ///
  /// A `data_dir` that does not exist is reported when the resources are loaded.
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(dir) = &self.resources.data_dir
      && dir.exists()
      && !dir.is_dir()
    {
      return Err(ConfigError::InvalidDataDir { path: dir.clone() });
    }

    Ok(())
  }

  /// Builds the resource manager described by the [resources] section.
  ///
  /// | `data_dir` | `use_default_dir` | Resources                             |
  /// |------------|-------------------|---------------------------------------|
  /// | `Some(p)`  | any               | embedded + files in `p`               |
  /// | `None`     | `true`            | embedded + files in the OS data dir   |
  /// | `None`     | `false`           | embedded only                         |
  pub fn resource_manager(&self) -> Result<ResourceManager, ResourceError> {
    match (&self.resources.data_dir, self.resources.use_default_dir) {
      (Some(dir), _) => ResourceManager::with_data_dir(dir),
      (None, true) => ResourceManager::with_default_dir(),
      (None, false) => Ok(ResourceManager::embedded()),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
