//! API error definitions

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

// Error type of the yomu crate
use yomu::errors::YomuError;

/// Kind of error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// No text in the request
  NoText,
  /// Request body could not be read as a text request
  InvalidInput,
  /// Text is too long
  TextTooLong,
  /// The toolkit failed while processing the text
  Processing,
  /// Configuration error
  Config,
}

impl ApiErrorKind {
  /// Get error code (used in logs)
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::NoText => "no_text",
      Self::InvalidInput => "invalid_input",
      Self::TextTooLong => "text_too_long",
      Self::Processing => "processing_error",
      Self::Config => "config_error",
    }
  }

  /// Get HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::NoText | Self::InvalidInput | Self::TextTooLong => StatusCode::BAD_REQUEST,
      Self::Processing | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
  /// `text` is missing, null or empty
  #[error("No text provided")]
  NoText,

  /// Body is not a JSON object with a string `text`
  #[error("{0}")]
  InvalidInput(String),

  /// Text is too long
  #[error("Text is too long: {0} bytes (max {1} bytes)")]
  TextTooLong(usize, usize),

  /// Toolkit failure; the message is the toolkit's error text
  #[error("{0}")]
  Processing(String),

  /// Configuration error
  #[error("configuration error: {0}")]
  Config(String),
}

impl ApiError {
  /// Get kind of error
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::NoText => ApiErrorKind::NoText,
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::TextTooLong(_, _) => ApiErrorKind::TextTooLong,
      Self::Processing(_) => ApiErrorKind::Processing,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// Get error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// Get HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// Create invalid input error
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// Create text too long error
  #[must_use]
  pub fn text_too_long(actual: usize, max: usize) -> Self {
    Self::TextTooLong(actual, max)
  }

  /// Create processing error
  #[must_use]
  pub fn processing(message: impl Into<String>) -> Self {
    Self::Processing(message.into())
  }

  /// Create configuration error
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// JSON structure of error response
#[derive(Serialize)]
struct ErrorResponse {
  error: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    if status.is_server_error() {
      error!(code = self.code(), error = %self, "Request failed");
    } else {
      warn!(code = self.code(), error = %self, "Request rejected");
    }

    let body = ErrorResponse {
      error: self.to_string(),
    };

    (status, Json(body)).into_response()
  }
}

/// Conversion from YomuError to ApiError
///
/// Resource and configuration errors only occur while the toolkit starts;
/// everything else happened while processing a request.
impl From<YomuError> for ApiError {
  fn from(err: YomuError) -> Self {
    match err {
      YomuError::Config(_) | YomuError::Resource(_) => ApiError::config(err.to_string()),
      YomuError::Sentiment(_) | YomuError::Tagger(_) => ApiError::processing(err.to_string()),
      // For #[non_exhaustive] enum, handle variants added in the future
      _ => ApiError::processing(err.to_string()),
    }
  }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
