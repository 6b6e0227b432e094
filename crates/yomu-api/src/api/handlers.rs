//! HTTP handler definitions
//!
//! Every NLP endpoint follows the same steps: read the body, validate the text,
//! run exactly one backend capability on the blocking pool, shape the response.

use std::any::Any;
use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use tokio::task::JoinError;
use tracing::{debug, error, info};

use crate::errors::{ApiError, Result};
use crate::models::{
  HealthResponse, NerResponse, PosTagDto, PosTagResponse, SentimentResponse, TextRequest,
  TokenizeResponse,
};
use crate::service::NlpBackend;

use super::state::AppState;

/// Request body as seen by the handlers: a JSON parse failure is kept to be reported as 400
type TextPayload = std::result::Result<Json<TextRequest>, JsonRejection>;

/// POST /api/tokenize endpoint
///
/// # Request Body
/// ```json
/// { "text": "Dr. Smith went to Washington." }
/// ```
///
/// # Response
/// - 200 OK: `{"word_tokens": [...], "sentence_tokens": [...]}`
/// - 400 Bad Request: no text, malformed body, text too long
/// - 500 Internal Server Error: toolkit failure
pub async fn post_tokenize(
  State(state): State<AppState>,
  payload: TextPayload,
) -> Result<Json<TokenizeResponse>> {
  let response = run_on_backend(&state, payload, "tokenize", |backend, text| {
    Ok(TokenizeResponse {
      word_tokens: backend.word_tokenize(text)?,
      sentence_tokens: backend.sent_tokenize(text)?,
    })
  })
  .await?;

  info!(
    words = response.word_tokens.len(),
    sentences = response.sentence_tokens.len(),
    "Tokenization completed"
  );

  Ok(Json(response))
}

/// POST /api/pos-tag endpoint
///
/// # Response
/// - 200 OK: `{"pos_tags": [{"word": "...", "tag": "..."}, ...]}`
/// - 400 / 500: as for `/api/tokenize`
pub async fn post_pos_tag(
  State(state): State<AppState>,
  payload: TextPayload,
) -> Result<Json<PosTagResponse>> {
  let response = run_on_backend(&state, payload, "pos-tag", |backend, text| {
    let pos_tags = backend.pos_tag(text)?.into_iter().map(PosTagDto::from).collect();
    Ok(PosTagResponse { pos_tags })
  })
  .await?;

  info!(tokens = response.pos_tags.len(), "POS tagging completed");

  Ok(Json(response))
}

/// POST /api/ner endpoint
///
/// # Response
/// - 200 OK: `{"named_entities": [{"text": "...", "type": "..."}, ...]}`
/// - 400 / 500: as for `/api/tokenize`
pub async fn post_ner(
  State(state): State<AppState>,
  payload: TextPayload,
) -> Result<Json<NerResponse>> {
  let response = run_on_backend(&state, payload, "ner", |backend, text| {
    Ok(NerResponse::from_chunks(&backend.ne_chunk(text)?))
  })
  .await?;

  info!(entities = response.named_entities.len(), "Named entity recognition completed");

  Ok(Json(response))
}

/// POST /api/sentiment endpoint
///
/// # Response
/// - 200 OK: `{"sentiment": {"neg": .., "neu": .., "pos": .., "compound": ..}}`
/// - 400 / 500: as for `/api/tokenize`
pub async fn post_sentiment(
  State(state): State<AppState>,
  payload: TextPayload,
) -> Result<Json<SentimentResponse>> {
  let response = run_on_backend(&state, payload, "sentiment", |backend, text| {
    Ok(SentimentResponse {
      sentiment: backend.polarity_scores(text)?,
    })
  })
  .await?;

  info!(compound = response.sentiment.compound, "Sentiment analysis completed");

  Ok(Json(response))
}

/// Health check endpoint
///
/// Confirms that the server is running.
pub async fn health_check() -> Json<HealthResponse> {
  Json(HealthResponse { status: "healthy" })
}

/// Validates the request and runs `op` on the blocking pool
///
/// The toolkit work is CPU bound, so it is kept off the async runtime.
/// A panic inside `op` becomes a processing error.
async fn run_on_backend<T, F>(
  state: &AppState,
  payload: TextPayload,
  endpoint: &'static str,
  op: F,
) -> Result<T>
where
  T: Send + 'static,
  F: FnOnce(&dyn NlpBackend, &str) -> Result<T> + Send + 'static,
{
  let Json(request) = payload.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
  let text = request.into_text(state.config.max_text_bytes)?;

  debug!(endpoint, text_len = text.len(), "NLP request received");

  let backend = Arc::clone(&state.backend);
  tokio::task::spawn_blocking(move || op(backend.as_ref(), &text))
    .await
    .map_err(|e| join_error(endpoint, e))?
}

fn join_error(endpoint: &'static str, err: JoinError) -> ApiError {
  error!(endpoint, error = %err, "spawn_blocking error");

  if err.is_panic() {
    ApiError::processing(panic_message(err.into_panic().as_ref()))
  } else {
    ApiError::processing("processing task was cancelled")
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "processing task panicked".to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn health_check_reports_healthy() {
    let Json(response) = health_check().await;
    assert_eq!(response.status, "healthy");
  }

  #[test]
  fn panic_message_extracts_strings() {
    let payload: Box<dyn Any + Send> = Box::new("boom");
    assert_eq!(panic_message(payload.as_ref()), "boom");

    let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
    assert_eq!(panic_message(payload.as_ref()), "owned boom");

    let payload: Box<dyn Any + Send> = Box::new(7_i32);
    assert_eq!(panic_message(payload.as_ref()), "processing task panicked");
  }
}
