//! yomu-api crate
//!
//! Web server exposing the yomu English NLP toolkit as a JSON HTTP API.
//!
//! ## Endpoints
//! - `POST /api/tokenize` - Word and sentence tokenization
//! - `POST /api/pos-tag` - Part-of-speech tagging
//! - `POST /api/ner` - Named entity recognition
//! - `POST /api/sentiment` - Sentiment scoring
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:5000/api/ner \
//!   -H "Content-Type: application/json" \
//!   -d '{"text": "Barack Obama visited Paris."}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{
  EntityDto, HealthResponse, NerResponse, PosTagDto, PosTagResponse, SentimentResponse,
  TextRequest, TokenizeResponse,
};
pub use service::{NlpBackend, YomuBackend};
