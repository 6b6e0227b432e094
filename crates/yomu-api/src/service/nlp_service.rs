//! NLP capability traits and their yomu implementation

use std::sync::Arc;

use yomu::YomuService;
use yomu::models::{ChunkNode, PolarityScores, TaggedToken};

use crate::config::Config;
use crate::errors::{ApiError, Result};

/// Word and sentence tokenization
pub trait Tokenizer: Send + Sync {
  /// Word-level tokens of the whole text
  ///
  /// # Errors
  /// Toolkit failure
  fn word_tokenize(&self, text: &str) -> Result<Vec<String>>;

  /// Sentences of the text
  ///
  /// # Errors
  /// Toolkit failure
  fn sent_tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// Part-of-speech tagging
pub trait Tagger: Send + Sync {
  /// Tagged words of the whole text, in order
  ///
  /// # Errors
  /// Toolkit failure
  fn pos_tag(&self, text: &str) -> Result<Vec<TaggedToken>>;
}

/// Named-entity chunking
pub trait EntityExtractor: Send + Sync {
  /// Chunk tree of the whole text
  ///
  /// # Errors
  /// Toolkit failure
  fn ne_chunk(&self, text: &str) -> Result<Vec<ChunkNode>>;
}

/// Sentiment scoring
pub trait SentimentScorer: Send + Sync {
  /// Polarity scores of the whole text
  ///
  /// # Errors
  /// Toolkit failure
  fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;
}

/// Every capability the HTTP layer needs
///
/// This trait allows swapping the production implementation (`YomuBackend`) with
/// test stubs. It is implemented for every type implementing the four capabilities.
pub trait NlpBackend: Tokenizer + Tagger + EntityExtractor + SentimentScorer {}

impl<T> NlpBackend for T where T: Tokenizer + Tagger + EntityExtractor + SentimentScorer {}

/// Production backend on the yomu toolkit
#[derive(Debug, Clone)]
pub struct YomuBackend {
  service: Arc<YomuService>,
}

impl YomuBackend {
  /// Initializes the toolkit described by `config`
  ///
  /// # Errors
  /// Returns a configuration error if the resources cannot be loaded
  pub fn new(config: &Config) -> Result<Self> {
    let service = YomuService::init(&config.yomu_config()).map_err(ApiError::from)?;
    Ok(Self::from_service(Arc::new(service)))
  }

  /// Wraps an already initialized toolkit
  #[must_use]
  pub fn from_service(service: Arc<YomuService>) -> Self {
    Self { service }
  }
}

impl Tokenizer for YomuBackend {
  fn word_tokenize(&self, text: &str) -> Result<Vec<String>> {
    Ok(self.service.word_tokenize(text))
  }

  fn sent_tokenize(&self, text: &str) -> Result<Vec<String>> {
    Ok(self.service.sent_tokenize(text))
  }
}

impl Tagger for YomuBackend {
  fn pos_tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
    Ok(self.service.pos_tag(text))
  }
}

impl EntityExtractor for YomuBackend {
  fn ne_chunk(&self, text: &str) -> Result<Vec<ChunkNode>> {
    Ok(self.service.ne_chunk(text))
  }
}

impl SentimentScorer for YomuBackend {
  fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
    self.service.polarity_scores(text).map_err(ApiError::from)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use yomu::models::EntityLabel;

  fn backend() -> Arc<dyn NlpBackend> {
    Arc::new(YomuBackend::new(&Config::default()).expect("embedded resources must load"))
  }

  #[test]
  fn backend_serves_every_capability() {
    let backend = backend();
    let text = "Barack Obama visited Paris. It was lovely!";

    assert_eq!(backend.sent_tokenize(text).unwrap().len(), 2);
    assert_eq!(backend.word_tokenize(text).unwrap().len(), backend.pos_tag(text).unwrap().len());

    let labels: Vec<EntityLabel> =
      backend.ne_chunk(text).unwrap().iter().filter_map(ChunkNode::label).collect();
    assert!(labels.contains(&EntityLabel::Gpe));

    assert!(backend.polarity_scores(text).unwrap().compound > 0.0);
  }

  #[test]
  fn missing_data_dir_is_config_error() {
    let config = Config {
      data_dir: Some(std::path::PathBuf::from("/definitely/not/a/yomu/dir")),
      ..Config::default()
    };

    let err = YomuBackend::new(&config).unwrap_err();
    assert_eq!(err.code(), "config_error");
  }
}
