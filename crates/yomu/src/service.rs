// crates/yomu/src/service.rs

//! YomuService: the facade of the yomu crate.
//!
//! - Resource loading (ResourceManager)
//! - Sentence splitting and Treebank word tokenization
//! - Part-of-speech tagging and named-entity chunking
//! - VADER sentiment scoring
//!
//! Callers such as the HTTP API only need this struct. It is immutable after
//! [`init`](YomuService::init) and `Send + Sync`, so it is shared through `Arc`.

use std::sync::Arc;

use tracing::info;

use crate::chunker::EntityChunker;
use crate::config::YomuConfig;
use crate::errors::error_definition::{YomuError, YomuResult};
use crate::models::{ChunkNode, PolarityScores, TaggedToken};
use crate::resources::{ResourceManager, Resources};
use crate::sentiment::SentimentAnalyzer;
use crate::tagger::PosTagger;
use crate::tokenizer::{SentenceSplitter, TreebankWordTokenizer};

/// Facade of the yomu crate.
pub struct YomuService {
  /// Resource manager the components were built from
  resource_manager: ResourceManager,

  splitter: SentenceSplitter,
  tokenizer: TreebankWordTokenizer,
  tagger: PosTagger,
  chunker: EntityChunker,
  sentiment: SentimentAnalyzer,
}

impl YomuService {
  /// Initialization (config validation + resource loading + component construction)
  ///
  /// # Processing Flow
  /// 1. Validate the configuration
  /// 2. Build the ResourceManager described by the [resources] section
  /// 3. Load the resources and build every component on the shared `Arc<Resources>`
  ///
  /// # Errors
  /// - Invalid configuration
  /// - Missing data directory or malformed resource file
  pub fn init(config: &YomuConfig) -> YomuResult<Self> {
    // ConfigError / ResourceError convert into YomuError through #[from]
    config.validate()?;

    let resource_manager = config.resource_manager()?;
    let resources = resource_manager.load()?;

    info!(data_dir = ?resource_manager.data_dir(), "YomuService initialized");

    Ok(Self::from_parts(resource_manager, resources))
  }

  fn from_parts(resource_manager: ResourceManager, resources: Arc<Resources>) -> Self {
    Self {
      resource_manager,
      splitter: SentenceSplitter::new(Arc::clone(&resources)),
      tokenizer: TreebankWordTokenizer::new(),
      tagger: PosTagger::new(Arc::clone(&resources)),
      chunker: EntityChunker::new(resources),
      sentiment: SentimentAnalyzer::new(),
    }
  }

  /// Returns the resource manager
  pub fn resource_manager(&self) -> &ResourceManager {
    &self.resource_manager
  }

  /// Splits the text into sentences (trimmed, in order)
  pub fn sent_tokenize(&self, text: &str) -> Vec<String> {
    self.splitter.split(text).into_iter().map(str::to_string).collect()
  }

  /// Splits the text into word tokens
  ///
  /// Sentence split first, then each sentence is tokenized; the tokens are concatenated.
  pub fn word_tokenize(&self, text: &str) -> Vec<String> {
    self
      .splitter
      .split(text)
      .into_iter()
      .flat_map(|sentence| self.tokenizer.tokenize(sentence))
      .collect()
  }

  /// Tags every word token of the text
  ///
  /// Sentences are tagged independently so each one starts a fresh context.
  pub fn pos_tag(&self, text: &str) -> Vec<TaggedToken> {
    self
      .splitter
      .split(text)
      .into_iter()
      .flat_map(|sentence| self.tagger.tag(&self.tokenizer.tokenize(sentence)))
      .collect()
  }

  /// Chunks the tagged text into named entities
  ///
  /// Returns the flat node sequence of all sentences; the leaves cover every token.
  pub fn ne_chunk(&self, text: &str) -> Vec<ChunkNode> {
    self
      .splitter
      .split(text)
      .into_iter()
      .flat_map(|sentence| {
        let tagged = self.tagger.tag(&self.tokenizer.tokenize(sentence));
        self.chunker.chunk(&tagged)
      })
      .collect()
  }

  /// Scores the sentiment of the whole text
  ///
  /// # Errors
  /// The VADER scorer failed (see [`SentimentError`](crate::errors::SentimentError))
  pub fn polarity_scores(&self, text: &str) -> YomuResult<PolarityScores> {
    self.sentiment.polarity_scores(text).map_err(YomuError::from)
  }
}

impl std::fmt::Debug for YomuService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("YomuService")
      .field("resource_manager", &self.resource_manager)
      .finish_non_exhaustive()
  }
}
