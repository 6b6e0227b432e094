//! Response Model Definition

use serde::Serialize;
use yomu::models::{ChunkNode, PolarityScores, TaggedToken};

/// POST /api/tokenize response
#[derive(Debug, Serialize)]
pub struct TokenizeResponse {
  /// Word-level tokens of the whole text
  pub word_tokens: Vec<String>,
  /// Sentences of the text
  pub sentence_tokens: Vec<String>,
}

/// POST /api/pos-tag response
#[derive(Debug, Serialize)]
pub struct PosTagResponse {
  /// Tagged words in text order
  pub pos_tags: Vec<PosTagDto>,
}

/// Word and its Penn Treebank tag (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosTagDto {
  /// Surface form
  pub word: String,
  /// Treebank tag string (`"NN"`, `"VBD"`, `"."`)
  pub tag: String,
}

impl From<TaggedToken> for PosTagDto {
  fn from(token: TaggedToken) -> Self {
    Self {
      tag: token.tag.as_str().to_string(),
      word: token.word,
    }
  }
}

/// POST /api/ner response
#[derive(Debug, Serialize)]
pub struct NerResponse {
  /// Entities in text order
  pub named_entities: Vec<EntityDto>,
}

/// Named entity (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDto {
  /// Entity words joined by a single space
  pub text: String,
  /// Entity label (`"PERSON"`, `"GPE"`...)
  #[serde(rename = "type")]
  pub entity_type: String,
}

impl NerResponse {
  /// Flattens chunker output: entity subtrees become entries, bare tokens are dropped
  ///
  /// The words are joined with a single space; the spacing of the original text
  /// is not preserved (`"can't"` is reported as `"ca n't"`).
  #[must_use]
  pub fn from_chunks(nodes: &[ChunkNode]) -> Self {
    let named_entities = nodes
      .iter()
      .filter_map(|node| {
        node.label().map(|label| EntityDto {
          text: node.text(),
          entity_type: label.as_str().to_string(),
        })
      })
      .collect();

    Self { named_entities }
  }
}

/// POST /api/sentiment response
#[derive(Debug, Serialize)]
pub struct SentimentResponse {
  /// VADER polarity scores
  pub sentiment: PolarityScores,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
  /// Always `"healthy"` while the server answers
  pub status: &'static str,
}
