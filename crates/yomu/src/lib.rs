//! yomu English NLP toolkit
//!
//! Sentence splitting, Penn Treebank word tokenization, part-of-speech tagging,
//! named-entity chunking and VADER sentiment scoring over embedded resources.

/// Chunker module - gazetteer driven named-entity chunker
pub mod chunker;

/// Configuration module - defines YomuConfig, LogLevel and the other configuration structs
pub mod config;

/// Error module - defines YomuError, YomuResult and the per-component errors
pub mod errors;

/// Data model module - defines PosTag, TaggedToken, ChunkNode, PolarityScores
pub mod models;

/// Resource module - loads the abbreviation list, lexicon, given names and gazetteer
pub mod resources;

/// Sentiment module - VADER polarity scoring
pub mod sentiment;

/// Service module - provides the YomuService facade
pub mod service;

/// Tagger module - lexicon and rule based part-of-speech tagger
pub mod tagger;

/// Tokenizer module - sentence splitter and Treebank word tokenizer
pub mod tokenizer;

/// Re-exports
pub use config::{LogLevel, YomuConfig};
pub use errors::{YomuError, YomuResult};
pub use models::{ChunkNode, EntityLabel, PolarityScores, PosTag, TaggedToken};
pub use service::YomuService;
