//! Service module

mod nlp_service;

pub use nlp_service::{
  EntityExtractor, NlpBackend, SentimentScorer, Tagger, Tokenizer, YomuBackend,
};
