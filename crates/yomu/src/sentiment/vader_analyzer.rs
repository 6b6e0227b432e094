//! VADER sentiment scoring
//!
//! Thin adapter over the `vader_sentiment` crate: its key/value scores are
//! mapped into [`PolarityScores`] at the usual VADER precision (3 decimals for
//! the proportions, 4 for `compound`) and a panic inside the scorer is reported
//! as a [`SentimentError`] instead of unwinding into the caller.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::errors::SentimentError;
use crate::models::PolarityScores;

/// Decimals kept for `neg`, `neu` and `pos`
const PROPORTION_DECIMALS: i32 = 3;

/// Decimals kept for `compound`
const COMPOUND_DECIMALS: i32 = 4;

/// VADER sentiment analyzer
///
/// The VADER lexicon is static inside `vader_sentiment`, so the analyzer is
/// rebuilt per call and this type holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
  /// Constructor
  pub fn new() -> Self {
    Self
  }

  /// Scores the whole text
  ///
  /// # Errors
  /// - [`SentimentError::Analyzer`]: the scorer panicked
  /// - [`SentimentError::MissingScore`]: a polarity key is missing from the result
  pub fn polarity_scores(&self, text: &str) -> Result<PolarityScores, SentimentError> {
    let raw = panic::catch_unwind(AssertUnwindSafe(|| {
      let analyzer = SentimentIntensityAnalyzer::new();
      analyzer
        .polarity_scores(text)
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect::<HashMap<String, f64>>()
    }))
    .map_err(|payload| SentimentError::Analyzer(panic_message(payload.as_ref())))?;

    let scores = to_polarity_scores(&raw)?;

    debug!(
      text_len = text.len(),
      compound = scores.compound,
      "Sentiment scoring completed"
    );

    Ok(scores)
  }
}

/// Maps the analyzer's key/value result into rounded [`PolarityScores`]
fn to_polarity_scores(raw: &HashMap<String, f64>) -> Result<PolarityScores, SentimentError> {
  let get = |key: &'static str, decimals: i32| {
    raw
      .get(key)
      .map(|value| round_to(*value, decimals))
      .ok_or(SentimentError::MissingScore(key))
  };

  Ok(PolarityScores {
    neg: get("neg", PROPORTION_DECIMALS)?,
    neu: get("neu", PROPORTION_DECIMALS)?,
    pos: get("pos", PROPORTION_DECIMALS)?,
    compound: get("compound", COMPOUND_DECIMALS)?,
  })
}

fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10_f64.powi(decimals);
  (value * factor).round() / factor
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic".to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positive_text_scores_positive() {
    let scores = SentimentAnalyzer::new().polarity_scores("I love this!").unwrap();
    assert!(scores.compound > 0.0);
    assert!(scores.pos > scores.neg);
  }

  #[test]
  fn negative_text_scores_negative() {
    let scores = SentimentAnalyzer::new().polarity_scores("This is terrible and I hate it.").unwrap();
    assert!(scores.compound < 0.0);
    assert!(scores.neg > scores.pos);
  }

  #[test]
  fn compound_is_normalized() {
    let scores = SentimentAnalyzer::new()
      .polarity_scores("Great great great! Wonderful, amazing, perfect, best day ever!!!")
      .unwrap();
    assert!((-1.0..=1.0).contains(&scores.compound));
  }

  #[test]
  fn scores_use_vader_precision() {
    let scores = SentimentAnalyzer::new().polarity_scores("I love this!").unwrap();
    assert_eq!(scores.compound, 0.6696);
    assert_eq!(scores.pos, 0.818);
    assert_eq!(scores.neu, 0.182);
    assert_eq!(scores.neg, 0.0);
  }

  #[test]
  fn raw_scores_are_rounded() {
    let raw: HashMap<String, f64> = [
      ("neg", 0.0),
      ("neu", 0.1820830298616169),
      ("pos", 0.817916970138383),
      ("compound", 0.6696335080835328),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let scores = to_polarity_scores(&raw).unwrap();
    assert_eq!(
      scores,
      PolarityScores {
        neg: 0.0,
        neu: 0.182,
        pos: 0.818,
        compound: 0.6696,
      }
    );
  }

  #[test]
  fn missing_key_is_an_error() {
    let raw: HashMap<String, f64> =
      [("neg", 0.0), ("neu", 1.0), ("pos", 0.0)].into_iter().map(|(k, v)| (k.to_string(), v)).collect();

    let err = to_polarity_scores(&raw).unwrap_err();
    assert!(matches!(err, SentimentError::MissingScore("compound")));
  }

  #[test]
  fn panic_payloads_become_messages() {
    let payload: Box<dyn Any + Send> = Box::new("index out of bounds");
    assert_eq!(panic_message(payload.as_ref()), "index out of bounds");

    let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
    assert_eq!(panic_message(payload.as_ref()), "owned");

    let payload: Box<dyn Any + Send> = Box::new(42_u8);
    assert_eq!(panic_message(payload.as_ref()), "unknown panic");
  }
}
