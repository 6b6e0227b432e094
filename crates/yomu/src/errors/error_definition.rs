//! Error definitions

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors related to the toolkit configuration (`YomuConfig`)
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// resources.data_dir exists but is not a directory (a regular file, etc.)
  #[error("resources.data_dir is not a directory: path={path:?}")]
  InvalidDataDir {
    /// Offending path
    path: PathBuf,
  },

  /// Log level string could not be parsed
  #[error("unknown log level: {value} (valid values: trace, debug, info, warn, error)")]
  InvalidLogLevel {
    /// Value that was given
    value: String,
  },
}

/// Errors related to the toolkit resources (lexicon, abbreviations, gazetteer)
///
/// Resources are embedded in the crate and can be extended from a local data directory.
/// These errors describe failures while locating or parsing them.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ResourceError {
  /// The OS data directory could not be determined
  #[error("data directory could not be determined for this platform")]
  DataDirNotFound,

  /// The configured data directory does not exist or is not a directory
  #[error("resource directory is invalid: {0}")]
  InvalidDataDir(PathBuf),

  /// Reading a resource file failed
  #[error("failed to read resource file: path={path:?}, error={source}")]
  Read {
    /// File that could not be read
    path: PathBuf,
    /// Underlying IO error
    #[source]
    source: Arc<io::Error>,
  },

  /// A line of a resource file is malformed
  #[error("malformed resource entry: {file}:{line}: {reason}")]
  Malformed {
    /// Resource file name
    file: String,
    /// 1-based line number
    line: usize,
    /// What is wrong with the line
    reason: String,
  },
}

/// Tagger and chunker related errors
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum TaggerError {
  /// A tag string is not part of the Penn Treebank tagset
  #[error("unknown part-of-speech tag: {0}")]
  UnknownTag(String),

  /// An entity label string is not a supported label
  #[error("unknown entity label: {0}")]
  UnknownLabel(String),
}

/// Sentiment analysis related errors
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SentimentError {
  /// The analyzer aborted while scoring the text
  #[error("sentiment analyzer failed: {0}")]
  Analyzer(String),

  /// The analyzer result lacks one of the polarity keys
  #[error("sentiment analyzer returned no '{0}' score")]
  MissingScore(&'static str),
}

/// Unified error
/// APIs exposed outside of this crate return this error
/// Use as `YomuResult<T>` = `Result<T, YomuError>`
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum YomuError {
  /// Resource related error
  #[error(transparent)]
  Resource(#[from] ResourceError),

  /// Tagger / chunker related error
  #[error(transparent)]
  Tagger(#[from] TaggerError),

  /// Sentiment related error
  #[error(transparent)]
  Sentiment(#[from] SentimentError),

  /// Configuration error
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Standard Result type alias for the yomu crate
pub type YomuResult<T> = Result<T, YomuError>;
