//! Sentiment analysis
pub mod vader_analyzer;

pub use vader_analyzer::SentimentAnalyzer;
