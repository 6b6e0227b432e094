//! Part-of-speech tagging
pub mod lexical_tagger;

pub use lexical_tagger::PosTagger;
