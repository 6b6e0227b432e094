//! Sentence and word tokenization
pub mod sentence_splitter;
pub mod treebank_tokenizer;

pub use sentence_splitter::SentenceSplitter;
pub use treebank_tokenizer::TreebankWordTokenizer;
