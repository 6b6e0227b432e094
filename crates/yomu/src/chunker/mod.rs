//! Named-entity chunking
pub mod entity_chunker;

pub use entity_chunker::EntityChunker;
