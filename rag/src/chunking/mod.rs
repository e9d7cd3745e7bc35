//! Text chunking strategies.
//!
//! This module provides the [`Chunker`] trait and the word-window
//! implementation used by the ingestion pipeline.

mod word;

pub use word::{DEFAULT_CHUNK_SIZE, WordChunker};

use crate::types::Chunk;
use quern_core::Result;

/// Trait for text chunking strategies.
///
/// Chunkers split raw text into smaller pieces that can be individually
/// embedded and retrieved. Chunks come back in document order with
/// consecutive indices starting at zero.
pub trait Chunker: Send + Sync {
    /// Splits text into ordered chunks.
    ///
    /// Empty or whitespace-only text yields no chunks.
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &'static str;
}
