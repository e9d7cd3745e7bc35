//! Fixed-size word-window chunking.

use super::Chunker;
use crate::types::Chunk;
use quern_core::{Error, Result};

/// Default window width in words.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Chunks text into fixed-size word windows.
///
/// Text is split on Unicode whitespace and regrouped into non-overlapping
/// windows of at most `size` words, joined back with single spaces. The
/// final window simply holds whatever words remain, so word count and order
/// are preserved exactly while original whitespace is normalized.
///
/// # Example
///
/// ```rust
/// use quern_rag::{Chunker, WordChunker};
///
/// let chunker = WordChunker::new(2).unwrap();
/// let chunks = chunker.chunk("alpha beta gamma").unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].text, "alpha beta");
/// assert_eq!(chunks[1].text, "gamma");
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    /// Maximum words per chunk.
    size: usize,
}

impl WordChunker {
    /// Creates a chunker producing windows of at most `size` words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidInput(
                "chunk size must be greater than zero".into(),
            ));
        }
        Ok(Self { size })
    }

    /// Returns the window width in words.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Chunker for WordChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let chunks = words
            .chunks(self.size)
            .enumerate()
            .map(|(index, window)| Chunk::new(index, window.join(" ")))
            .collect();
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "word_window"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        let error = WordChunker::new(0).unwrap_err();
        assert_eq!(error.descriptor(), "InvalidInput");
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = WordChunker::new(10).unwrap();
        assert!(chunker.chunk("").unwrap().is_empty());
        assert!(chunker.chunk("   \n\t  ").unwrap().is_empty());
    }

    #[test]
    fn short_text_fits_one_chunk() {
        let chunker = WordChunker::default();
        let chunks = chunker.chunk("just a few words").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].id(), "chunk-0");
        assert_eq!(chunks[0].text, "just a few words");
    }

    #[test]
    fn windows_are_full_except_the_last() {
        let text = (0..25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunker = WordChunker::new(10).unwrap();
        let chunks = chunker.chunk(&text).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.split_whitespace().count(), 10);
        assert_eq!(chunks[1].text.split_whitespace().count(), 10);
        assert_eq!(chunks[2].text.split_whitespace().count(), 5);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let text = "a b c d e f";
        let chunker = WordChunker::new(3).unwrap();
        let chunks = chunker.chunk(text).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "d e f");
    }

    #[test]
    fn every_word_survives_in_order() {
        let text = "  one\ttwo\nthree   four five  ";
        let chunker = WordChunker::new(2).unwrap();
        let chunks = chunker.chunk(text).unwrap();

        let rejoined = chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, "one two three four five");

        let indices: Vec<usize> = chunks.iter().map(|chunk| chunk.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn whitespace_runs_are_normalized() {
        let chunker = WordChunker::new(10).unwrap();
        let chunks = chunker.chunk("spaced    out\n\nwords").unwrap();
        assert_eq!(chunks[0].text, "spaced out words");
    }

    #[test]
    fn strategy_reports_its_name() {
        assert_eq!(WordChunker::default().name(), "word_window");
    }
}
