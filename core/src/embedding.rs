//! # Embedding Module
//!
//! Embeddings are dense vector representations of text that capture semantic
//! meaning. Similar texts produce nearby vectors, which is what makes
//! retrieval work: a question embedded with the same model as the indexed
//! chunks lands close to the chunks that answer it.
//!
//! This module provides the [`EmbeddingModel`] trait that abstracts over
//! different embedding backends, so ingestion and retrieval can swap
//! providers without changing shape.
//!
//! ```rust
//! use quern_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> quern_core::Result<()> {
//!     let dim = model.dim();
//!     let embedding = model.embed("Hello, world!").await?;
//!     assert_eq!(embedding.len(), dim);
//!     Ok(())
//! }
//! ```

use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
///
/// The vector length is fixed per model and reported by
/// [`EmbeddingModel::dim`].
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// # Implementation Requirements
///
/// - [`embed`](EmbeddingModel::embed) must return vectors with length equal
///   to [`dim`](EmbeddingModel::dim).
/// - Embedding must be deterministic: the same text yields the same vector,
///   so re-ingesting a document overwrites rather than duplicates.
/// - A backend that cannot be reached reports
///   [`Error::EmbeddingUnavailable`](crate::Error::EmbeddingUnavailable).
pub trait EmbeddingModel: Send + Sync {
    /// Returns the embedding vector dimension.
    fn dim(&self) -> usize;

    /// Converts text to an embedding vector.
    ///
    /// Returns a vector with length equal to [`dim`](EmbeddingModel::dim).
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send;
}

impl<T: EmbeddingModel> EmbeddingModel for &T {
    fn dim(&self) -> usize {
        T::dim(self)
    }

    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send {
        T::embed(self, text)
    }
}

impl<T: EmbeddingModel> EmbeddingModel for std::sync::Arc<T> {
    fn dim(&self) -> usize {
        T::dim(self)
    }

    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send {
        T::embed(self, text)
    }
}
