//! Vector storage and retrieval.

use crate::{IndexRecord, ScoredMatch, UpsertReport};
use core::future::Future;

/// An index of `(id, vector, metadata)` records answering nearest-neighbor
/// queries.
///
/// Upserts are idempotent per id: writing an id that already exists
/// overwrites the stored record, so re-ingesting the same document does not
/// grow the index. Queries return matches ranked by the store's similarity
/// metric, best first.
pub trait VectorStore: Send + Sync {
    /// Inserts or overwrites a batch of records.
    ///
    /// A store that accepts only part of the batch lists the rejected ids in
    /// [`UpsertReport::failed`] rather than failing the whole call. The call
    /// itself fails only when the store is unreachable for the entire batch.
    fn upsert(
        &self,
        records: Vec<IndexRecord>,
    ) -> impl Future<Output = crate::Result<UpsertReport>> + Send;

    /// Returns up to `top_k` records nearest to `vector`, best first.
    ///
    /// When `include_metadata` is false the returned matches carry empty
    /// metadata, which keeps payloads small for callers that only need ids.
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> impl Future<Output = crate::Result<Vec<ScoredMatch>>> + Send;
}

impl<T: VectorStore> VectorStore for &T {
    fn upsert(
        &self,
        records: Vec<IndexRecord>,
    ) -> impl Future<Output = crate::Result<UpsertReport>> + Send {
        T::upsert(self, records)
    }

    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> impl Future<Output = crate::Result<Vec<ScoredMatch>>> + Send {
        T::query(self, vector, top_k, include_metadata)
    }
}

impl<T: VectorStore> VectorStore for std::sync::Arc<T> {
    fn upsert(
        &self,
        records: Vec<IndexRecord>,
    ) -> impl Future<Output = crate::Result<UpsertReport>> + Send {
        T::upsert(self, records)
    }

    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> impl Future<Output = crate::Result<Vec<ScoredMatch>>> + Send {
        T::query(self, vector, top_k, include_metadata)
    }
}
