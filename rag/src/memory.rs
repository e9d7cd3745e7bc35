//! In-process vector store.

use parking_lot::RwLock;
use quern_core::{Error, IndexRecord, Metadata, Result, ScoredMatch, UpsertReport, VectorStore};
use std::collections::BTreeMap;

/// Brute-force in-memory vector store with cosine ranking.
///
/// Intended for tests, examples, and offline runs; the wire-facing
/// counterpart lives in `quern-pinecone`. The index dimension is pinned by
/// the first record stored: later records with a different dimension are
/// rejected per-record on upsert, and queries with a mismatched vector fail
/// with [`Error::InvalidDimension`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, IndexRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Computes cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (lhs, rhs) in a.iter().zip(b) {
        dot += lhs * rhs;
        norm_a += lhs * lhs;
        norm_b += rhs * rhs;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

impl VectorStore for MemoryStore {
    async fn upsert(&self, records: Vec<IndexRecord>) -> Result<UpsertReport> {
        let mut map = self.records.write();
        let mut expected = map.values().next().map(|record| record.values.len());
        let mut report = UpsertReport::default();

        for record in records {
            if let Some(dim) = expected {
                if record.values.len() != dim {
                    report.failed.push(record.id);
                    continue;
                }
            }
            expected.get_or_insert(record.values.len());
            map.insert(record.id.clone(), record);
            report.upserted += 1;
        }

        Ok(report)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<ScoredMatch>> {
        let map = self.records.read();
        if let Some(expected) = map.values().next().map(|record| record.values.len()) {
            if vector.len() != expected {
                return Err(Error::InvalidDimension {
                    expected,
                    actual: vector.len(),
                });
            }
        }

        let mut matches: Vec<ScoredMatch> = map
            .values()
            .map(|record| ScoredMatch {
                id: record.id.clone(),
                score: cosine_similarity(vector, &record.values),
                metadata: if include_metadata {
                    record.metadata.clone()
                } else {
                    Metadata::new()
                },
            })
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        {
            let mut map = store.records.write();
            for (id, values, text) in [
                ("chunk-0", vec![1.0, 0.0], "about pricing"),
                ("chunk-1", vec![0.0, 1.0], "about support"),
                ("chunk-2", vec![0.7, 0.7], "about both"),
            ] {
                map.insert(id.into(), IndexRecord::with_text(id, values, text));
            }
        }
        store
    }

    #[tokio::test]
    async fn query_ranks_by_cosine_similarity() {
        let store = seeded_store();
        let matches = store.query(&[1.0, 0.1], 3, true).await.unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].id, "chunk-0");
        assert!(matches[0].score >= matches[1].score);
        assert!(matches[1].score >= matches[2].score);
        assert_eq!(matches[0].text(), Some("about pricing"));
    }

    #[tokio::test]
    async fn top_k_bounds_the_result() {
        let store = seeded_store();
        assert_eq!(store.query(&[1.0, 0.0], 2, true).await.unwrap().len(), 2);
        assert!(store.query(&[1.0, 0.0], 0, true).await.unwrap().is_empty());
        // More than stored: return what exists
        assert_eq!(store.query(&[1.0, 0.0], 50, true).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn metadata_is_skipped_on_request() {
        let store = seeded_store();
        let matches = store.query(&[1.0, 0.0], 1, false).await.unwrap();
        assert!(matches[0].metadata.is_empty());
        assert_eq!(matches[0].text(), None);
    }

    #[tokio::test]
    async fn upsert_overwrites_same_id() {
        let store = MemoryStore::new();
        let first = store
            .upsert(vec![IndexRecord::with_text("chunk-0", vec![1.0, 0.0], "old")])
            .await
            .unwrap();
        assert_eq!(first.upserted, 1);

        let second = store
            .upsert(vec![IndexRecord::with_text("chunk-0", vec![0.0, 1.0], "new")])
            .await
            .unwrap();
        assert_eq!(second.upserted, 1);

        assert_eq!(store.len(), 1);
        let matches = store.query(&[0.0, 1.0], 1, true).await.unwrap();
        assert_eq!(matches[0].text(), Some("new"));
    }

    #[tokio::test]
    async fn mismatched_records_land_in_failed() {
        let store = MemoryStore::new();
        let report = store
            .upsert(vec![
                IndexRecord::new("chunk-0", vec![1.0, 0.0]),
                IndexRecord::new("chunk-1", vec![1.0, 0.0, 0.0]),
                IndexRecord::new("chunk-2", vec![0.5, 0.5]),
            ])
            .await
            .unwrap();

        assert_eq!(report.upserted, 2);
        assert_eq!(report.failed, vec!["chunk-1".to_owned()]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn query_dimension_is_checked() {
        let store = seeded_store();
        let error = store.query(&[1.0, 0.0, 0.0], 3, true).await.unwrap_err();
        match error {
            Error::InvalidDimension { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_store_returns_no_matches() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        let matches = store.query(&[1.0, 0.0], 3, true).await.unwrap();
        assert!(matches.is_empty());
    }
}
