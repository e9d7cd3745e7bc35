//! Records and reports exchanged with vector stores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value metadata attached to stored vectors.
pub type Metadata = BTreeMap<String, String>;

/// Metadata key under which a record's source text is stored.
const TEXT_KEY: &str = "text";

/// A vector and its metadata, addressed by a stable id.
///
/// This is both the in-process representation and the wire shape sent to
/// index backends, so re-upserting an id overwrites the stored record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Stable identifier for this record.
    pub id: String,
    /// Embedding vector.
    pub values: Vec<f32>,
    /// Arbitrary metadata, echoed back on retrieval.
    #[serde(default)]
    pub metadata: Metadata,
}

impl IndexRecord {
    /// Creates a record with empty metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            metadata: Metadata::new(),
        }
    }

    /// Creates a record carrying its source text as metadata.
    #[must_use]
    pub fn with_text(id: impl Into<String>, values: Vec<f32>, text: impl Into<String>) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(TEXT_KEY.into(), text.into());
        Self {
            id: id.into(),
            values,
            metadata,
        }
    }

    /// Returns the source text stored in this record's metadata, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.metadata.get(TEXT_KEY).map(String::as_str)
    }
}

/// One retrieval hit, ranked by similarity score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Id of the matched record.
    pub id: String,
    /// Similarity score; higher is closer.
    pub score: f32,
    /// Metadata echoed from the stored record. Empty when the query did not
    /// request metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl ScoredMatch {
    /// Creates a match with empty metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            metadata: Metadata::new(),
        }
    }

    /// Returns the matched record's source text, if it was retrieved.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.metadata.get(TEXT_KEY).map(String::as_str)
    }
}

/// Outcome of a batch upsert.
///
/// A store that accepts only part of a batch reports the rejected ids here
/// instead of failing the whole call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpsertReport {
    /// Number of records the store accepted.
    pub upserted: usize,
    /// Ids of records the store rejected.
    pub failed: Vec<String>,
}

impl UpsertReport {
    /// Report for a fully accepted batch.
    #[must_use]
    pub const fn complete(upserted: usize) -> Self {
        Self {
            upserted,
            failed: Vec::new(),
        }
    }

    /// Whether every record in the batch was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
