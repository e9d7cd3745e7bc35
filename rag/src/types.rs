//! Core types for the ingestion and query pipelines.

use quern_core::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document to be ingested into the knowledge base.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    /// Where the text came from, for logs and reports.
    pub source: String,
    /// Raw UTF-8 text content.
    pub text: String,
}

impl Document {
    /// Creates a document from text already in memory.
    #[must_use]
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Reads a document from a UTF-8 text file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the file cannot be read or is not
    /// valid UTF-8.
    pub fn read(path: impl AsRef<Path>) -> quern_core::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::InvalidInput(format!("cannot read {}: {err}", path.display())))?;
        Ok(Self {
            source: path.display().to_string(),
            text,
        })
    }
}

/// A contiguous piece of a document, ready to embed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position of this chunk within its document.
    pub index: usize,
    /// Text content of the chunk.
    pub text: String,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Stable record id for this chunk, derived from its position.
    ///
    /// Position-derived ids are what make re-ingestion idempotent: chunk 3
    /// of a document is always `chunk-3`, so upserting it overwrites the
    /// previous version.
    #[must_use]
    pub fn id(&self) -> String {
        format!("chunk-{}", self.index)
    }
}

/// Everything produced while answering one question.
///
/// Exchanges are ephemeral: nothing here is persisted, and consecutive
/// questions share no state.
#[derive(Clone, Debug)]
pub struct ChatExchange {
    /// The question as the pipeline saw it, after trimming.
    pub question: String,
    /// Text of the retrieved chunks, best match first.
    pub context: Vec<String>,
    /// The assembled grounded prompt sent to the model.
    pub prompt: String,
    /// The model's reply.
    pub reply: String,
}

/// Wire-level outcome of a chat request.
///
/// Exactly one of `reply` and `error` is set. `error` carries a stable
/// [`Error::descriptor`] name rather than raw detail, so clients can switch
/// on it and logs keep the specifics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Error descriptor when the pipeline failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Reply text when the pipeline succeeded, `null` otherwise.
    pub reply: Option<String>,
}

impl ChatOutcome {
    /// Successful outcome carrying the model's reply.
    #[must_use]
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            error: None,
            reply: Some(reply.into()),
        }
    }

    /// Failed outcome carrying the error's stable descriptor.
    #[must_use]
    pub fn failure(error: &Error) -> Self {
        Self {
            error: Some(error.descriptor().to_owned()),
            reply: None,
        }
    }

    /// Whether this outcome carries a reply.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.reply.is_some()
    }
}
