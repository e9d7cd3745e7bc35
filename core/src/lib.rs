//! # quern-core
//!
//! **Trait abstractions for retrieval-augmented chat** that work with any
//! provider.
//!
//! `quern-core` hosts the small trait APIs that power the rest of the
//! workspace. Use it directly (or through the top-level `quern` crate) to
//! describe portable embedding models, generative chat models, and vector
//! stores. Every provider crate simply implements these traits.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Your App      │───▶│   quern-core     │◀───│   Providers     │
//! │                 │    │   (this crate)   │    │                 │
//! │ - Ingestion     │    │                  │    │ - openrouter    │
//! │ - Chat APIs     │    │ - EmbeddingModel │    │ - pinecone      │
//! │ - Search        │    │ - ChatModel      │    │ - in-memory     │
//! │                 │    │ - VectorStore    │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ## Traits
//!
//! | Capability | Trait | Description |
//! |------------|-------|-------------|
//! | **Embeddings** | [`EmbeddingModel`] | Convert text to vectors for semantic search |
//! | **Generation** | [`ChatModel`] | One-shot grounded chat completions |
//! | **Vector storage** | [`VectorStore`] | Upsert and nearest-neighbor retrieval |
//!
//! Failures from every trait share one taxonomy, [`Error`], so pipelines can
//! classify what went wrong ([`Error::descriptor`]) and whether retrying makes
//! sense ([`Error::is_transient`]) without knowing which provider was behind
//! the call.

/// Generative chat completion.
pub mod chat;
/// Text embeddings.
pub mod embedding;
mod error;
/// Vector storage and retrieval.
pub mod store;
mod types;

#[doc(inline)]
pub use chat::ChatModel;
#[doc(inline)]
pub use embedding::{Embedding, EmbeddingModel};
#[doc(inline)]
pub use store::VectorStore;

pub use error::{Error, Result};
pub use types::{IndexRecord, Metadata, ScoredMatch, UpsertReport};
