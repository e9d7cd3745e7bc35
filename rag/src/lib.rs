//! # quern-rag
//!
//! Retrieval-augmented generation pipelines: turn documents into an indexed
//! knowledge base, then answer questions grounded in what was indexed.
//!
//! Two pipelines cover the whole lifecycle:
//!
//! - [`Ingestor`] reads a document, splits it into word-window chunks,
//!   embeds each chunk, and upserts the vectors into a [`VectorStore`].
//!   Chunk ids are derived from chunk position, so re-ingesting a document
//!   overwrites instead of duplicating.
//! - [`QueryPipeline`] embeds a question with the same model, retrieves the
//!   nearest chunks, assembles a grounded prompt, and asks a [`ChatModel`]
//!   for the reply.
//!
//! Both pipelines work against the `quern-core` traits, so any embedding
//! backend, chat backend, or vector store plugs in. [`MemoryStore`] is the
//! bundled in-process store for tests and offline runs.
//!
//! ```rust,ignore
//! use quern_rag::{Document, Ingestor, QueryPipeline};
//!
//! let ingestor = Ingestor::new(embedder.clone(), store.clone());
//! ingestor.ingest(&Document::new("faq.txt", text)).await?;
//!
//! let pipeline = QueryPipeline::new(embedder, store, chat_model);
//! let outcome = pipeline.answer("What services do you offer?").await;
//! ```
//!
//! [`VectorStore`]: quern_core::VectorStore
//! [`ChatModel`]: quern_core::ChatModel

pub mod chunking;
mod config;
mod ingest;
mod memory;
mod prompt;
mod query;
mod retry;
mod types;

pub use chunking::{Chunker, WordChunker};
pub use config::{DEFAULT_BUDGET, DEFAULT_TOP_K, QueryConfig, QueryConfigBuilder};
pub use ingest::{IngestFailure, IngestProgress, IngestReport, IngestStage, Ingestor};
pub use memory::MemoryStore;
pub use prompt::PromptTemplate;
pub use query::QueryPipeline;
pub use retry::RetryConfig;
pub use types::{ChatExchange, ChatOutcome, Chunk, Document};

pub use quern_core::{Error, Result};
