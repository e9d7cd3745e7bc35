//! # quern
//!
//! Facade crate that re-exports everything from [`quern_core`] plus, behind
//! feature gates, the bundled backends. Pull this crate into your binary to
//! ingest documents into a vector index and answer questions grounded in
//! them, with any backend that implements the core traits.
//!
//! ## What's inside?
//!
//! - [`EmbeddingModel`], [`ChatModel`], and [`VectorStore`]: the three seams
//!   every backend plugs into.
//! - [`Error`] with stable descriptors, so callers can tell a caller mistake
//!   from a transient upstream failure.
//! - `rag` (default): ingestion and query pipelines plus the in-process
//!   [`MemoryStore`](quern_rag::MemoryStore).
//! - `openrouter`: chat and embeddings over any OpenAI-compatible API.
//! - `pinecone`: a hosted index backend.
//! - `server`: a minimal HTTP front end for the query pipeline.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quern::rag::{Document, Ingestor, QueryPipeline};
//! use quern_openrouter::OpenRouter;
//! use quern_pinecone::Pinecone;
//!
//! async fn demo(text: &str) -> quern::Result<()> {
//!     let model = OpenRouter::new("or-key");
//!     let index = Pinecone::new("pc-key", "my-index.svc.pinecone.io");
//!
//!     let ingestor = Ingestor::new(model.clone(), index.clone());
//!     ingestor
//!         .ingest(&Document::new("notes", text))
//!         .await
//!         .map_err(|failure| failure.source)?;
//!
//!     let pipeline = QueryPipeline::new(model.clone(), index, model);
//!     let outcome = pipeline.answer("What do the notes say?").await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub use quern_core::*;

#[cfg(feature = "openrouter")]
pub use quern_openrouter as openrouter;

#[cfg(feature = "pinecone")]
pub use quern_pinecone as pinecone;

#[cfg(feature = "rag")]
pub use quern_rag as rag;

#[cfg(feature = "server")]
pub use quern_server as server;
