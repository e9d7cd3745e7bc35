//! Pinecone index backend for quern.
//!
//! [`Pinecone`] talks to one index over its data-plane HTTP API and
//! implements [`quern_core::VectorStore`], so ingestion and retrieval code
//! written against the trait runs unchanged against a hosted index.
//!
//! ```no_run
//! use quern_core::VectorStore;
//! use quern_pinecone::Pinecone;
//!
//! # async fn example() -> quern_core::Result<()> {
//! let index = Pinecone::builder("pc-key", "my-index-abc123.svc.pinecone.io")
//!     .namespace("docs")
//!     .dimension(1536)
//!     .build();
//!
//! let matches = index.query(&[0.0; 1536], 3, true).await?;
//! # let _ = matches;
//! # Ok(())
//! # }
//! ```

mod client;
mod store;

pub use client::{Builder, Pinecone};
