//! Minimal HTTP front end for a quern chat pipeline.
//!
//! Serves three endpoints over plain HTTP/1.1, one request per connection:
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `GET /` | Liveness: `{"status":"ok","message":"quern API is running"}` |
//! | `GET /health` | Liveness: `{"status":"healthy"}` |
//! | `POST /chat` | `{"message":"..."}` in, `{"reply":"..."}` or `{"error":"...","reply":null}` out |
//!
//! There is no TLS and no authentication; bind loopback or front it with a
//! reverse proxy.
//!
//! ```no_run
//! use quern_rag::{MemoryStore, QueryPipeline};
//! use quern_server::Server;
//!
//! # async fn example(
//! #     embedder: impl quern_core::EmbeddingModel + 'static,
//! #     model: impl quern_core::ChatModel + 'static,
//! # ) -> std::io::Result<()> {
//! let pipeline = QueryPipeline::new(embedder, MemoryStore::new(), model);
//! let server = Server::bind("127.0.0.1:8000".parse().unwrap(), pipeline).await?;
//! server.run().await
//! # }
//! ```

mod http;
mod routes;
mod server;

pub use server::Server;
