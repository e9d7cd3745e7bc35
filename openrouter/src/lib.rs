//! `OpenRouter` integration for quern, speaking the OpenAI-compatible
//! chat-completions and embeddings protocol over `reqwest`.
//!
//! The client defaults to the hosted [`OpenRouter`](https://openrouter.ai)
//! endpoint but works against any OpenAI-compatible server via
//! [`Builder::base_url`], which covers `OpenAI` itself as well as local
//! embedding servers.
//!
//! ```no_run
//! use quern_core::ChatModel;
//! use quern_openrouter::OpenRouter;
//!
//! # async fn demo() -> quern_core::Result<()> {
//! let model = OpenRouter::new(std::env::var("OPENROUTER_API_KEY").unwrap_or_default());
//! let reply = model
//!     .generate("You are a helpful AI assistant.", "What is a monad?")
//!     .await?;
//! println!("{reply}");
//! # Ok(()) }
//! ```

mod chat;
mod client;
mod embedding;

pub use client::{Builder, OpenRouter};

mod constant;
pub use constant::*;

pub(crate) const DEFAULT_BASE_URL: &str = OPENROUTER_BASE_URL;
pub(crate) const DEFAULT_MODEL: &str = DEVSTRAL_FREE;
pub(crate) const DEFAULT_EMBEDDING_MODEL: &str = EMBEDDING_SMALL;
pub(crate) const DEFAULT_EMBEDDING_DIM: usize = 1536;
