//! Environment-driven configuration.

use anyhow::{Context, Result};
use quern_core::EmbeddingModel;
use quern_openrouter::OpenRouter;
use quern_pinecone::Pinecone;
use std::time::Duration;

/// Connection settings for the external services.
///
/// Required variables: `OPENROUTER_API_KEY`, `PINECONE_API_KEY`, and
/// `PINECONE_INDEX_HOST`. Everything else falls back to client defaults:
///
/// | Variable | Purpose |
/// |----------|---------|
/// | `OPENROUTER_BASE_URL` | Alternate OpenAI-compatible endpoint |
/// | `QUERN_CHAT_MODEL` | Chat model identifier |
/// | `QUERN_EMBEDDING_MODEL` | Embedding model identifier |
/// | `QUERN_EMBEDDING_DIM` | Index dimension, when the model is not a known one |
/// | `PINECONE_NAMESPACE` | Namespace within the index |
/// | `QUERN_REQUEST_TIMEOUT` | Per-request timeout in seconds |
#[derive(Clone, Debug)]
pub struct Settings {
    openrouter_api_key: String,
    openrouter_base_url: Option<String>,
    chat_model: Option<String>,
    embedding_model: Option<String>,
    embedding_dim: Option<usize>,
    pinecone_api_key: String,
    pinecone_index_host: String,
    pinecone_namespace: Option<String>,
    request_timeout: Option<Duration>,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is missing or a numeric one does not
    /// parse.
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            openrouter_api_key: require("OPENROUTER_API_KEY")?,
            openrouter_base_url: optional("OPENROUTER_BASE_URL"),
            chat_model: optional("QUERN_CHAT_MODEL"),
            embedding_model: optional("QUERN_EMBEDDING_MODEL"),
            embedding_dim: parse_optional("QUERN_EMBEDDING_DIM")?,
            pinecone_api_key: require("PINECONE_API_KEY")?,
            pinecone_index_host: require("PINECONE_INDEX_HOST")?,
            pinecone_namespace: optional("PINECONE_NAMESPACE"),
            request_timeout: parse_optional("QUERN_REQUEST_TIMEOUT")?.map(Duration::from_secs),
        };
        tracing::debug!(index_host = %settings.pinecone_index_host, "configuration loaded");
        Ok(settings)
    }

    /// Chat and embedding client, built from the OpenRouter settings.
    pub fn model_client(&self) -> OpenRouter {
        let mut builder = OpenRouter::builder(&self.openrouter_api_key);
        if let Some(ref base_url) = self.openrouter_base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(ref model) = self.chat_model {
            builder = builder.model(model);
        }
        if let Some(ref embedding_model) = self.embedding_model {
            builder = builder.embedding_model(embedding_model);
        }
        if let Some(dim) = self.embedding_dim {
            builder = builder.embedding_dimensions(dim);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Vector index client, built from the Pinecone settings.
    ///
    /// The index dimension is pinned to the embedding client's, so vectors
    /// from a mismatched model are rejected before they reach the index.
    pub fn index_client(&self) -> Pinecone {
        let dimension = self
            .embedding_dim
            .unwrap_or_else(|| self.model_client().dim());
        let mut builder = Pinecone::builder(&self.pinecone_api_key, &self.pinecone_index_host)
            .dimension(dimension);
        if let Some(ref namespace) = self.pinecone_namespace {
            builder = builder.namespace(namespace);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("missing required environment variable {name}"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_optional<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional(name)
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("cannot parse {name}={value}"))
        })
        .transpose()
}
