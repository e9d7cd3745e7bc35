use crate::{
    DEFAULT_BASE_URL, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL,
    EMBEDDING_ADA002, EMBEDDING_LARGE, EMBEDDING_SMALL, MINILM_L6_V2, OPENAI_BASE_URL,
};
use std::{sync::Arc, time::Duration};

/// Default request timeout for one upstream call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat and embeddings client for `OpenRouter` and other OpenAI-compatible
/// endpoints.
///
/// The client is cheap to clone; clones share the underlying connection
/// pool and configuration.
#[derive(Clone, Debug)]
pub struct OpenRouter {
    inner: Arc<Config>,
}

impl OpenRouter {
    /// Create a client for the hosted `OpenRouter` endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a client configured for `OpenAI`'s API.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).base_url(OPENAI_BASE_URL).build()
    }

    /// Start building an [`OpenRouter`] client with custom configuration.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> Builder {
        Builder::new(api_key)
    }

    /// Override the chat model in-place.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).chat_model = sanitize_model(model);
        self
    }

    /// Override the REST base URL (useful for OpenAI-compatible endpoints).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    pub(crate) fn config(&self) -> Arc<Config> {
        self.inner.clone()
    }
}

/// Builder for [`OpenRouter`] clients.
#[derive(Debug)]
pub struct Builder {
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
    embedding_dimensions: usize,
    request_timeout: Duration,
}

impl Builder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIM,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set a custom API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Select a chat model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = sanitize_model(model);
        self
    }

    /// Select the embeddings model identifier.
    ///
    /// The embedding dimension is inferred for well-known models; use
    /// [`embedding_dimensions`](Builder::embedding_dimensions) for others.
    #[must_use]
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        let model = sanitize_model(model);
        if let Some(dim) = infer_embedding_dim(&model) {
            self.embedding_dimensions = dim;
        }
        self.embedding_model = model;
        self
    }

    /// Override the embedding vector dimension.
    #[must_use]
    pub const fn embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.embedding_dimensions = dimensions;
        self
    }

    /// Set the per-request timeout.
    ///
    /// The timeout covers the entire request, including connection setup
    /// and reading the response.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Consume the builder and create an [`OpenRouter`] client.
    #[must_use]
    pub fn build(self) -> OpenRouter {
        OpenRouter {
            inner: Arc::new(Config {
                http: reqwest::Client::new(),
                api_key: self.api_key,
                base_url: self.base_url,
                chat_model: self.chat_model,
                embedding_model: self.embedding_model,
                embedding_dimensions: self.embedding_dimensions,
                request_timeout: self.request_timeout,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) chat_model: String,
    pub(crate) embedding_model: String,
    pub(crate) embedding_dimensions: usize,
    pub(crate) request_timeout: Duration,
}

impl Config {
    pub(crate) fn request_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn request_auth(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

fn sanitize_model(model: impl Into<String>) -> String {
    model.into().trim().to_string()
}

fn infer_embedding_dim(model: &str) -> Option<usize> {
    match model {
        EMBEDDING_LARGE => Some(3072),
        EMBEDDING_SMALL | EMBEDDING_ADA002 => Some(1536),
        MINILM_L6_V2 => Some(384),
        _ => None,
    }
}
