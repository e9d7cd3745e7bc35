//! Client handle and configuration for one Pinecone index.

use std::sync::Arc;
use std::time::Duration;

/// Default timeout applied to each index request.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single Pinecone index.
///
/// Cheap to clone; all clones share one HTTP connection pool. Construct with
/// [`Pinecone::new`] for defaults or [`Pinecone::builder`] to set the
/// namespace, dimension, or timeout.
#[derive(Clone, Debug)]
pub struct Pinecone {
    inner: Arc<Config>,
}

impl Pinecone {
    /// Creates a client for `index_host` with default settings.
    ///
    /// `index_host` is the per-index data-plane host from the Pinecone
    /// console; a bare hostname is assumed to be `https`.
    pub fn new(api_key: impl Into<String>, index_host: impl Into<String>) -> Self {
        Self::builder(api_key, index_host).build()
    }

    /// Starts building a client for `index_host`.
    pub fn builder(api_key: impl Into<String>, index_host: impl Into<String>) -> Builder {
        Builder::new(api_key, index_host)
    }

    /// Returns a client scoped to `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let config = Arc::make_mut(&mut self.inner);
        config.namespace = Some(namespace.into());
        self
    }

    pub(crate) fn config(&self) -> Arc<Config> {
        self.inner.clone()
    }
}

/// Builder for [`Pinecone`].
#[derive(Debug)]
pub struct Builder {
    api_key: String,
    index_host: String,
    namespace: Option<String>,
    dimension: Option<usize>,
    request_timeout: Duration,
}

impl Builder {
    fn new(api_key: impl Into<String>, index_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_host: index_host.into(),
            namespace: None,
            dimension: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Scopes every upsert and query to `namespace`.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Declares the index dimension so mismatched vectors are rejected
    /// before a request is sent.
    #[must_use]
    pub const fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    #[must_use]
    pub fn build(self) -> Pinecone {
        Pinecone {
            inner: Arc::new(Config {
                http: reqwest::Client::new(),
                api_key: self.api_key,
                index_host: normalize_host(&self.index_host),
                namespace: self.namespace,
                dimension: self.dimension,
                request_timeout: self.request_timeout,
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) index_host: String,
    pub(crate) namespace: Option<String>,
    pub(crate) dimension: Option<usize>,
    pub(crate) request_timeout: Duration,
}

impl Config {
    pub(crate) fn request_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.index_host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn normalize_host(host: &str) -> String {
    let trimmed = host.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.trim_end_matches('/').to_owned()
    } else {
        format!("https://{}", trimmed.trim_end_matches('/'))
    }
}
