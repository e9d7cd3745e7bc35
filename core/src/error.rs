//! Shared error taxonomy for pipelines and providers.

use core::time::Duration;
use thiserror::Error;

/// Result type used throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by embedding, generation, and vector-store operations.
///
/// Every variant maps to a stable wire descriptor via [`Error::descriptor`],
/// and [`Error::is_transient`] tells callers whether retrying the failed call
/// could plausibly succeed.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected before anything was sent upstream.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The embedding backend could not produce a vector.
    #[error("embedding model unavailable: {0}")]
    EmbeddingUnavailable(#[source] anyhow::Error),

    /// The vector index could not serve the request.
    #[error("vector index unavailable: {0}")]
    IndexUnavailable(#[source] anyhow::Error),

    /// A vector's length does not match the index dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Dimension the index was created with.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// An upstream call exceeded its deadline.
    #[error("upstream request timed out after {timeout:?}")]
    UpstreamTimeout {
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// An upstream service answered with a non-success status.
    ///
    /// `status` is `0` when the request never produced an HTTP response
    /// (connection refused, DNS failure, broken transport).
    #[error("upstream returned HTTP {status}: {message}")]
    UpstreamHttp {
        /// HTTP status code, or `0` for transport-level failures.
        status: u16,
        /// Response body or transport error detail.
        message: String,
    },

    /// An upstream payload decoded, but was missing expected fields.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Stable machine-readable name for this error class.
    ///
    /// Descriptors are part of the service's wire contract: the chat endpoint
    /// reports them verbatim in its `error` field, so they never carry request
    /// detail and never change between releases.
    #[must_use]
    pub const fn descriptor(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "InvalidInput",
            Self::EmbeddingUnavailable(_) => "EmbeddingUnavailable",
            Self::IndexUnavailable(_) => "IndexUnavailable",
            Self::InvalidDimension { .. } => "InvalidDimension",
            Self::UpstreamTimeout { .. } => "UpstreamTimeout",
            Self::UpstreamHttp { .. } => "UpstreamHTTPError",
            Self::MalformedResponse(_) => "MalformedResponse",
        }
    }

    /// Whether retrying the failed call could plausibly succeed.
    ///
    /// Transient failures are unreachable backends, deadline overruns, and
    /// HTTP 429/5xx answers. Input and contract violations are permanent.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::EmbeddingUnavailable(_)
            | Self::IndexUnavailable(_)
            | Self::UpstreamTimeout { .. } => true,
            Self::UpstreamHttp { status, .. } => {
                *status == 0 || *status == 429 || *status >= 500
            }
            Self::InvalidInput(_)
            | Self::InvalidDimension { .. }
            | Self::MalformedResponse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_stable() {
        let cases = [
            (Error::InvalidInput("empty".into()), "InvalidInput"),
            (
                Error::EmbeddingUnavailable(anyhow::anyhow!("down")),
                "EmbeddingUnavailable",
            ),
            (
                Error::IndexUnavailable(anyhow::anyhow!("down")),
                "IndexUnavailable",
            ),
            (
                Error::InvalidDimension {
                    expected: 1536,
                    actual: 3,
                },
                "InvalidDimension",
            ),
            (
                Error::UpstreamTimeout {
                    timeout: Duration::from_secs(10),
                },
                "UpstreamTimeout",
            ),
            (
                Error::UpstreamHttp {
                    status: 503,
                    message: "overloaded".into(),
                },
                "UpstreamHTTPError",
            ),
            (
                Error::MalformedResponse("no choices".into()),
                "MalformedResponse",
            ),
        ];

        for (error, descriptor) in cases {
            assert_eq!(error.descriptor(), descriptor);
        }
    }

    #[test]
    fn transport_and_server_failures_are_transient() {
        assert!(Error::EmbeddingUnavailable(anyhow::anyhow!("refused")).is_transient());
        assert!(Error::IndexUnavailable(anyhow::anyhow!("refused")).is_transient());
        assert!(
            Error::UpstreamTimeout {
                timeout: Duration::from_secs(30)
            }
            .is_transient()
        );
        assert!(
            Error::UpstreamHttp {
                status: 0,
                message: "connection refused".into()
            }
            .is_transient()
        );
        assert!(
            Error::UpstreamHttp {
                status: 429,
                message: "rate limited".into()
            }
            .is_transient()
        );
        assert!(
            Error::UpstreamHttp {
                status: 500,
                message: "server error".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn caller_mistakes_are_permanent() {
        assert!(!Error::InvalidInput("empty".into()).is_transient());
        assert!(
            !Error::InvalidDimension {
                expected: 1536,
                actual: 3
            }
            .is_transient()
        );
        assert!(!Error::MalformedResponse("no choices".into()).is_transient());
        assert!(
            !Error::UpstreamHttp {
                status: 401,
                message: "bad key".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn display_includes_detail() {
        let error = Error::InvalidDimension {
            expected: 1536,
            actual: 3,
        };
        assert_eq!(error.to_string(), "dimension mismatch: expected 1536, got 3");

        let error = Error::UpstreamHttp {
            status: 503,
            message: "overloaded".into(),
        };
        assert_eq!(
            error.to_string(),
            "upstream returned HTTP 503: overloaded"
        );
    }
}
