//! Configuration for the query pipeline.

use crate::retry::RetryConfig;
use std::time::Duration;

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Default wall-clock budget for answering one question.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(10);

/// Tunables for one [`QueryPipeline`](crate::QueryPipeline).
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Number of nearest chunks to retrieve.
    pub top_k: usize,
    /// Wall-clock budget for the whole embed-retrieve-generate sequence.
    pub budget: Duration,
    /// Retry policy for the generate stage.
    pub retry: RetryConfig,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            budget: DEFAULT_BUDGET,
            retry: RetryConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::new()
    }
}

/// Builder for [`QueryConfig`].
#[derive(Debug, Default)]
pub struct QueryConfigBuilder {
    config: QueryConfig,
}

impl QueryConfigBuilder {
    /// Creates a builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: QueryConfig::default(),
        }
    }

    /// Sets the number of chunks retrieved per question.
    #[must_use]
    pub const fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Sets the wall-clock budget for one question.
    #[must_use]
    pub const fn budget(mut self, budget: Duration) -> Self {
        self.config.budget = budget;
        self
    }

    /// Sets the retry policy for the generate stage.
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> QueryConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QueryConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.budget, Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn builder_config() {
        let config = QueryConfig::builder()
            .top_k(5)
            .budget(Duration::from_secs(2))
            .retry(RetryConfig::none())
            .build();

        assert_eq!(config.top_k, 5);
        assert_eq!(config.budget, Duration::from_secs(2));
        assert_eq!(config.retry.max_retries, 0);
    }
}
