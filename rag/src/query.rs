//! Grounded query pipeline.

use crate::config::QueryConfig;
use crate::prompt::PromptTemplate;
use crate::retry::with_retry;
use crate::types::{ChatExchange, ChatOutcome};
use quern_core::{ChatModel, EmbeddingModel, Error, Result, VectorStore};
use std::fmt;

/// Query pipeline: embed the question, retrieve the nearest chunks,
/// assemble a grounded prompt, and generate a reply.
///
/// The pipeline holds no per-question state; consecutive questions are
/// independent. One question triggers exactly one embedding call and one
/// retrieval, and at most `1 + max_retries` generate calls.
pub struct QueryPipeline<M, S, G> {
    embedder: M,
    store: S,
    model: G,
    template: PromptTemplate,
    config: QueryConfig,
}

impl<M, S, G> fmt::Debug for QueryPipeline<M, S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M, S, G> QueryPipeline<M, S, G>
where
    M: EmbeddingModel,
    S: VectorStore,
    G: ChatModel,
{
    /// Creates a pipeline with the default template and configuration.
    ///
    /// The embedder must be the same model family the index was built with;
    /// retrieval quality collapses otherwise, and a differing dimension
    /// fails the store query outright.
    pub fn new(embedder: M, store: S, model: G) -> Self {
        Self {
            embedder,
            store,
            model,
            template: PromptTemplate::default(),
            config: QueryConfig::default(),
        }
    }

    /// Replaces the prompt template.
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Replaces the pipeline configuration.
    #[must_use]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Runs the full pipeline once, propagating the first stage error.
    ///
    /// Retrieval finding nothing is not an error: the prompt is assembled
    /// with an empty context section and generation proceeds.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage; the generate stage is
    /// retried per [`QueryConfig::retry`] before giving up.
    pub async fn run(&self, question: &str) -> Result<ChatExchange> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidInput("question must not be empty".into()));
        }

        let vector = self.embedder.embed(question).await?;
        let matches = self
            .store
            .query(&vector, self.config.top_k, true)
            .await?;
        let context: Vec<String> = matches
            .iter()
            .filter_map(|matched| matched.text().map(str::to_owned))
            .collect();
        if context.is_empty() {
            tracing::debug!("retrieval found no context, answering ungrounded");
        }

        let prompt = self.template.assemble(&context, question);
        let reply = with_retry(&self.config.retry, || {
            self.model.generate(self.template.system(), &prompt)
        })
        .await?;

        Ok(ChatExchange {
            question: question.to_owned(),
            context,
            prompt,
            reply,
        })
    }

    /// Answers a question within the configured budget, never failing.
    ///
    /// Stage errors and budget overruns are folded into a
    /// [`ChatOutcome`] carrying the error's stable descriptor, so callers
    /// always get a well-formed outcome to put on the wire.
    pub async fn answer(&self, question: &str) -> ChatOutcome {
        let budget = self.config.budget;
        match tokio::time::timeout(budget, self.run(question)).await {
            Ok(Ok(exchange)) => ChatOutcome::success(exchange.reply),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "chat pipeline failed");
                ChatOutcome::failure(&err)
            }
            Err(_) => {
                let err = Error::UpstreamTimeout { timeout: budget };
                tracing::warn!(budget_ms = budget.as_millis(), "chat request exceeded budget");
                ChatOutcome::failure(&err)
            }
        }
    }
}
