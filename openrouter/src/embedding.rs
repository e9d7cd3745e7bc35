use crate::client::{Config, OpenRouter};
use quern_core::{EmbeddingModel, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

impl EmbeddingModel for OpenRouter {
    fn dim(&self) -> usize {
        self.config().embedding_dimensions
    }

    fn embed(&self, text: &str) -> impl core::future::Future<Output = Result<Vec<f32>>> + Send {
        let cfg = self.config();
        let input = text.to_owned();
        async move { embed_once(cfg, input).await }
    }
}

async fn embed_once(cfg: Arc<Config>, input: String) -> Result<Vec<f32>> {
    let endpoint = cfg.request_url("/embeddings");
    let request = EmbeddingRequest {
        model: &cfg.embedding_model,
        input: &input,
    };
    tracing::debug!(model = %cfg.embedding_model, endpoint = %endpoint, "sending embedding request");

    let response = cfg
        .http
        .post(&endpoint)
        .header("Authorization", cfg.request_auth())
        .json(&request)
        .timeout(cfg.request_timeout)
        .send()
        .await
        .map_err(|err| Error::EmbeddingUnavailable(err.into()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::EmbeddingUnavailable(anyhow::anyhow!(
            "HTTP {status}: {message}"
        )));
    }

    let payload: EmbeddingResponse = response
        .json()
        .await
        .map_err(|err| Error::MalformedResponse(err.to_string()))?;
    let vector = payload
        .data
        .into_iter()
        .next()
        .map(|item| item.embedding)
        .ok_or_else(|| Error::MalformedResponse("embedding response missing vector data".into()))?;

    if vector.len() != cfg.embedding_dimensions {
        return Err(Error::MalformedResponse(format!(
            "embedding has {} dimensions, expected {}",
            vector.len(),
            cfg.embedding_dimensions
        )));
    }
    Ok(vector)
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
