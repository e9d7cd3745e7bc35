//! Transport-free request routing.

use crate::http::{HttpRequest, HttpResponse};
use quern_core::{ChatModel, EmbeddingModel, VectorStore};
use quern_rag::{ChatOutcome, Error, QueryPipeline};
use serde::Deserialize;

/// Body accepted by `POST /chat`.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// Consistent JSON error body for transport-level rejections.
pub(crate) fn json_error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::json(status, &serde_json::json!({ "error": message }))
}

/// Routes one parsed request to its handler.
pub(crate) async fn route<M, S, G>(
    request: &HttpRequest,
    pipeline: &QueryPipeline<M, S, G>,
) -> HttpResponse
where
    M: EmbeddingModel,
    S: VectorStore,
    G: ChatModel,
{
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/") => HttpResponse::json(
            200,
            &serde_json::json!({ "status": "ok", "message": "quern API is running" }),
        ),
        ("GET", "/health") => {
            HttpResponse::json(200, &serde_json::json!({ "status": "healthy" }))
        }
        ("POST", "/chat") => handle_chat(request, pipeline).await,
        _ => json_error(404, "not found"),
    }
}

/// Handles `POST /chat`.
///
/// Pipeline failures are part of the contract, not transport errors: the
/// response is still 200 with the error descriptor in the body. Only a body
/// that does not parse as a chat request is rejected with 400.
async fn handle_chat<M, S, G>(
    request: &HttpRequest,
    pipeline: &QueryPipeline<M, S, G>,
) -> HttpResponse
where
    M: EmbeddingModel,
    S: VectorStore,
    G: ChatModel,
{
    let parsed: ChatRequest = match serde_json::from_slice(&request.body) {
        Ok(parsed) => parsed,
        Err(err) => {
            let outcome =
                ChatOutcome::failure(&Error::InvalidInput(format!("invalid chat request: {err}")));
            return HttpResponse::json(400, &outcome);
        }
    };

    HttpResponse::json(200, &pipeline.answer(&parsed.message).await)
}
