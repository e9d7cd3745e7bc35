use crate::client::{Config, OpenRouter};
use quern_core::{ChatModel, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

impl ChatModel for OpenRouter {
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl core::future::Future<Output = Result<String>> + Send {
        let cfg = self.config();
        let system = system.to_owned();
        let user = user.to_owned();
        async move { generate_once(cfg, system, user).await }
    }
}

async fn generate_once(cfg: Arc<Config>, system: String, user: String) -> Result<String> {
    let endpoint = cfg.request_url("/chat/completions");
    let request = ChatCompletionRequest {
        model: &cfg.chat_model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &system,
            },
            ChatMessage {
                role: "user",
                content: &user,
            },
        ],
    };
    tracing::debug!(model = %cfg.chat_model, endpoint = %endpoint, "sending chat completion request");

    let response = cfg
        .http
        .post(&endpoint)
        .header("Authorization", cfg.request_auth())
        .json(&request)
        .timeout(cfg.request_timeout)
        .send()
        .await
        .map_err(|err| {
            if err.is_timeout() {
                Error::UpstreamTimeout {
                    timeout: cfg.request_timeout,
                }
            } else {
                Error::UpstreamHttp {
                    status: 0,
                    message: err.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "chat completion request rejected");
        return Err(Error::UpstreamHttp {
            status: status.as_u16(),
            message,
        });
    }

    let payload: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|err| Error::MalformedResponse(err.to_string()))?;
    payload
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| Error::MalformedResponse("chat completion response has no choices".into()))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
