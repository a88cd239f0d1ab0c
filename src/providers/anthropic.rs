use super::traits::{CompletionClient, GenerationParams};
use crate::dialogue::turn::{Role, Turn};
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_API_ERROR_CHARS: usize = 200;

/// Production `CompletionClient` backed by the Anthropic Messages API.
///
/// The model name and credentials are fixed at construction; a missing key
/// fails at call time with a clear message, not at construction, so the CLI
/// can start and explain itself.
pub struct AnthropicClient {
    api_key: Option<String>,
    model: String,
    messages_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<WireBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicClient {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self::with_base_url(api_key, model, None)
    }

    /// `base_url` override exists for tests that point the client at a local
    /// mock server.
    pub fn with_base_url(api_key: Option<&str>, model: &str, base_url: Option<&str>) -> Self {
        let base = base_url
            .map_or("https://api.anthropic.com", |u| u.trim_end_matches('/'))
            .to_string();
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string),
            model: model.to_string(),
            messages_url: format!("{base}/v1/messages"),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_messages<'a>(turns: &'a [Turn]) -> Vec<WireMessage<'a>> {
        turns
            .iter()
            .map(|turn| WireMessage {
                role: match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: &turn.text,
            })
            .collect()
    }

    fn extract_text(response: MessagesResponse) -> Result<String, ProviderError> {
        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                WireBlock::Text { text } => Some(text),
                WireBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            Err(ProviderError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// Map a failed HTTP response to a typed provider error, with the body
/// truncated so a verbose upstream error never floods the conversation.
fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = truncate_error_body(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(message),
        _ => ProviderError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn truncate_error_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_API_ERROR_CHARS {
        return body.to_string();
    }
    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(
        &self,
        instruction: &str,
        turns: &[Turn],
        params: GenerationParams,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::NoApiKey(
                "set ANTHROPIC_API_KEY or add api_key to the config file".to_string(),
            )
        })?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            system: instruction,
            messages: Self::build_messages(turns),
            temperature: params.temperature,
        };

        let response = self
            .client
            .post(&self.messages_url)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .header("x-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: MessagesResponse = response.json().await?;
        Self::extract_text(parsed)
    }
}
