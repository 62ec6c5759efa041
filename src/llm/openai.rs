//! `OpenAI` API client for chat completions and image generation.

use super::error::{ApiError, ApiErrorKind};
use super::models::ModelDef;
use super::types::{ChatCompletion, GeneratedImage, Turn, Usage};
use super::CompletionService;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` client speaking the chat completions and image generation
/// endpoints.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Completion requests can run long; no client-side timeout is set, so
    /// slow generations land instead of being cut off.
    pub fn new(api_key: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// POST `payload` and return the response body of a successful call.
    ///
    /// Transport failures, non-success statuses, and unreadable bodies all
    /// come back as classified [`ApiError`]s with the raw diagnostic in the
    /// message.
    async fn post<P: Serialize + Sync>(&self, path: &str, payload: &P) -> Result<String, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::network(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    ApiError::network(format!("connection failed: {e}"))
                } else {
                    ApiError::network(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }
        Ok(body)
    }
}

/// Map a non-success HTTP status to an error class, keeping the status line
/// and body as the diagnostic.
fn classify_status(status: reqwest::StatusCode, body: &str) -> ApiError {
    let code = status.as_u16();
    let kind = match code {
        401 | 403 => ApiErrorKind::Auth,
        429 => ApiErrorKind::RateLimit,
        400..=499 => ApiErrorKind::InvalidRequest,
        500..=599 => ApiErrorKind::ServerError,
        _ => ApiErrorKind::Unknown,
    };
    ApiError::new(kind, format!("HTTP {code}: {body}")).with_status(code)
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        model: &ModelDef,
        history: &[Turn],
    ) -> Result<ChatCompletion, ApiError> {
        let request = ChatRequest {
            model: model.api_name,
            messages: history,
        };
        let body = self.post("/chat/completions", &request).await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::malformed(format!("unexpected completion payload: {e}")))?;
        Ok(ChatCompletion {
            candidates: parsed
                .choices
                .into_iter()
                .map(|c| c.message.content)
                .collect(),
            usage: Usage {
                prompt_tokens: parsed.usage.prompt_tokens,
                completion_tokens: parsed.usage.completion_tokens,
            },
        })
    }

    async fn generate_image(
        &self,
        model: &ModelDef,
        prompt: &str,
    ) -> Result<GeneratedImage, ApiError> {
        let request = ImageRequest {
            model: model.api_name,
            prompt,
            n: 1,
            size: "1024x1024",
        };
        let body = self.post("/images/generations", &request).await?;
        let parsed: ImageResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::malformed(format!("unexpected image payload: {e}")))?;
        let entry = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::malformed("image response carried no entries"))?;
        Ok(GeneratedImage { url: entry.url })
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    url: String,
}
