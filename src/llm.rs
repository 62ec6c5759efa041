//! Completion provider abstraction.
//!
//! A common interface over the chat and image endpoints, plus the model
//! catalog and the access rules deciding who may select what.

mod access;
mod error;
mod models;
mod openai;
mod registry;
mod types;

pub use access::{AccessDenied, AllowlistPolicy};
pub use error::{ApiError, ApiErrorKind};
pub use models::{all_models, find_model, ModelDef, ModelKind};
pub use openai::OpenAiClient;
pub use registry::{ModelCatalog, SelectError};
pub use types::{ChatCompletion, GeneratedImage, Turn, Usage};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface to the completion API
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run a chat completion over the whole conversation history
    async fn complete(
        &self,
        model: &ModelDef,
        history: &[Turn],
    ) -> Result<ChatCompletion, ApiError>;

    /// Generate an image from a single prompt
    async fn generate_image(
        &self,
        model: &ModelDef,
        prompt: &str,
    ) -> Result<GeneratedImage, ApiError>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Arc<T> {
    async fn complete(
        &self,
        model: &ModelDef,
        history: &[Turn],
    ) -> Result<ChatCompletion, ApiError> {
        (**self).complete(model, history).await
    }

    async fn generate_image(
        &self,
        model: &ModelDef,
        prompt: &str,
    ) -> Result<GeneratedImage, ApiError> {
        (**self).generate_image(model, prompt).await
    }
}

/// Logging wrapper for completion services
pub struct LoggingClient {
    inner: Arc<dyn CompletionService>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CompletionService for LoggingClient {
    async fn complete(
        &self,
        model: &ModelDef,
        history: &[Turn],
    ) -> Result<ChatCompletion, ApiError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(model, history).await;
        let duration = start.elapsed();

        match &result {
            Ok(completion) => {
                tracing::info!(
                    model = %model.id,
                    duration_ms = %duration.as_millis(),
                    turns = history.len(),
                    prompt_tokens = completion.usage.prompt_tokens,
                    completion_tokens = completion.usage.completion_tokens,
                    "completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %model.id,
                    duration_ms = %duration.as_millis(),
                    status = e.status,
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "completion request failed"
                );
            }
        }

        result
    }

    async fn generate_image(
        &self,
        model: &ModelDef,
        prompt: &str,
    ) -> Result<GeneratedImage, ApiError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate_image(model, prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    model = %model.id,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = prompt.chars().count(),
                    "image request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %model.id,
                    duration_ms = %duration.as_millis(),
                    status = e.status,
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "image request failed"
                );
            }
        }

        result
    }
}
