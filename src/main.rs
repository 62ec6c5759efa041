//! sa-gpt-bot - Telegram relay to `OpenAI` chat and image models
//!
//! A Telegram bot driving a per-user conversation state machine over
//! the `OpenAI` completion API.

mod config;
mod dialog;
mod llm;
mod markup;
mod pagination;
mod phrases;
mod session;
mod state_machine;
mod telegram;

use std::sync::Arc;

use config::Config;
use dialog::DialogController;
use llm::{AllowlistPolicy, LoggingClient, ModelCatalog, OpenAiClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sa_gpt_bot=info,teloxide=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env()?;

    let policy = AllowlistPolicy::new(
        config.gpt4_users,
        config.image_users,
        config.restricted_users,
    );
    let catalog = ModelCatalog::new(Box::new(policy), config.default_model.as_deref());
    tracing::info!(
        default_model = %catalog.default_model().id,
        allowed_users = config.allowed_users.len(),
        "model catalog initialized"
    );

    let client = LoggingClient::new(Arc::new(OpenAiClient::new(config.api_token)?));
    let controller = DialogController::new(client, catalog);

    telegram::run_bot(config.bot_token, config.allowed_users, controller).await;

    Ok(())
}
