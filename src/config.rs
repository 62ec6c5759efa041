//! Process configuration pulled from the environment.

use std::collections::HashSet;
use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Everything the process reads from the environment, collected up front.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram Bot API token
    pub bot_token: String,
    /// Completion API token
    pub api_token: String,
    /// Model fresh sessions start on; `None` keeps the catalog default
    pub default_model: Option<String>,
    /// Users the bot talks to at all; empty means everyone
    pub allowed_users: HashSet<u64>,
    /// Users cleared for GPT-4 class models
    pub gpt4_users: HashSet<u64>,
    /// Users cleared for image generation
    pub image_users: HashSet<u64>,
    /// Users cleared for individually granted models
    pub restricted_users: HashSet<u64>,
}

impl Config {
    /// Reads the full configuration. Only the two tokens are mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: require("SA_BOT_API_TOKEN")?,
            api_token: require("OPENAI_API_TOKEN")?,
            default_model: env::var("SA_BOT_DEFAULT_MODEL").ok(),
            allowed_users: user_ids(&env::var("SA_BOT_ALLOWED_USERS").unwrap_or_default()),
            gpt4_users: user_ids(&env::var("SA_BOT_GPT4_USERS").unwrap_or_default()),
            image_users: user_ids(&env::var("SA_BOT_IMAGE_USERS").unwrap_or_default()),
            restricted_users: user_ids(&env::var("SA_BOT_RESTRICTED_USERS").unwrap_or_default()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Parses a comma-separated user ID list; malformed entries are skipped.
fn user_ids(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}
