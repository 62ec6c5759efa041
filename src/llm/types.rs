//! Shared types for the completion pipeline.
//!
//! [`Turn`] doubles as the wire message format: the chat endpoint takes
//! `{role, content}` objects with lowercase role names, which is exactly
//! what the serde derives produce.

use serde::{Deserialize, Serialize};

/// Who authored a turn of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation, oldest first in a history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Token accounting reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Result of a chat completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Candidate replies in the order the API returned them
    pub candidates: Vec<String>,
    pub usage: Usage,
}

impl ChatCompletion {
    /// The candidate that becomes the assistant's turn, if any came back.
    pub fn first(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }
}

/// Result of an image generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Short-lived URL hosted by the API
    pub url: String,
}
