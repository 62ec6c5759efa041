//! Trait abstraction over the chat transport
//!
//! The controller drives every conversation through this seam, so the whole
//! dialog flow can run against a recording fake in tests.

use async_trait::async_trait;
use thiserror::Error;

/// Failure delivering, editing, or deleting an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SendError(pub String);

/// Handle to a message the bot sent, usable for later edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef(pub i32);

/// Outbound side of one chat
#[async_trait]
pub trait Responder: Send + Sync {
    /// Send plain text
    async fn send_text(&self, text: &str) -> Result<MessageRef, SendError>;

    /// Send HTML-formatted text
    async fn send_html(&self, html: &str) -> Result<MessageRef, SendError>;

    /// Rewrite an already sent message with HTML-formatted text
    async fn edit_html(&self, message: MessageRef, html: &str) -> Result<(), SendError>;

    /// Delete a sent message
    async fn delete_message(&self, message: MessageRef) -> Result<(), SendError>;

    /// Send a photo by URL with a caption; the transport fetches the bytes
    /// itself
    async fn send_photo_url(&self, url: &str, caption: &str) -> Result<(), SendError>;

    /// Show the model menu with `selected` marked
    async fn send_model_menu(&self, selected: &str) -> Result<(), SendError>;
}
