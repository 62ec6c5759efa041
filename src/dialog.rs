//! Dialog orchestration
//!
//! Connects the pure state machine to the transport and the completion
//! API: one [`DialogController`] serves every user, executing effects
//! against a per-chat [`Responder`].

mod controller;
mod traits;


pub use controller::{DialogController, PickOutcome};
pub use traits::{MessageRef, Responder, SendError};

use crate::llm::LoggingClient;

/// Type alias for the production controller wiring
pub type ProductionController = DialogController<LoggingClient>;
