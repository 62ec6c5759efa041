//! Effects produced by state transitions

use super::event::Event;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a plain text reply
    Reply(String),

    /// Show the model selection menu
    ShowModelMenu,

    /// Drop the user's transcript
    ResetSession,

    /// Run the full exchange for one message: placeholder, API call,
    /// paginated delivery
    RunExchange { text: String },

    /// Feed an event back through the machine once the current effects ran
    Reprocess(Event),
}
