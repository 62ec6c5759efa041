//! Core dialog state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! [`transition`] maps a state and an event to a new state plus a list of
//! effects, and the dialog controller executes the effects.

mod effect;
mod event;
mod state;
mod transition;


pub use effect::Effect;
pub use event::{Command, Event};
pub use state::DialogState;
pub use transition::transition;
