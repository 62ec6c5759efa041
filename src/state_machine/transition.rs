//! Pure state transition function

use super::{Command, DialogState, Effect, Event};
use crate::phrases;

/// Result of a state transition
#[derive(Debug, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: DialogState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: DialogState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function: the same state and event always produce the
/// same result, with no I/O.
pub fn transition(state: DialogState, event: Event) -> TransitionResult {
    match (state, event) {
        // ============================================================
        // Commands; all work from both states
        // ============================================================
        (state, Event::Command(Command::Start)) => TransitionResult::new(state)
            .with_effect(Effect::Reply(phrases::GREETING.to_string())),

        (state, Event::Command(Command::Help)) => {
            TransitionResult::new(state).with_effect(Effect::Reply(phrases::HELP.to_string()))
        }

        (_, Event::Command(Command::BeginDialog)) => TransitionResult::new(DialogState::Active)
            .with_effect(Effect::Reply(phrases::DIALOG_PROMPT.to_string())),

        // Reset comes before the confirmation so the transcript is already
        // gone when the user reads it.
        (_, Event::Command(Command::Clear)) => TransitionResult::new(DialogState::Idle)
            .with_effect(Effect::ResetSession)
            .with_effect(Effect::Reply(phrases::CONTEXT_CLEARED.to_string())),

        (state, Event::Command(Command::ChooseModel)) => {
            TransitionResult::new(state).with_effect(Effect::ShowModelMenu)
        }

        // ============================================================
        // Free text
        // ============================================================
        (DialogState::Active, Event::Text { text }) => {
            TransitionResult::new(DialogState::Active).with_effect(Effect::RunExchange { text })
        }

        // Text without a dialog: correct the state, apologize first, then
        // run the message as if it had arrived in the active state.
        (DialogState::Idle, Event::Text { text }) => TransitionResult::new(DialogState::Active)
            .with_effect(Effect::Reply(phrases::LOST_CONTEXT.to_string()))
            .with_effect(Effect::Reprocess(Event::Text { text })),
    }
}
