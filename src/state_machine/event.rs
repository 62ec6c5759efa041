//! Events that drive a user's dialog

/// Commands a user can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: greet and point at the dialog command
    Start,
    /// `/help`: describe what the bot can do
    Help,
    /// `/gpt`: open a dialog
    BeginDialog,
    /// `/clear`: drop the transcript and go idle
    Clear,
    /// `/set_model`: show the model selection menu
    ChooseModel,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    /// Free-form message text
    Text { text: String },
}
