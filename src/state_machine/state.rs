//! Dialog state types

/// Where a user's dialog stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No dialog running; free text earns a nudge and a state correction
    #[default]
    Idle,
    /// Dialog running; free text goes to the completion API
    Active,
}
