//! Centralized model catalog.
//!
//! Every selectable model lives here with its wire name, menu label, and
//! access tier. Adding a model means adding a row; the menu, the selection
//! callbacks, and the access checks all read from this table.

/// What the model produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Chat completions over the full conversation history
    Chat,
    /// Image generation from the latest message alone
    Image,
}

/// Access tier gating who may select a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Anyone the bot talks to
    Open,
    /// GPT-4 class, guarded by its own allow-list
    Gpt4,
    /// Image generation allow-list
    Image,
    /// Granted individually
    Restricted,
}

/// Model definition with metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDef {
    /// Stable ID used in menu callbacks and configuration
    pub id: &'static str,
    /// Name the API expects on the wire
    pub api_name: &'static str,
    /// Human-readable menu label
    pub title: &'static str,
    pub kind: ModelKind,
    pub tier: Tier,
}

/// Get all selectable model definitions
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "gpt-3.5-turbo",
            api_name: "gpt-3.5-turbo",
            title: "GPT-3.5 Turbo",
            kind: ModelKind::Chat,
            tier: Tier::Open,
        },
        ModelDef {
            id: "gpt-4",
            api_name: "gpt-4",
            title: "GPT-4",
            kind: ModelKind::Chat,
            tier: Tier::Gpt4,
        },
        ModelDef {
            id: "gpt-4-32k",
            api_name: "gpt-4-32k",
            title: "GPT-4 32k",
            kind: ModelKind::Chat,
            tier: Tier::Restricted,
        },
        ModelDef {
            id: "dall-e-3",
            api_name: "dall-e-3",
            title: "DALL-E 3",
            kind: ModelKind::Image,
            tier: Tier::Image,
        },
    ]
}

/// Look up a model by its stable ID
pub fn find_model(id: &str) -> Option<&'static ModelDef> {
    all_models().iter().find(|m| m.id == id)
}

/// The model every fresh session starts on
pub fn default_model() -> &'static ModelDef {
    &all_models()[0]
}
