//! Per-user conversation sessions.

use crate::llm::{ModelDef, Turn};
use crate::state_machine::DialogState;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// One user's conversation: dialog state, transcript, and the model
/// answering it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Conversation ID for log correlation; a reset starts a new one
    pub id: Uuid,
    pub state: DialogState,
    /// Transcript oldest first, exactly as sent to the API
    pub history: Vec<Turn>,
    pub model: &'static ModelDef,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(model: &'static ModelDef) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DialogState::default(),
            history: Vec::new(),
            model,
            created_at: Utc::now(),
        }
    }

    /// Drop the transcript and start a fresh conversation. The selected
    /// model survives the reset; it is a preference, not context.
    pub fn reset(&mut self) {
        *self = Self::new(self.model);
    }
}

/// Sessions keyed by Telegram user ID.
///
/// The outer lock guards the map shape only. Each session carries its own
/// lock, so an exchange in flight for one user never blocks another user,
/// while a second message from the same user waits until the first exchange
/// finishes.
pub struct SessionStore {
    sessions: RwLock<HashMap<u64, Arc<Mutex<Session>>>>,
    default_model: &'static ModelDef,
}

impl SessionStore {
    pub fn new(default_model: &'static ModelDef) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_model,
        }
    }

    /// Get the user's session, creating a fresh idle one on first contact.
    pub async fn get_or_create(&self, user_id: u64) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_insert_with(|| {
            let session = Session::new(self.default_model);
            tracing::debug!(user_id, session_id = %session.id, "created session");
            Arc::new(Mutex::new(session))
        });
        Arc::clone(session)
    }
}
