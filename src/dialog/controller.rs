//! Dialog controller: drives the state machine and executes its effects
//!
//! Events come in from the transport, go through the pure [`transition`]
//! function, and the resulting effects are executed here in order. All
//! transport and completion I/O lives in this module; the transitions
//! stay side-effect free.

use crate::llm::{CompletionService, ModelCatalog, ModelDef, ModelKind, SelectError, Turn};
use crate::markup;
use crate::pagination::{paginate, PAGE_LIMIT};
use crate::phrases;
use crate::session::{Session, SessionStore};
use crate::state_machine::{transition, Effect, Event};

use super::traits::{MessageRef, Responder, SendError};

/// Outcome of a model pick from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick went through; the menu should redraw with the new mark
    Applied(&'static ModelDef),
    /// The pick was refused with a user-facing reason
    Refused(&'static str),
}

/// Orchestrates dialogs end to end: events in, transport and API calls out.
///
/// One controller serves every user; sessions are looked up per event and
/// locked for the duration of its processing.
pub struct DialogController<C: CompletionService> {
    client: C,
    sessions: SessionStore,
    catalog: ModelCatalog,
}

impl<C: CompletionService> DialogController<C> {
    pub fn new(client: C, catalog: ModelCatalog) -> Self {
        let sessions = SessionStore::new(catalog.default_model());
        Self {
            client,
            sessions,
            catalog,
        }
    }

    /// Run one event for `user_id`, executing every effect before returning.
    ///
    /// The session stays locked for the whole call: a second message from
    /// the same user waits for the first to finish, other users are not
    /// affected.
    pub async fn process<R: Responder>(
        &self,
        user_id: u64,
        event: Event,
        responder: &R,
    ) -> Result<(), SendError> {
        let session = self.sessions.get_or_create(user_id).await;
        let mut session = session.lock().await;

        // Effects can feed events back in (the lost-context replay), so
        // drive a queue instead of recursing.
        let mut events = vec![event];
        while let Some(current) = events.pop() {
            let result = transition(session.state, current);
            session.state = result.new_state;

            for effect in result.effects {
                if let Some(generated) = self
                    .execute_effect(&mut session, effect, responder)
                    .await?
                {
                    events.push(generated);
                }
            }
        }
        Ok(())
    }

    /// Apply a model pick coming from the menu callback.
    pub async fn apply_model_pick(&self, user_id: u64, model_id: &str) -> PickOutcome {
        match self.catalog.select(user_id, model_id) {
            Ok(model) => {
                let session = self.sessions.get_or_create(user_id).await;
                let mut session = session.lock().await;
                session.model = model;
                tracing::info!(user_id, model = %model.id, "model selected");
                PickOutcome::Applied(model)
            }
            Err(SelectError::Unknown) => PickOutcome::Refused(phrases::UNKNOWN_MODEL),
            Err(SelectError::Denied(denied)) => PickOutcome::Refused(phrases::denial(denied)),
        }
    }

    async fn execute_effect<R: Responder>(
        &self,
        session: &mut Session,
        effect: Effect,
        responder: &R,
    ) -> Result<Option<Event>, SendError> {
        match effect {
            Effect::Reply(text) => {
                responder.send_text(&text).await?;
                Ok(None)
            }
            Effect::ShowModelMenu => {
                responder.send_model_menu(session.model.id).await?;
                Ok(None)
            }
            Effect::ResetSession => {
                let age_s = (chrono::Utc::now() - session.created_at).num_seconds();
                tracing::info!(
                    session_id = %session.id,
                    turns = session.history.len(),
                    age_s,
                    "session reset"
                );
                session.reset();
                Ok(None)
            }
            Effect::RunExchange { text } => {
                self.run_exchange(session, &text, responder).await?;
                Ok(None)
            }
            Effect::Reprocess(event) => Ok(Some(event)),
        }
    }

    /// One full exchange: placeholder first, then the model call, then
    /// paginated delivery over the placeholder.
    async fn run_exchange<R: Responder>(
        &self,
        session: &mut Session,
        text: &str,
        responder: &R,
    ) -> Result<(), SendError> {
        let placeholder = responder.send_text(phrases::THINKING).await?;

        if session.model.kind == ModelKind::Image {
            return self
                .run_image_exchange(session, text, placeholder, responder)
                .await;
        }

        let reply = if let Some(instruction) = strip_system_marker(text) {
            // A system instruction goes straight into the transcript; the
            // model is not called until the next regular message.
            session.history.push(Turn::system(instruction));
            tracing::info!(session_id = %session.id, "system instruction stored");
            phrases::system_ack(instruction)
        } else {
            session.history.push(Turn::user(text));
            self.request_completion(session).await
        };

        deliver(&reply, placeholder, responder).await
    }

    /// Call the model over the whole history. The assistant turn is only
    /// recorded on success; a failure leaves the transcript as it was, the
    /// user's message included.
    async fn request_completion(&self, session: &mut Session) -> String {
        match self.client.complete(session.model, &session.history).await {
            Ok(completion) => {
                if let Some(answer) = completion.first() {
                    session.history.push(Turn::assistant(answer));
                    answer.to_string()
                } else {
                    tracing::warn!(session_id = %session.id, "completion carried no candidates");
                    phrases::api_failure(phrases::EMPTY_COMPLETION)
                }
            }
            Err(e) => {
                tracing::warn!(session_id = %session.id, error = %e, "completion failed");
                phrases::api_failure(&e.to_string())
            }
        }
    }

    /// Image models take the latest message alone and leave no trace in
    /// the transcript.
    async fn run_image_exchange<R: Responder>(
        &self,
        session: &Session,
        prompt: &str,
        placeholder: MessageRef,
        responder: &R,
    ) -> Result<(), SendError> {
        match self.client.generate_image(session.model, prompt).await {
            Ok(image) => {
                responder.delete_message(placeholder).await?;
                responder.send_photo_url(&image.url, prompt).await
            }
            Err(e) => {
                tracing::warn!(session_id = %session.id, error = %e, "image generation failed");
                deliver(&phrases::api_failure(&e.to_string()), placeholder, responder).await
            }
        }
    }
}

/// Split the reply into pages, convert each to HTML, rewrite the
/// placeholder with the first page and send the rest after it.
async fn deliver<R: Responder>(
    reply: &str,
    placeholder: MessageRef,
    responder: &R,
) -> Result<(), SendError> {
    let pages = paginate(reply, PAGE_LIMIT);
    if let Some((first, rest)) = pages.split_first() {
        responder
            .edit_html(placeholder, &markup::convert(first))
            .await?;
        for page in rest {
            responder.send_html(&markup::convert(page)).await?;
        }
    }
    Ok(())
}

/// When the message opens with the system marker, returns the instruction
/// carried after it.
fn strip_system_marker(text: &str) -> Option<&str> {
    text.strip_prefix(phrases::SYSTEM_MARKER).map(str::trim)
}
