//! Telegram transport: long polling, command routing, and outbound delivery.
//!
//! Everything Telegram-specific lives here. Inbound updates are mapped onto
//! dialog events, and the [`Responder`] implementation turns controller
//! output back into Bot API calls. The dialog logic itself never sees a
//! teloxide type.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode,
};

use crate::dialog::{MessageRef, PickOutcome, ProductionController, Responder, SendError};
use crate::llm::all_models;
use crate::phrases;
use crate::state_machine::{Command, Event};

/// Callback data prefix for model buttons in the inline menu
const MODEL_PICK_PREFIX: &str = "set_";

/// Shared state injected into every handler through dptree
struct BotState {
    controller: ProductionController,
    allowed_users: HashSet<u64>,
}

impl BotState {
    /// An empty allow-list leaves the bot open to everyone
    fn is_allowed(&self, user_id: u64) -> bool {
        self.allowed_users.is_empty() || self.allowed_users.contains(&user_id)
    }
}

/// Registers the command menu and polls for updates until shutdown.
pub async fn run_bot(
    token: String,
    allowed_users: HashSet<u64>,
    controller: ProductionController,
) {
    let bot = Bot::new(token);
    register_commands(&bot).await;

    let state = Arc::new(BotState {
        controller,
        allowed_users,
    });

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    tracing::info!("starting long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Publishes the slash commands shown in the Telegram client menu.
async fn register_commands(bot: &Bot) {
    let commands = [
        BotCommand {
            command: "start".into(),
            description: "Приветствие и краткая справка".into(),
        },
        BotCommand {
            command: "help".into(),
            description: "Список команд".into(),
        },
        BotCommand {
            command: "gpt".into(),
            description: "Начать диалог".into(),
        },
        BotCommand {
            command: "clear".into(),
            description: "Сбросить контекст беседы".into(),
        },
        BotCommand {
            command: "set_model".into(),
            description: "Выбрать модель".into(),
        },
    ];
    if let Err(err) = bot.set_my_commands(commands).await {
        tracing::error!(error = %err, "failed to register the command menu");
    }
}

// dptree endpoints receive their arguments by value.
#[allow(clippy::needless_pass_by_value)]
async fn message_handler(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(user_id) = msg.from.as_ref().map(|user| user.id.0) else {
        return Ok(());
    };
    if !state.is_allowed(user_id) {
        bot.send_message(msg.chat.id, phrases::PRIVATE_BOT).await?;
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let event = parse_command(text);
    let responder = TelegramResponder {
        bot,
        chat_id: msg.chat.id,
    };
    if let Err(err) = state.controller.process(user_id, event, &responder).await {
        tracing::error!(user_id, error = %err, "failed to deliver a reply");
    }
    Ok(())
}

// dptree endpoints receive their arguments by value.
#[allow(clippy::needless_pass_by_value)]
async fn callback_handler(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let user_id = query.from.id.0;
    if !state.is_allowed(user_id) {
        bot.answer_callback_query(&query.id)
            .text(phrases::PRIVATE_BOT)
            .await?;
        return Ok(());
    }
    let Some(model_id) = query.data.as_deref().and_then(parse_model_pick) else {
        bot.answer_callback_query(&query.id).await?;
        return Ok(());
    };

    match state.controller.apply_model_pick(user_id, model_id).await {
        PickOutcome::Applied(model) => {
            bot.answer_callback_query(&query.id)
                .text(phrases::model_applied(model.title))
                .await?;
            // Best-effort refresh of the check mark; the pick already took effect.
            if let Some(message) = query.message.as_ref() {
                let _ = bot
                    .edit_message_reply_markup(message.chat().id, message.id())
                    .reply_markup(model_menu(model.id))
                    .await;
            }
        }
        PickOutcome::Refused(reason) => {
            bot.answer_callback_query(&query.id).text(reason).await?;
        }
    }
    Ok(())
}

/// Delivers controller output into a single Telegram chat.
struct TelegramResponder {
    bot: Bot,
    chat_id: ChatId,
}

fn transport_error(err: teloxide::RequestError) -> SendError {
    SendError(err.to_string())
}

#[async_trait]
impl Responder for TelegramResponder {
    async fn send_text(&self, text: &str) -> Result<MessageRef, SendError> {
        let sent = self
            .bot
            .send_message(self.chat_id, text)
            .await
            .map_err(transport_error)?;
        Ok(MessageRef(sent.id.0))
    }

    async fn send_html(&self, html: &str) -> Result<MessageRef, SendError> {
        let sent = self
            .bot
            .send_message(self.chat_id, html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(transport_error)?;
        Ok(MessageRef(sent.id.0))
    }

    async fn edit_html(&self, message: MessageRef, html: &str) -> Result<(), SendError> {
        self.bot
            .edit_message_text(self.chat_id, MessageId(message.0), html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), SendError> {
        self.bot
            .delete_message(self.chat_id, MessageId(message.0))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo_url(&self, url: &str, caption: &str) -> Result<(), SendError> {
        let parsed = reqwest::Url::parse(url).map_err(|err| SendError(err.to_string()))?;
        self.bot
            .send_photo(self.chat_id, InputFile::url(parsed))
            .caption(caption)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_model_menu(&self, selected: &str) -> Result<(), SendError> {
        self.bot
            .send_message(self.chat_id, phrases::MODEL_MENU_TITLE)
            .reply_markup(model_menu(selected))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

/// One row per model; the active model carries a check mark.
fn model_menu(selected: &str) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = all_models()
        .iter()
        .map(|model| {
            let label = if model.id == selected {
                format!("✅ {}", model.title)
            } else {
                model.title.to_string()
            };
            vec![InlineKeyboardButton::callback(
                label,
                format!("{MODEL_PICK_PREFIX}{}", model.id),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

fn parse_model_pick(data: &str) -> Option<&str> {
    data.strip_prefix(MODEL_PICK_PREFIX)
}

/// Maps raw message text onto a dialog event. Commands may carry a
/// `@botname` suffix in group chats; anything unrecognized is dialog text.
fn parse_command(text: &str) -> Event {
    let first = text.split_whitespace().next().unwrap_or("");
    let command = first.split('@').next().unwrap_or(first);
    match command {
        "/start" => Event::Command(Command::Start),
        "/help" => Event::Command(Command::Help),
        "/gpt" => Event::Command(Command::BeginDialog),
        "/clear" => Event::Command(Command::Clear),
        "/set_model" => Event::Command(Command::ChooseModel),
        _ => Event::Text {
            text: text.to_string(),
        },
    }
}
