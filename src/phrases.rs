//! User-facing phrase catalog.
//!
//! Every string the bot sends to a user lives here, in one place. The bot
//! speaks Russian to its users; code and logs stay English.

use crate::llm::AccessDenied;

pub const GREETING: &str = "Это не учения. Здесь тебя ждет интерфейс к великой и ужасной ChatGPT. Жми /gpt Для старта";

pub const DIALOG_PROMPT: &str = "Итак. О чем же ты хотел меня спросить?";

pub const CONTEXT_CLEARED: &str = "Контекст беседы был сброшен. Для нового диалога жми /gpt";

/// Placeholder sent immediately on every exchange; later edited in place.
pub const THINKING: &str = "Думаю...";

/// Sent before replaying a message that arrived with no active dialog.
pub const LOST_CONTEXT: &str = "Кажется, я потерял нить беседы. Начинаю новую, твое сообщение уже в работе.";

pub const HELP: &str = "\
Доступные команды:
/start - приветствие
/gpt - начать диалог
/clear - сбросить контекст беседы
/set_model - выбрать модель
/help - эта справка

Сообщение, начинающееся с !sys, добавляет системную инструкцию в контекст беседы.";

pub const MODEL_MENU_TITLE: &str = "Какую модель будем использовать?";

pub const UNKNOWN_MODEL: &str = "Такой модели я не знаю.";

/// Reply to users outside the bot-level allow-list.
pub const PRIVATE_BOT: &str = "Извини, это приватный бот.";

/// Diagnostic used when the API answered 200 but the candidate list was empty.
pub const EMPTY_COMPLETION: &str = "в ответе не оказалось ни одного варианта";

/// Marker prefix that turns a free-text message into a system instruction.
pub const SYSTEM_MARKER: &str = "!sys";

/// Apology template for upstream failures; embeds the raw diagnostic.
pub fn api_failure(diagnostic: &str) -> String {
    format!("Упс. Что-то пошло не так. Ответ сервера:\n{diagnostic}")
}

/// Confirmation echoed after a system instruction is stored.
pub fn system_ack(instruction: &str) -> String {
    format!("Принял. Системная инструкция добавлена в контекст:\n{instruction}")
}

pub fn model_applied(title: &str) -> String {
    format!("Теперь отвечает {title}")
}

pub fn denial(denied: AccessDenied) -> &'static str {
    match denied {
        AccessDenied::Gpt4Only => {
            "Модели класса GPT-4 доступны только избранным. Попроси владельца бота добавить тебя в список."
        }
        AccessDenied::ImageOnly => "Генерация изображений доступна только избранным.",
        AccessDenied::Restricted => "Эта модель закрыта для использования.",
    }
}
