use teloxide::types::{InlineKeyboardMarkup, ParseMode};
use crate::actions::{CodeFetcher, VercelClient};
use crate::bot::Gatekeeper;
use crate::gate::TelegramGate;

/// What the production handlers get injected.
pub type AppState = Gatekeeper<TelegramGate, VercelClient, CodeFetcher>;

/// A chat message the bot answers with.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Reply {
            parse_mode: Some(ParseMode::Html),
            ..Reply::text(text)
        }
    }

    pub fn with_keyboard(self, keyboard: InlineKeyboardMarkup) -> Self {
        Reply {
            keyboard: Some(keyboard),
            ..self
        }
    }
}
