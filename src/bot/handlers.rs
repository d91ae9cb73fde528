use std::fmt::Display;
use std::sync::Arc;
use log::debug;
use teloxide::dispatching::dialogue::GetChatId;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::{CallbackQuery, ChatId, Message, Requester};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::{Bot, RequestError};
use super::commands::*;
use super::filters::UserText;
use crate::types::{AppState, Reply};

pub async fn handle_command(
    bot: Bot,
    state: Arc<AppState>,
    message: Message,
    command: Command,
) -> Result<(), RequestError> {
    let Some(user) = message.from.as_ref() else { return Ok(()) };

    let reply = state.command(user.id, command).await;
    send_reply(&bot, message.chat.id, reply).await
}

pub async fn handle_callback_query(
    bot: Bot,
    callback_query: CallbackQuery,
    state: Arc<AppState>,
) -> Result<(), RequestError> {
    let mut sent = Ok(());
    match callback_query.data.as_deref().and_then(Action::parse) {
        Some(action) => {
            // buttons live in private chats, fall back to the presser's dm
            let chat_id = callback_query.chat_id()
                .unwrap_or(ChatId::from(callback_query.from.id));

            let reply = state.action(callback_query.from.id, action).await;
            sent = send_reply(&bot, chat_id, reply).await;
        }
        None => debug!("unknown callback data {:?}", callback_query.data),
    }

    // answered even when the reply could not be delivered
    bot.answer_callback_query(callback_query.id).await?;
    sent
}

pub async fn handle_text(
    bot: Bot,
    state: Arc<AppState>,
    user_text: UserText,
) -> Result<(), RequestError> {
    match state.text(user_text.user, &user_text.text).await {
        Some(reply) => send_reply(&bot, user_text.chat, reply).await,
        None => Ok(()),
    }
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), RequestError> {
    let mut request = bot.send_message(chat_id, reply.text);
    if let Some(parse_mode) = reply.parse_mode {
        request = request.parse_mode(parse_mode);
    }
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }

    request.await.map(|_| ())
}

pub fn make_callback_kb(butts: Vec<Vec<(String, impl Display)>>) -> InlineKeyboardMarkup {
    let kb: Vec<Vec<InlineKeyboardButton>> = butts.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|butt| InlineKeyboardButton::callback(butt.0, butt.1.to_string()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(kb)
}
