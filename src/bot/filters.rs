use teloxide::prelude::Message;
use teloxide::types::{ChatId, UserId};

/// Text sent by a user, i.e. something that can answer an armed flow.
#[derive(Clone, Debug, PartialEq)]
pub struct UserText {
    pub user: UserId,
    pub chat: ChatId,
    pub text: String,
}

pub fn user_text(message: Message) -> Option<UserText> {
    Some(UserText {
        user: message.from.as_ref()?.id,
        chat: message.chat.id,
        text: message.text()?.to_string(),
    })
}
