use std::future::Future;
use log::{debug, warn};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, Recipient};
use teloxide::RequestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Member,
    /// The user has left the channel or the group.
    NotJoined,
    /// A lookup failed, e.g. the bot is not an admin there.
    Unavailable,
}

pub trait MembershipGate {
    fn check(&self, user: UserId) -> impl Future<Output = Membership> + Send;
}

/// Requires membership in both a channel and a group, re-queried on every call.
#[derive(Clone, Debug)]
pub struct TelegramGate {
    bot: Bot,
    channel: Recipient,
    group: Recipient,
}

impl TelegramGate {
    pub fn new(bot: Bot, channel: Recipient, group: Recipient) -> Self {
        TelegramGate { bot, channel, group }
    }

    async fn has_left(&self, chat: &Recipient, user: UserId) -> Result<bool, RequestError> {
        let member = self.bot.get_chat_member(chat.clone(), user).await?;
        debug!("user {user} in {chat:?}: {:?}", member.kind);

        Ok(matches!(member.kind, ChatMemberKind::Left))
    }

    async fn lookup(&self, user: UserId) -> Result<Membership, RequestError> {
        let left_channel = self.has_left(&self.channel, user).await?;
        let left_group = self.has_left(&self.group, user).await?;

        if left_channel || left_group {
            Ok(Membership::NotJoined)
        } else {
            Ok(Membership::Member)
        }
    }
}

impl MembershipGate for TelegramGate {
    async fn check(&self, user: UserId) -> Membership {
        match self.lookup(user).await {
            Ok(membership) => membership,
            Err(e) => {
                warn!("Error checking membership of user {user}: {e}");
                Membership::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use teloxide::prelude::*;
    use teloxide::types::Recipient;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use super::{Membership, MembershipGate, TelegramGate};

    const CHANNEL: ChatId = ChatId(-1001);
    const GROUP: ChatId = ChatId(-1002);
    const USER: UserId = UserId(279838373);

    async fn serve_status(server: &MockServer, chat: ChatId, status: &str) {
        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/getchatmember$"))
            .and(body_partial_json(json!({"chat_id": chat.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "user": {"id": USER.0, "is_bot": false, "first_name": "Leonid"},
                    "status": status,
                },
            })))
            .mount(server)
            .await;
    }

    fn gate_for(server: &MockServer) -> TelegramGate {
        let bot = Bot::new("7214402729:token").set_api_url(Url::parse(&server.uri()).unwrap());
        TelegramGate::new(bot, Recipient::Id(CHANNEL), Recipient::Id(GROUP))
    }

    #[tokio::test]
    async fn member_of_both_passes() {
        let server = MockServer::start().await;
        serve_status(&server, CHANNEL, "member").await;
        serve_status(&server, GROUP, "member").await;

        assert_eq!(gate_for(&server).check(USER).await, Membership::Member);
    }

    #[tokio::test]
    async fn left_group_is_not_joined() {
        let server = MockServer::start().await;
        serve_status(&server, CHANNEL, "member").await;
        serve_status(&server, GROUP, "left").await;

        assert_eq!(gate_for(&server).check(USER).await, Membership::NotJoined);
    }

    #[tokio::test]
    async fn left_channel_is_not_joined() {
        let server = MockServer::start().await;
        serve_status(&server, CHANNEL, "left").await;
        serve_status(&server, GROUP, "member").await;

        assert_eq!(gate_for(&server).check(USER).await, Membership::NotJoined);
    }

    #[tokio::test]
    async fn api_error_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/getchatmember$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found",
            })))
            .mount(&server)
            .await;

        assert_eq!(gate_for(&server).check(USER).await, Membership::Unavailable);
    }
}
