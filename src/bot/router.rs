use teloxide::types::UserId;
use crate::actions::{render_code, Deployer, Fetcher};
use crate::gate::{Membership, MembershipGate};
use crate::pending::{Flow, PendingInteractions};
use crate::store::PremiumStore;
use crate::types::Reply;
use super::commands::{Action, Command};
use super::handlers::make_callback_kb;

pub const ACCESS_DENIED: &str = "❌ Access denied!";
pub const PREMIUM_ONLY: &str = "❌ This feature is for premium users only!";
pub const OWNER_ONLY: &str = "❌ This feature is for the owner only!";
pub const MEMBERSHIP_ERROR: &str =
    "❌ Error while checking membership. Make sure the bot is an admin of the channel and the group.";
pub const ASK_WEBSITE_NAME: &str = "Enter the website name:";
pub const ASK_URL: &str = "Enter the website URL:";

/// Authorization and flow logic behind every update the bot reacts to.
///
/// Nothing here talks to the chat directly: each operation returns the
/// [`Reply`] to send, so the whole flow can run against fake gates and
/// clients.
pub struct Gatekeeper<G, D, F> {
    owner: UserId,
    channel_username: String,
    group_username: String,
    store: PremiumStore,
    pending: PendingInteractions,
    gate: G,
    deployer: D,
    fetcher: F,
}

impl<G, D, F> Gatekeeper<G, D, F>
where
    G: MembershipGate,
    D: Deployer,
    F: Fetcher,
{
    pub fn new(
        owner: UserId,
        channel_username: String,
        group_username: String,
        store: PremiumStore,
        gate: G,
        deployer: D,
        fetcher: F,
    ) -> Self {
        Gatekeeper {
            owner,
            channel_username,
            group_username,
            store,
            pending: PendingInteractions::new(),
            gate,
            deployer,
            fetcher,
        }
    }

    pub fn pending(&self) -> &PendingInteractions {
        &self.pending
    }

    fn is_owner(&self, user: UserId) -> bool {
        user == self.owner
    }

    /// `None` when the user may go on, otherwise the reply explaining why not.
    async fn membership_denial(&self, user: UserId) -> Option<Reply> {
        match self.gate.check(user).await {
            Membership::Member => None,
            Membership::NotJoined => Some(Reply::text(format!(
                "⚠️ You must join the channel {} and the group {} first!",
                self.channel_username, self.group_username,
            ))),
            Membership::Unavailable => Some(Reply::text(MEMBERSHIP_ERROR)),
        }
    }

    pub async fn command(&self, user: UserId, command: Command) -> Reply {
        match command {
            Command::Start => self.start(user).await,
            Command::AddPremium(target) => self.add_premium(user, target),
            Command::DelPremium(target) => self.del_premium(user, target),
        }
    }

    pub async fn start(&self, user: UserId) -> Reply {
        if let Some(denial) = self.membership_denial(user).await {
            return denial;
        }

        Reply::text("Welcome! Choose a menu:").with_keyboard(make_callback_kb(vec![
            vec![("🌐 Create website".to_string(), Action::CreateWebsite)],
            vec![("📦 Get code".to_string(), Action::GetCode)],
        ]))
    }

    pub fn add_premium(&self, user: UserId, target: Option<String>) -> Reply {
        if !self.is_owner(user) {
            return Reply::text(ACCESS_DENIED);
        }
        let Some(target) = target else {
            return Reply::text("Usage: /addpremium <user_id>");
        };

        self.store.grant(&target);
        Reply::text(format!("✅ User {target} added to premium!"))
    }

    pub fn del_premium(&self, user: UserId, target: Option<String>) -> Reply {
        if !self.is_owner(user) {
            return Reply::text(ACCESS_DENIED);
        }
        let Some(target) = target else {
            return Reply::text("Usage: /delpremium <user_id>");
        };

        self.store.revoke(&target);
        Reply::text(format!("✅ User {target} removed from premium!"))
    }

    pub async fn action(&self, user: UserId, action: Action) -> Reply {
        match action {
            Action::CreateWebsite => self.request_website(user).await,
            Action::GetCode => self.request_code(user),
        }
    }

    async fn request_website(&self, user: UserId) -> Reply {
        if let Some(denial) = self.membership_denial(user).await {
            return denial;
        }
        if !self.store.is_premium(&user.0.to_string()) {
            return Reply::text(PREMIUM_ONLY);
        }

        self.pending.arm(user, Flow::WebsiteName);
        Reply::text(ASK_WEBSITE_NAME)
    }

    fn request_code(&self, user: UserId) -> Reply {
        if !self.is_owner(user) {
            return Reply::text(OWNER_ONLY);
        }

        self.pending.arm(user, Flow::Url);
        Reply::text(ASK_URL)
    }

    /// Plain text is only meaningful as the answer to an armed flow; otherwise
    /// it is ignored. The flow is cleared before the text is looked at.
    pub async fn text(&self, user: UserId, text: &str) -> Option<Reply> {
        let reply = match self.pending.take(user)? {
            Flow::WebsiteName => self.create_website(text).await,
            Flow::Url => self.fetch_code(text).await,
        };

        Some(reply)
    }

    async fn create_website(&self, name: &str) -> Reply {
        match self.deployer.create_website(name).await {
            Ok(url) => Reply::text(format!("✅ Website created!\nURL: {url}")),
            Err(e) => Reply::text(format!("❌ Failed to create website: {e}")),
        }
    }

    async fn fetch_code(&self, url: &str) -> Reply {
        match self.fetcher.fetch(url).await {
            Ok(body) => Reply::html(render_code(&body)),
            Err(e) => Reply::text(format!("❌ Failed to fetch code: {e}")),
        }
    }
}
