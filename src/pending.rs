use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use log::debug;
use teloxide::types::UserId;

/// A "bot asked, user answers with the next text message" interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    WebsiteName,
    Url,
}

/// In-memory markers for users the bot is waiting on, one set per flow.
///
/// Nothing is persisted, a restart forgets every armed flow. Both flows may be
/// armed for the same user at once; [`take`](Self::take) consumes the website
/// name flow first.
#[derive(Debug, Default)]
pub struct PendingInteractions {
    website_name: Mutex<HashSet<UserId>>,
    url: Mutex<HashSet<UserId>>,
}

impl PendingInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, flow: Flow) -> MutexGuard<'_, HashSet<UserId>> {
        let slot = match flow {
            Flow::WebsiteName => &self.website_name,
            Flow::Url => &self.url,
        };
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-arming an already armed flow is a no-op.
    pub fn arm(&self, user: UserId, flow: Flow) {
        self.slot(flow).insert(user);
        debug!("user {user} awaiting {flow:?}");
    }

    pub fn is_armed(&self, user: UserId, flow: Flow) -> bool {
        self.slot(flow).contains(&user)
    }

    /// Clears and returns the flow the next text from `user` belongs to.
    pub fn take(&self, user: UserId) -> Option<Flow> {
        let flow = [Flow::WebsiteName, Flow::Url]
            .into_iter()
            .find(|flow| self.slot(*flow).remove(&user))?;

        debug!("user {user} answered {flow:?}");
        Some(flow)
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::UserId;
    use super::{Flow, PendingInteractions};

    const ALICE: UserId = UserId(113472905);
    const BOB: UserId = UserId(195125422);

    #[test]
    fn idle_user_has_nothing_to_take() {
        let pending = PendingInteractions::new();
        assert_eq!(pending.take(ALICE), None);
    }

    #[test]
    fn armed_flow_is_taken_once() {
        let pending = PendingInteractions::new();
        pending.arm(ALICE, Flow::Url);

        assert_eq!(pending.take(ALICE), Some(Flow::Url));
        assert_eq!(pending.take(ALICE), None);
    }

    #[test]
    fn rearming_is_idempotent() {
        let pending = PendingInteractions::new();
        pending.arm(ALICE, Flow::WebsiteName);
        pending.arm(ALICE, Flow::WebsiteName);

        assert_eq!(pending.take(ALICE), Some(Flow::WebsiteName));
        assert_eq!(pending.take(ALICE), None);
    }

    #[test]
    fn users_are_independent() {
        let pending = PendingInteractions::new();
        pending.arm(ALICE, Flow::WebsiteName);

        assert_eq!(pending.take(BOB), None);
        assert!(pending.is_armed(ALICE, Flow::WebsiteName));
    }

    #[test]
    fn website_name_is_consumed_before_url() {
        let pending = PendingInteractions::new();
        pending.arm(ALICE, Flow::Url);
        pending.arm(ALICE, Flow::WebsiteName);

        assert_eq!(pending.take(ALICE), Some(Flow::WebsiteName));
        assert!(pending.is_armed(ALICE, Flow::Url));
        assert_eq!(pending.take(ALICE), Some(Flow::Url));
    }
}
