//! In-memory conversation store.
//!
//! A [`ChatStore`] is an immutable snapshot. Every transition returns a new
//! snapshot and leaves the receiver untouched; conversations that did not
//! change are shared between snapshots.

pub mod clock;
pub mod models;
pub mod seed;
pub mod session;

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::error::{ChatError, Result, SendError};
use clock::{Clock, IdGenerator};
use models::{Conversation, DeliveryState, Message, Sender};

/// Last-seen label applied to a conversation after we send into it.
pub const ONLINE: &str = "online";

#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    conversations: Arc<Vec<Arc<Conversation>>>,
}

impl ChatStore {
    /// Builds a store, rejecting duplicate conversation ids and message ids
    /// repeated anywhere in the store.
    pub fn new(conversations: Vec<Conversation>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(conversations.len());
        let mut seen_messages = HashSet::new();
        for c in &conversations {
            if !seen.insert(c.id.as_str()) {
                return Err(ChatError::DuplicateConversation(c.id.clone()));
            }
            for m in &c.messages {
                if !seen_messages.insert(m.id.as_str()) {
                    return Err(ChatError::DuplicateMessage(m.id.clone()));
                }
            }
        }
        Ok(Self {
            conversations: Arc::new(conversations.into_iter().map(Arc::new).collect()),
        })
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter().map(|c| c.as_ref())
    }

    pub fn first(&self) -> Option<&Conversation> {
        self.conversations.first().map(|c| c.as_ref())
    }

    /// Strict lookup by id.
    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.iter().find(|c| c.id == id)
    }

    /// Lookup by id, falling back to the first conversation when `id` does
    /// not resolve. `None` only when the store is empty.
    pub fn select(&self, id: &str) -> Option<&Conversation> {
        self.get(id).or_else(|| self.first())
    }

    /// Conversations whose name or any message contains `term`, ignoring
    /// case. A blank term matches everything. Insertion order is kept.
    pub fn conversations(&self, term: &str) -> Vec<&Conversation> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.iter().collect();
        }
        self.iter().filter(|c| c.matches(&needle)).collect()
    }

    /// Appends an outgoing message to `conversation_id`.
    ///
    /// The text is trimmed; blank text or an unknown conversation is
    /// rejected and nothing changes. On success the conversation's unread
    /// counter drops to zero and its last-seen label becomes [`ONLINE`].
    pub fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
    ) -> Result<ChatStore, SendError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(SendError::EmptyText);
        }
        let idx = self
            .conversations
            .iter()
            .position(|c| c.id == conversation_id)
            .ok_or_else(|| SendError::UnknownConversation(conversation_id.to_string()))?;

        let message = Message {
            id: ids.next_id(),
            from: Sender::Me,
            content: content.to_string(),
            sent_at: clock.now(),
            status: DeliveryState::Sent,
        };
        debug!("sending {} into conversation {}", message.id, conversation_id);

        let mut updated = Conversation::clone(&self.conversations[idx]);
        updated.messages.push(message);
        updated.unread = 0;
        updated.last_seen = ONLINE.to_string();

        let mut conversations = Vec::clone(&self.conversations);
        conversations[idx] = Arc::new(updated);
        Ok(ChatStore { conversations: Arc::new(conversations) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::{FixedClock, SequentialIds};
    use chrono::NaiveDate;
    use url::Url;

    fn conversation(id: &str, name: &str, unread: u32, bodies: &[&str]) -> Conversation {
        let at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        Conversation {
            id: id.into(),
            name: name.into(),
            avatar: Url::parse("https://example.com/a.png").unwrap(),
            status: String::new(),
            last_seen: "last seen today at 08:41".into(),
            unread,
            about: format!("about {name}"),
            messages: bodies
                .iter()
                .enumerate()
                .map(|(i, b)| Message {
                    id: format!("{id}-m{i}"),
                    from: Sender::Them,
                    content: b.to_string(),
                    sent_at: at,
                    status: DeliveryState::Delivered,
                })
                .collect(),
        }
    }

    fn store() -> ChatStore {
        ChatStore::new(vec![
            conversation("1", "Team Mustafizur", 3, &["Sprint slides are in Notion."]),
            conversation("2", "Sara Miles", 0, &["Pushed the refreshed iconography into Figma."]),
            conversation("3", "Ops Pulse", 1, &[]),
        ])
        .unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap().and_hms_opt(10, 30, 0).unwrap())
    }

    fn ids_of<'a>(items: impl IntoIterator<Item = &'a Conversation>) -> Vec<&'a str> {
        items.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ChatStore::new(vec![conversation("1", "A", 0, &[]), conversation("1", "B", 0, &[])])
            .unwrap_err();
        assert!(matches!(err, ChatError::DuplicateConversation(id) if id == "1"));
    }

    #[test]
    fn blank_filter_returns_everything_in_order() {
        let s = store();
        assert_eq!(ids_of(s.conversations("")), ["1", "2", "3"]);
        assert_eq!(ids_of(s.conversations("   ")), ["1", "2", "3"]);
    }

    #[test]
    fn filter_matches_name_and_content_ignoring_case() {
        let s = store();
        assert_eq!(ids_of(s.conversations("sara")), ["2"]);
        assert_eq!(ids_of(s.conversations("FIGMA")), ["2"]);
        assert_eq!(ids_of(s.conversations("  notion ")), ["1"]);
        assert!(s.conversations("zzz-no-match").is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let s = store();
        assert_eq!(ids_of(s.conversations("s")), ids_of(s.conversations("s")));
    }

    #[test]
    fn select_falls_back_to_first() {
        let s = store();
        assert_eq!(s.select("3").map(|c| c.id.as_str()), Some("3"));
        assert_eq!(s.select("nope").map(|c| c.id.as_str()), Some("1"));
        assert!(s.get("nope").is_none());
        assert!(ChatStore::default().select("1").is_none());
    }

    #[test]
    fn send_appends_outgoing_message_and_clears_unread() {
        let s = store();
        let ids = SequentialIds::new("local-");
        let next = s.send_message("1", "  ship it  ", &clock(), &ids).unwrap();

        let c = next.get("1").unwrap();
        assert_eq!(c.messages.len(), 2);
        let m = c.last_message().unwrap();
        assert_eq!(m.id, "local-1");
        assert_eq!(m.content, "ship it");
        assert_eq!(m.from, Sender::Me);
        assert_eq!(m.status, DeliveryState::Sent);
        assert_eq!(m.sent_at, clock().0);
        assert_eq!(c.unread, 0);
        assert_eq!(c.last_seen, ONLINE);
    }

    #[test]
    fn send_leaves_previous_snapshot_alone() {
        let s = store();
        let next = s.send_message("1", "hi", &clock(), &SequentialIds::new("x")).unwrap();

        let before = s.get("1").unwrap();
        assert_eq!(before.messages.len(), 1);
        assert_eq!(before.unread, 3);
        assert_eq!(next.get("2"), s.get("2"));
        assert!(Arc::ptr_eq(&s.conversations[1], &next.conversations[1]));
    }

    #[test]
    fn blank_send_is_rejected() {
        let s = store();
        let ids = SequentialIds::new("x");
        assert_eq!(s.send_message("1", " \n\t ", &clock(), &ids).unwrap_err(), SendError::EmptyText);
        assert_eq!(s.get("1").unwrap().unread, 3);
    }

    #[test]
    fn unknown_conversation_is_rejected() {
        let s = store();
        let err = s.send_message("missing-id", "hi", &clock(), &SequentialIds::new("x")).unwrap_err();
        assert_eq!(err, SendError::UnknownConversation("missing-id".into()));
    }

    #[test]
    fn ids_stay_unique_after_sends() {
        let ids = SequentialIds::new("x");
        let s = store()
            .send_message("2", "one", &clock(), &ids)
            .and_then(|s| s.send_message("3", "two", &clock(), &ids))
            .unwrap();
        let all = ids_of(s.iter());
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(s.len(), 3);
    }
}
