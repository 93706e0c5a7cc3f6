use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Them,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    #[default]
    Sent,
    Delivered,
    Read,
}

impl DeliveryState {
    /// Tag shown under outgoing bubbles.
    pub fn tag(self) -> &'static str {
        match self {
            DeliveryState::Sent => "SENT",
            DeliveryState::Delivered => "DELIVERED",
            DeliveryState::Read => "READ",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub from: Sender,
    pub content: String,
    pub sent_at: NaiveDateTime,
    #[serde(default)]
    pub status: DeliveryState,
}

impl Message {
    pub fn is_outgoing(&self) -> bool {
        self.from == Sender::Me
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub avatar: Url,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_seen: String,
    #[serde(default)]
    pub unread: u32,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Case-insensitive match on the name or any message body.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .messages
                .iter()
                .any(|m| m.content.to_lowercase().contains(needle))
    }
}
