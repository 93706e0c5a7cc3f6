//! Plain data the GTK layer draws. Nothing in here touches widgets, so the
//! layout rules can be checked without a display.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::models::{Conversation, Message};
use crate::store::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    pub fn format(self, at: &NaiveDateTime) -> String {
        match self {
            TimeFormat::TwentyFourHour => at.format("%H:%M").to_string(),
            TimeFormat::TwelveHour => at.format("%I:%M %p").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRow {
    pub id: String,
    pub name: String,
    pub avatar: Url,
    pub last_seen: String,
    pub preview: String,
    pub unread: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub avatar: Url,
    pub status: String,
    pub about: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub id: String,
    pub content: String,
    pub outgoing: bool,
    pub time: String,
    /// Delivery tag, only on outgoing bubbles.
    pub delivery: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainPane {
    Welcome,
    Conversation { header: Header, bubbles: Vec<Bubble> },
}

/// The composer hint shows only while nothing at all has been typed.
pub fn composer_placeholder_visible(draft: &str) -> bool {
    draft.is_empty()
}

pub fn sidebar_rows(session: &Session) -> Vec<ConversationRow> {
    let active = session.selected().map(|c| c.id.as_str());
    session
        .visible()
        .into_iter()
        .map(|c| row(c, active == Some(c.id.as_str())))
        .collect()
}

fn row(c: &Conversation, active: bool) -> ConversationRow {
    ConversationRow {
        id: c.id.clone(),
        name: c.name.clone(),
        avatar: c.avatar.clone(),
        last_seen: c.last_seen.clone(),
        preview: c
            .last_message()
            .map_or_else(|| c.about.clone(), |m| m.content.clone()),
        unread: (c.unread > 0).then(|| c.unread.to_string()),
        active,
    }
}

pub fn main_pane(session: &Session, clock: TimeFormat) -> MainPane {
    let Some(c) = session.selected() else {
        return MainPane::Welcome;
    };
    MainPane::Conversation {
        header: Header {
            name: c.name.clone(),
            avatar: c.avatar.clone(),
            status: c.status.clone(),
            about: c.about.clone(),
        },
        bubbles: c.messages.iter().map(|m| bubble(m, clock)).collect(),
    }
}

fn bubble(m: &Message, clock: TimeFormat) -> Bubble {
    Bubble {
        id: m.id.clone(),
        content: m.content.clone(),
        outgoing: m.is_outgoing(),
        time: clock.format(&m.sent_at),
        delivery: m.is_outgoing().then(|| m.status.tag()),
    }
}
