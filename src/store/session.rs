use std::fmt;
use std::sync::Arc;

use log::debug;

use super::clock::{Clock, IdGenerator, SystemClock, UuidIds};
use super::models::Conversation;
use super::ChatStore;

/// Something the user did in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(String),
    Search(String),
    Compose(String),
    Send,
    KeyPress { enter: bool, shift: bool },
}

/// Enter sends; Shift+Enter is left to the text view as a newline.
pub fn submits(enter: bool, shift: bool) -> bool {
    enter && !shift
}

/// Everything the window renders: the current store snapshot plus the
/// selection, search term and composer draft.
#[derive(Clone)]
pub struct Session {
    store: ChatStore,
    selected: Option<String>,
    search: String,
    draft: String,
    clock: Arc<dyn Clock + Send + Sync>,
    ids: Arc<dyn IdGenerator + Send + Sync>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("selected", &self.selected)
            .field("search", &self.search)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: ChatStore) -> Self {
        Self::with_services(store, Arc::new(SystemClock), Arc::new(UuidIds))
    }

    pub fn with_services(
        store: ChatStore,
        clock: Arc<dyn Clock + Send + Sync>,
        ids: Arc<dyn IdGenerator + Send + Sync>,
    ) -> Self {
        let selected = store.first().map(|c| c.id.clone());
        Self {
            store,
            selected,
            search: String::new(),
            draft: String::new(),
            clock,
            ids,
        }
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The conversation shown in the transcript pane. A stale or missing
    /// selection resolves to the first conversation.
    pub fn selected(&self) -> Option<&Conversation> {
        self.store.select(self.selected.as_deref().unwrap_or_default())
    }

    /// Sidebar contents for the current search term.
    pub fn visible(&self) -> Vec<&Conversation> {
        self.store.conversations(&self.search)
    }

    pub fn apply(&self, intent: Intent) -> Session {
        match intent {
            Intent::Select(id) => Session { selected: Some(id), ..self.clone() },
            Intent::Search(search) => Session { search, ..self.clone() },
            Intent::Compose(draft) => Session { draft, ..self.clone() },
            Intent::Send => self.send(),
            Intent::KeyPress { enter, shift } if submits(enter, shift) => self.send(),
            Intent::KeyPress { .. } => self.clone(),
        }
    }

    fn send(&self) -> Session {
        let Some(target) = self.selected() else {
            debug!("send ignored: no conversation");
            return self.clone();
        };
        match self
            .store
            .send_message(&target.id, &self.draft, self.clock.as_ref(), self.ids.as_ref())
        {
            Ok(store) => Session {
                store,
                draft: String::new(),
                ..self.clone()
            },
            Err(err) => {
                debug!("send ignored: {err}");
                self.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::{FixedClock, SequentialIds};
    use crate::store::models::DeliveryState;
    use crate::store::seed;
    use chrono::NaiveDate;

    fn session() -> Session {
        let now = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap().and_hms_opt(11, 0, 0).unwrap();
        Session::with_services(
            seed::builtin().unwrap(),
            Arc::new(FixedClock(now)),
            Arc::new(SequentialIds::new("local-")),
        )
    }

    #[test]
    fn starts_on_first_conversation() {
        let s = session();
        assert_eq!(s.selected().unwrap().id, "1");
        assert_eq!(s.visible().len(), 3);
    }

    #[test]
    fn stale_selection_falls_back_to_first() {
        let s = session().apply(Intent::Select("gone".into()));
        assert_eq!(s.selected().unwrap().id, "1");
    }

    #[test]
    fn search_narrows_sidebar_but_not_selection() {
        let s = session().apply(Intent::Search("figma".into()));
        let ids: Vec<_> = s.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["2"]);
        assert_eq!(s.selected().unwrap().id, "1");
    }

    #[test]
    fn send_goes_to_selected_conversation_and_clears_draft() {
        let s = session()
            .apply(Intent::Select("3".into()))
            .apply(Intent::Compose("  on it  ".into()))
            .apply(Intent::Send);

        assert!(s.draft().is_empty());
        let ops = s.store().get("3").unwrap();
        assert_eq!(ops.unread, 0);
        assert_eq!(ops.last_seen, "online");
        let last = ops.last_message().unwrap();
        assert_eq!(last.content, "on it");
        assert_eq!(last.id, "local-1");
        assert_eq!(last.status, DeliveryState::Sent);
    }

    #[test]
    fn blank_draft_keeps_everything() {
        let before = session().apply(Intent::Compose("   ".into()));
        let after = before.apply(Intent::Send);
        assert_eq!(after.draft(), "   ");
        assert_eq!(after.store().get("1"), before.store().get("1"));
    }

    #[test]
    fn enter_sends_and_shift_enter_does_not() {
        let s = session().apply(Intent::Compose("line one".into()));

        let shifted = s.apply(Intent::KeyPress { enter: true, shift: true });
        assert_eq!(shifted.draft(), "line one");
        assert_eq!(shifted.store().get("1").unwrap().messages.len(), 3);

        let sent = s.apply(Intent::KeyPress { enter: true, shift: false });
        assert!(sent.draft().is_empty());
        assert_eq!(sent.store().get("1").unwrap().messages.len(), 4);
    }

    #[test]
    fn empty_store_has_nothing_selected() {
        let s = Session::new(ChatStore::default()).apply(Intent::Compose("hi".into())).apply(Intent::Send);
        assert!(s.selected().is_none());
        assert_eq!(s.draft(), "hi");
    }
}
