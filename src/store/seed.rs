//! Seed data: the conversations a session starts with.
//!
//! Seed files hold a top-level `conversations` array (JSON) or
//! `[[conversations]]` tables (TOML); the format is picked from the
//! file extension.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::models::Conversation;
use super::ChatStore;
use crate::error::{ChatError, Result};

const BUILTIN: &str = include_str!("../../assets/seed.json");

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    conversations: Vec<Conversation>,
}

pub fn builtin() -> Result<ChatStore> {
    from_json(BUILTIN)
}

pub fn from_json(text: &str) -> Result<ChatStore> {
    let seed: SeedFile = serde_json::from_str(text)?;
    ChatStore::new(seed.conversations)
}

pub fn from_toml(text: &str) -> Result<ChatStore> {
    let seed: SeedFile = toml::from_str(text)?;
    ChatStore::new(seed.conversations)
}

pub fn load_file(path: &Path) -> Result<ChatStore> {
    let text = fs::read_to_string(path).map_err(|source| ChatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&text),
        Some("toml") => from_toml(&text),
        _ => Err(ChatError::UnsupportedSeedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{DeliveryState, Sender};

    #[test]
    fn builtin_seed_has_three_conversations() {
        let store = builtin().unwrap();
        let names: Vec<_> = store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Team Mustafizur", "Sara Miles", "Ops Pulse"]);

        let team = store.get("1").unwrap();
        assert_eq!(team.unread, 3);
        assert_eq!(team.messages[1].from, Sender::Me);
        assert_eq!(team.messages[1].status, DeliveryState::Read);
        assert_eq!(team.avatar.host_str(), Some("i.pravatar.cc"));
    }

    #[test]
    fn toml_seed_uses_defaults_for_missing_fields() {
        let store = from_toml(
            r#"
            [[conversations]]
            id = "a"
            name = "Alpha"
            avatar = "https://example.com/alpha.png"

            [[conversations.messages]]
            id = "a1"
            from = "them"
            content = "hello"
            sent_at = "2025-01-02T03:04:00"
            "#,
        )
        .unwrap();
        let alpha = store.get("a").unwrap();
        assert_eq!(alpha.unread, 0);
        assert!(alpha.about.is_empty());
        assert_eq!(alpha.messages[0].status, DeliveryState::Sent);
    }

    #[test]
    fn json_seed_with_duplicate_ids_fails() {
        let json = r#"{"conversations": [
            {"id": "x", "name": "One", "avatar": "https://example.com/1.png"},
            {"id": "x", "name": "Two", "avatar": "https://example.com/2.png"}
        ]}"#;
        assert!(matches!(from_json(json), Err(ChatError::DuplicateConversation(_))));
    }

    #[test]
    fn message_ids_must_be_unique_across_conversations() {
        let json = r#"{"conversations": [
            {"id": "a", "name": "One", "avatar": "https://example.com/1.png",
             "messages": [{"id": "m1", "from": "them", "content": "hi", "sent_at": "2025-03-14T09:00:00"}]},
            {"id": "b", "name": "Two", "avatar": "https://example.com/2.png",
             "messages": [{"id": "m1", "from": "me", "content": "yo", "sent_at": "2025-03-14T09:01:00"}]}
        ]}"#;
        assert!(matches!(from_json(json), Err(ChatError::DuplicateMessage(id)) if id == "m1"));
    }

    #[test]
    fn message_ids_must_be_unique_within_a_conversation() {
        let json = r#"{"conversations": [
            {"id": "a", "name": "One", "avatar": "https://example.com/1.png",
             "messages": [
                {"id": "m1", "from": "them", "content": "hi", "sent_at": "2025-03-14T09:00:00"},
                {"id": "m1", "from": "me", "content": "hi again", "sent_at": "2025-03-14T09:02:00"}
             ]}
        ]}"#;
        assert!(matches!(from_json(json), Err(ChatError::DuplicateMessage(_))));
    }

    #[test]
    fn bad_avatar_url_is_a_parse_error() {
        let json = r#"{"conversations": [{"id": "x", "name": "One", "avatar": "not a url"}]}"#;
        assert!(matches!(from_json(json), Err(ChatError::Json(_))));
    }

    #[test]
    fn load_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("seed.json");
        fs::write(&json, BUILTIN).unwrap();
        assert_eq!(load_file(&json).unwrap().len(), 3);

        let yaml = dir.path().join("seed.yaml");
        fs::write(&yaml, "conversations: []").unwrap();
        assert!(matches!(load_file(&yaml), Err(ChatError::UnsupportedSeedFormat(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_file(&missing), Err(ChatError::Io { .. })));
    }
}
