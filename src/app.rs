use directories::BaseDirs;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChatError, Result};
use crate::store::{seed, ChatStore};
use crate::view::TimeFormat;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "MCHAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: i32,
    pub window_height: i32,
    pub clock: TimeFormat,
    pub seed_file: Option<PathBuf>,
    pub load_avatars: bool,
    pub animations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 640,
            clock: TimeFormat::default(),
            seed_file: None,
            load_avatars: true,
            animations: true,
        }
    }
}

impl Settings {
    // Settings are read-only; nothing here writes back to disk.
    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("mustafizur-chat.toml"))
    }

    /// Loads the user's config file, falling back to defaults when it is
    /// missing or broken.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ChatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// The store a new session starts from: the configured seed file if it
    /// loads, otherwise the built-in conversations.
    pub fn seed_store(&self) -> ChatStore {
        if let Some(path) = &self.seed_file {
            match seed::load_file(path) {
                Ok(store) => return store,
                Err(e) => warn!("seed file {} unusable, using built-in seed: {e}", path.display()),
            }
        }
        seed::builtin().unwrap_or_else(|e| {
            warn!("built-in seed unusable: {e}");
            ChatStore::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let s: Settings = toml::from_str("clock = \"12h\"").unwrap();
        assert_eq!(s.clock, TimeFormat::TwelveHour);
        assert_eq!(s.window_width, 960);
        assert!(s.load_avatars);
        assert!(s.animations);
        assert!(s.seed_file.is_none());
    }

    #[test]
    fn load_from_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mustafizur-chat.toml");
        fs::write(&path, "window_width = 1200\nload_avatars = false\nanimations = false\n").unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.window_width, 1200);
        assert_eq!(s.window_height, 640);
        assert!(!s.load_avatars);
        assert!(!s.animations);
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "window_width = \"wide\"").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ChatError::Toml(_))));
    }

    #[test]
    fn seed_store_prefers_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        fs::write(
            &path,
            "[[conversations]]\nid = \"solo\"\nname = \"Solo\"\navatar = \"https://example.com/s.png\"\n",
        )
        .unwrap();

        let s = Settings { seed_file: Some(path), ..Settings::default() };
        let store = s.seed_store();
        assert_eq!(store.len(), 1);
        assert!(store.get("solo").is_some());
    }

    #[test]
    fn unusable_seed_file_falls_back_to_builtin() {
        let s = Settings {
            seed_file: Some(PathBuf::from("/nonexistent/seed.json")),
            ..Settings::default()
        };
        assert_eq!(s.seed_store().len(), 3);
    }
}
