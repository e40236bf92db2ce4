use crate::config::Config;
use crate::i18n::Language;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const DARK_MODE_KEY: &str = "isDarkMode";
pub const LANGUAGE_KEY: &str = "language";

/// String key/value store backing user preferences
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences persisted as a flat TOML table
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Default location next to the config file
    pub fn default_path() -> PathBuf {
        Config::config_dir().join("prefs.toml")
    }

    /// Open the store, treating a missing or unreadable file as empty
    pub fn open(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store, nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            values: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Theme and locale shared by every page.
///
/// Read once from the store before the first frame; after that the two
/// setters below are the only writers of their keys.
pub struct Settings {
    dark_mode: bool,
    language: Language,
    store: Box<dyn PreferenceStore>,
}

impl Settings {
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let dark_mode = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or(Language::English);
        Self {
            dark_mode,
            language,
            store,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(e) = self.store.set(DARK_MODE_KEY, value) {
            warn!("failed to persist {}: {:#}", DARK_MODE_KEY, e);
        }
    }

    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        if let Err(e) = self.store.set(LANGUAGE_KEY, language.code()) {
            warn!("failed to persist {}: {:#}", LANGUAGE_KEY, e);
        }
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_english() {
        let settings = Settings::load(Box::new(MemoryStore::default()));
        assert!(!settings.dark_mode());
        assert_eq!(settings.language(), Language::English);
    }

    #[test]
    fn only_exact_true_enables_dark_mode() {
        let settings = Settings::load(Box::new(MemoryStore::with(&[(DARK_MODE_KEY, "TRUE")])));
        assert!(!settings.dark_mode());
        let settings = Settings::load(Box::new(MemoryStore::with(&[(DARK_MODE_KEY, "true")])));
        assert!(settings.dark_mode());
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let settings = Settings::load(Box::new(MemoryStore::with(&[(LANGUAGE_KEY, "xx")])));
        assert_eq!(settings.language(), Language::English);
    }

    #[test]
    fn toggles_write_back() {
        let mut settings = Settings::load(Box::new(MemoryStore::default()));
        settings.toggle_dark_mode();
        assert_eq!(settings.store().get(DARK_MODE_KEY).as_deref(), Some("true"));
        settings.toggle_dark_mode();
        assert_eq!(settings.store().get(DARK_MODE_KEY).as_deref(), Some("false"));

        settings.set_language(Language::Turkish);
        assert_eq!(settings.store().get(LANGUAGE_KEY).as_deref(), Some("tr"));
    }

    #[test]
    fn same_language_is_not_written() {
        let mut settings = Settings::load(Box::new(MemoryStore::default()));
        settings.set_language(Language::English);
        assert_eq!(settings.store().get(LANGUAGE_KEY), None);
    }
}
