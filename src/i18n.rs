//! Localized page copy.
//!
//! The default table is embedded at compile time. A site may point
//! `[i18n].translations` at its own JSON file with the same shape:
//!
//! ```json
//! { "english": { "title": "...", "description": "...", "detected": "...", "lang": "..." } }
//! ```

use crate::locale::Locale;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;

/// Translation table shipped with the binary.
const DEFAULT_TRANSLATIONS: &str = include_str!("embed/translation.json");

/// Parsed embedded table, shared by every page.
static EMBEDDED: LazyLock<Translations> = LazyLock::new(|| {
    Translations::from_json(DEFAULT_TRANSLATIONS).expect("embedded translations are valid")
});

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Translation file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Translation table has no `english` entry to fall back on")]
    MissingFallback,
}

/// Display strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Strings {
    pub title: String,
    pub description: String,
    /// Label above the detected platform.
    pub detected: String,
    /// Label above the detected locale.
    pub lang: String,
}

/// Read-only mapping from [`Locale`] to [`Strings`].
#[derive(Debug, Clone)]
pub struct Translations {
    entries: HashMap<Locale, Strings>,
}

impl Translations {
    /// The embedded default table.
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parse a JSON table. The `english` entry is mandatory.
    pub fn from_json(content: &str) -> Result<Self, I18nError> {
        let entries: HashMap<Locale, Strings> = serde_json::from_str(content)?;
        if !entries.contains_key(&Locale::English) {
            return Err(I18nError::MissingFallback);
        }
        Ok(Self { entries })
    }

    /// Load a JSON table from disk.
    pub fn from_path(path: &Path) -> Result<Self, I18nError> {
        let content =
            fs::read_to_string(path).map_err(|err| I18nError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content)
    }

    /// Whether `locale` has its own entry.
    pub fn contains(&self, locale: Locale) -> bool {
        self.entries.contains_key(&locale)
    }

    /// Strings for `locale`, falling back to English when the entry is missing.
    pub fn get(&self, locale: Locale) -> &Strings {
        self.entries
            .get(&locale)
            .or_else(|| self.entries.get(&Locale::English))
            .unwrap_or_else(|| EMBEDDED.english())
    }

    fn english(&self) -> &Strings {
        &self.entries[&Locale::English]
    }
}
