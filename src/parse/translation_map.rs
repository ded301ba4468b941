use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{L10nError, Result};

/// Ordered key/value lookup built from an INI file or loaded from JSON.
///
/// Keys keep the position of their first occurrence; inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationMap {
    entries: IndexMap<String, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// `KEY=VALUE` lines under a short `#` header
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str("# Translation Map - Plain Text Format\n");
        let _ = writeln!(out, "# Total entries: {}", self.len());
        out.push_str("# Format: KEY=VALUE\n\n");
        for (key, value) in self.iter() {
            let _ = writeln!(out, "{}={}", key, value);
        }
        out
    }

    /// Load a map previously written by [`TranslationMap::save_json`]
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| L10nError::read_failed(path, e))?;
        Self::from_json_str(&content).map_err(|e| L10nError::map_decode(path, e.to_string()))
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| L10nError::write_failed(path, e))
    }

    pub fn save_plain_text(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_plain_text()).map_err(|e| L10nError::write_failed(path, e))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
