//! `%key` substitution in declarations.
//!
//! Hosts register values once (e.g. `admin` → `myplugin.admin`) and refer to
//! them as `%admin` in names, permissions and descriptions.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static REPLACEMENT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_-]+)").expect("valid replacement pattern"));

/// Case-insensitive table of `%key` replacements.
#[derive(Debug, Clone, Default)]
pub struct Replacements {
    values: HashMap<String, String>,
}

impl Replacements {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value. A leading `%` on the key is ignored.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        let key = key.strip_prefix('%').unwrap_or(key).to_lowercase();
        self.values.insert(key, value.into());
    }

    /// Add every pair from an iterator.
    pub fn add_all<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.add(key.as_ref(), value);
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Substitute every known `%key` in `text`.
    pub fn apply(&self, text: &str) -> String {
        if self.values.is_empty() {
            return text.to_string();
        }
        REPLACEMENT_KEY
            .replace_all(text, |caps: &Captures<'_>| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key is registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
