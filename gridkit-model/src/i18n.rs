//! Translation lookup for user-facing strings.
//!
//! The engine never branches on translated text. Strings are resolved
//! through an ordered chain of tables (typically instance overrides, then
//! the active locale, then the built-in defaults); a key found in no table
//! is returned as-is.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything that can turn a message key and parameters into text.
///
/// Closures of the right shape implement this, so hosts can plug in their
/// own localization layer directly.
pub trait Translate {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self(key, params)
    }
}

/// One named table of message templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    pub name: String,
    pub entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.entries.insert(key.into(), template.into());
        self
    }

    /// Built-in English defaults for the strings the engine produces.
    pub fn defaults() -> Self {
        Self::new("default")
            .with_entry("pagination.range", "{from}–{to} of {count}")
            .with_entry("validation.required", "This field is required")
            .with_entry("validation.min", "Must be at least {min}")
            .with_entry("validation.max", "Must be at most {max}")
            .with_entry("validation.maxLength", "Must be at most {max} characters")
    }
}

/// Ordered translation sources, searched first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationChain {
    sources: Vec<TranslationTable>,
}

impl TranslationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::new().then(TranslationTable::defaults())
    }

    /// Appends a lower-priority source.
    #[must_use]
    pub fn then(mut self, table: TranslationTable) -> Self {
        self.sources.push(table);
        self
    }

    /// Inserts a highest-priority source, e.g. per-instance overrides.
    #[must_use]
    pub fn prepend(mut self, table: TranslationTable) -> Self {
        self.sources.insert(0, table);
        self
    }

    pub fn sources(&self) -> &[TranslationTable] {
        &self.sources
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.sources
            .iter()
            .find_map(|table| table.entries.get(key))
            .map(String::as_str)
    }
}

impl Translate for TranslationChain {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self.lookup(key).unwrap_or(key);
        interpolate(template, params)
    }
}

/// Replaces `{name}` placeholders with parameter values in one pass, so
/// substituted text is never rescanned. Unknown placeholders are kept.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match params.iter().find(|(n, _)| *n == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
