//! Language table: the fixed set of languages the service translates between.
//!
//! The table is built once at startup and shared read-only with every request
//! handler. Lookups are by ISO 639-1 code; listing preserves declaration order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English display name (e.g., "English", "French")
    pub name: &'static str,
}

/// Immutable mapping from language code to display name.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: Vec<LanguageEntry>,
}

impl LanguageTable {
    pub fn new(languages: Vec<LanguageEntry>) -> Self {
        Self { languages }
    }

    /// Get a language by its code.
    ///
    /// Codes are matched exactly; "EN" is not "en".
    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new(default_languages())
    }
}

/// Serializes as a JSON object `{code: name}` in declaration order.
impl Serialize for LanguageTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.languages.len()))?;
        for lang in &self.languages {
            map.serialize_entry(lang.code, lang.name)?;
        }
        map.end()
    }
}

fn default_languages() -> Vec<LanguageEntry> {
    [
        ("fr", "French"),
        ("en", "English"),
        ("es", "Spanish"),
        ("de", "German"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("zh", "Chinese"),
        ("ar", "Arabic"),
        ("hi", "Hindi"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageEntry { code, name })
    .collect()
}
