/*!
 * Translation dictionary loading.
 *
 * A dictionary file is a JSON object keyed by language code. Each language
 * object carries a section (normally `"Title"`) mapping source strings to
 * their replacements:
 *
 * ```json
 * { "RU": { "Title": { "Hello": "Привет" } } }
 * ```
 *
 * Lookup is lenient: a missing language or section yields an empty map.
 */

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::DictionaryError;

/// Flat source -> replacement mapping for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: HashMap<String, String>,
}

impl TranslationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the map for `language` from the dictionary file at `path`
    pub fn load<P: AsRef<Path>>(path: P, language: &str, section: &str) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json_str(&content, language, section)
    }

    /// Build the map for `language` from dictionary JSON text
    pub fn from_json_str(json: &str, language: &str, section: &str) -> Result<Self, DictionaryError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(&root, language, section)
    }

    /// Build the map for `language` from an already parsed dictionary
    pub fn from_value(root: &Value, language: &str, section: &str) -> Result<Self, DictionaryError> {
        let languages = root.as_object().ok_or_else(|| {
            DictionaryError::UnexpectedShape("top level must be an object keyed by language".to_string())
        })?;

        let Some(language_entry) = languages.get(language) else {
            debug!("Dictionary has no entry for language {}", language);
            return Ok(Self::new());
        };

        let language_object = language_entry.as_object().ok_or_else(|| {
            DictionaryError::UnexpectedShape(format!("entry for language '{}' must be an object", language))
        })?;

        let Some(section_entry) = language_object.get(section) else {
            debug!("Dictionary language {} has no '{}' section", language, section);
            return Ok(Self::new());
        };

        let pairs = section_entry.as_object().ok_or_else(|| {
            DictionaryError::UnexpectedShape(format!("'{}' section of '{}' must be an object", section, language))
        })?;

        let mut entries = HashMap::with_capacity(pairs.len());
        for (source, replacement) in pairs {
            match replacement {
                Value::String(text) => {
                    entries.insert(source.clone(), text.clone());
                }
                other => {
                    warn!("Skipping dictionary entry '{}': replacement is not a string ({})", source, other);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Replacement for `source`, if any
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn contains_key(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (source, replacement) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
