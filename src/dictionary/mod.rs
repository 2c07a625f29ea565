//! Translation dictionaries: one nested JSON tree per language.
/// Hard-coded dictionaries used when a translation file is unavailable
mod embedded;
/// Per-language dictionary store and loader
mod store;

use std::collections::HashMap;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

pub use embedded::embedded;
pub use store::DictionaryStore;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to parse translation JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translation file must contain a JSON object at the top level")]
    NotAnObject,
}

/// Nested mapping from dotted key path to display string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Top-level JSON object
    root: Map<String, Value>,
}

impl Dictionary {
    /// # Errors
    /// Malformed JSON, or a top-level value that is not an object
    pub fn from_json(text: &str) -> Result<Self, DictionaryError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// # Errors
    /// `value` is not an object
    pub fn from_value(value: Value) -> Result<Self, DictionaryError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(DictionaryError::NotAnObject),
        }
    }

    /// Walks `key` segment by segment. Missing segments, non-string leaves and empty
    /// strings all resolve to `None`.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut value = self.root.get(segments.next()?)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        value.as_str().filter(|s| !s.is_empty())
    }

    /// Flatten into a dotted-key map of string leaves.
    ///
    /// # Examples
    /// ```
    /// use estate_dashboard_shell::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::from_json(r#"{"nav": {"title": "Property Management"}}"#).unwrap();
    /// let flattened = dictionary.flatten();
    /// assert_eq!(flattened.get("nav.title"), Some(&"Property Management".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for (key, value) in &self.root {
            flatten_value(value, key, &mut result);
        }
        result
    }
}

/// Recursive step of [`Dictionary::flatten`].
fn flatten_value(value: &Value, prefix: &str, result: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_value(child, &format!("{prefix}.{key}"), result);
            }
        }
        Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}
