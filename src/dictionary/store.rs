use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;

use super::{
    Dictionary,
    embedded,
};
use crate::fetch::Fetcher;
use crate::language::Language;

/// One dictionary per supported language.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    /// Shared so listeners can keep a dictionary past a language switch
    dictionaries: HashMap<Language, Arc<Dictionary>>,
}

impl DictionaryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the built-in dictionaries.
    #[must_use]
    pub fn from_embedded() -> Self {
        let mut store = Self::new();
        for language in Language::ALL {
            store.insert(language, embedded(language));
        }
        store
    }

    /// Fetches `<prefix>translations/<code>.json` for every language concurrently.
    ///
    /// A language whose file cannot be fetched or parsed gets its built-in
    /// dictionary. The other languages are unaffected.
    pub async fn load(fetcher: &dyn Fetcher, prefix: &str) -> Self {
        let requests = Language::ALL.map(|language| async move {
            let dictionary = fetch_dictionary(fetcher, prefix, language).await;
            (language, dictionary)
        });

        let mut store = Self::new();
        for (language, dictionary) in join_all(requests).await {
            store.insert(language, dictionary);
        }
        store
    }

    pub fn insert(&mut self, language: Language, dictionary: Dictionary) {
        self.dictionaries.insert(language, Arc::new(dictionary));
    }

    #[must_use]
    pub fn get(&self, language: Language) -> Option<&Arc<Dictionary>> {
        self.dictionaries.get(&language)
    }

    /// `(language, key)` pairs that do not resolve, in language order.
    #[must_use]
    pub fn missing_keys<I, S>(&self, keys: I) -> Vec<(Language, String)>
    where
        I: IntoIterator<Item = S> + Clone,
        S: AsRef<str>,
    {
        Language::ALL
            .into_iter()
            .flat_map(|language| {
                let dictionary = self.get(language);
                keys.clone()
                    .into_iter()
                    .filter(move |key| dictionary.and_then(|d| d.resolve(key.as_ref())).is_none())
                    .map(move |key| (language, key.as_ref().to_string()))
            })
            .collect()
    }
}

/// One language's dictionary, or its built-in one on any failure.
async fn fetch_dictionary(fetcher: &dyn Fetcher, prefix: &str, language: Language) -> Dictionary {
    let path = format!("{prefix}translations/{}.json", language.code());

    let response = match fetcher.fetch(&path).await {
        Ok(response) if response.is_success() => response,
        Ok(response) => {
            tracing::warn!(
                language = %language,
                status = response.status,
                "Failed to load translations, using built-in dictionary"
            );
            return embedded(language);
        }
        Err(e) => {
            tracing::warn!(
                language = %language,
                error = %e,
                "Failed to load translations, using built-in dictionary"
            );
            return embedded(language);
        }
    };

    match Dictionary::from_json(&response.body) {
        Ok(dictionary) => {
            tracing::debug!(language = %language, path, "Loaded translations");
            dictionary
        }
        Err(e) => {
            tracing::warn!(
                language = %language,
                error = %e,
                "Invalid translation file, using built-in dictionary"
            );
            embedded(language)
        }
    }
}
