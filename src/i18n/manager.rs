use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::{
    TRANSLATE_ATTRIBUTE,
    TranslationService,
};
use crate::dictionary::DictionaryStore;
use crate::dom::{
    Document,
    NodeId,
    Selector,
};
use crate::events::{
    LanguageChanged,
    ListenerId,
    Listeners,
};
use crate::fetch::Fetcher;
use crate::language::Language;
use crate::storage::Storage;

/// Id of the header language `<select>`
const SELECTOR_ID: &str = "languageSelector";
/// Class shared by every other language `<select>`
const SELECTOR_CLASS: &str = "language-selector";

/// 言語状態と辞書を管理する
pub struct LanguageManager {
    /// 言語設定の永続化先
    storage: Arc<dyn Storage>,
    /// 言語設定のストレージキー
    language_key: String,
    /// 未対応コードの代替言語
    default_language: Language,
    /// 現在の言語
    current: Language,
    /// 言語ごとの辞書
    dictionaries: DictionaryStore,
    /// 初期化済みフラグ（`t` はそれまでデフォルト値を返す）
    initialized: bool,
    /// 言語変更の通知先
    listeners: Listeners<LanguageChanged>,
}

impl fmt::Debug for LanguageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageManager")
            .field("current", &self.current)
            .field("default_language", &self.default_language)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl LanguageManager {
    /// 新しい LanguageManager を作成
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        default_language: Language,
        language_key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            language_key: language_key.into(),
            default_language,
            current: default_language,
            dictionaries: DictionaryStore::new(),
            initialized: false,
            listeners: Listeners::new(),
        }
    }

    /// 辞書を読み込み、開始言語を決定して適用する
    ///
    /// 開始言語の優先順位: 保存済みの設定 → ブラウザのロケール → デフォルト言語
    pub async fn initialize(
        &mut self,
        doc: &mut Document,
        fetcher: &dyn Fetcher,
        prefix: &str,
        browser_locale: Option<&str>,
    ) -> Language {
        self.dictionaries = DictionaryStore::load(fetcher, prefix).await;

        let stored = self.storage.get(&self.language_key);
        let starting = stored
            .as_deref()
            .and_then(Language::from_code)
            .or_else(|| browser_locale.and_then(Language::from_locale))
            .unwrap_or(self.default_language);
        tracing::debug!(
            stored = stored.as_deref(),
            browser_locale,
            starting = %starting,
            "Resolved starting language"
        );

        let language = self.set_language(doc, starting.code());
        self.initialized = true;
        self.warn_missing_keys(doc);
        tracing::info!(language = %language, "Language manager initialized");
        language
    }

    /// 辞書を直接差し替える（ネットワークを使わない構成向け）
    pub fn set_dictionaries(&mut self, dictionaries: DictionaryStore) {
        self.dictionaries = dictionaries;
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn supported_languages(&self) -> &'static [Language] {
        &Language::ALL
    }

    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        Language::from_code(code).is_some_and(|language| self.supported_languages().contains(&language))
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&LanguageChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// 言語セレクターの表示値を同期する
    fn sync_selectors(doc: &mut Document, language: Language) {
        let mut selectors: Vec<NodeId> = doc.select_all(&Selector::class(SELECTOR_CLASS));
        if let Some(by_id) = doc.get_element_by_id(SELECTOR_ID)
            && !selectors.contains(&by_id)
        {
            selectors.push(by_id);
        }
        for node in selectors {
            doc.set_attribute(node, "value", language.code());
        }
    }

    /// ドキュメント内で使われているが辞書に存在しないキーを警告する
    fn warn_missing_keys(&self, doc: &Document) {
        let keys: BTreeSet<&str> = doc
            .select_all(&Selector::has_attribute(TRANSLATE_ATTRIBUTE))
            .into_iter()
            .filter_map(|node| doc.attribute(node, TRANSLATE_ATTRIBUTE))
            .collect();

        for (language, key) in self.dictionaries.missing_keys(keys.iter().copied()) {
            tracing::warn!(language = %language, key, "Translation key is missing");
        }
    }
}

impl TranslationService for LanguageManager {
    fn current_language(&self) -> Language {
        self.current
    }

    fn set_language(&mut self, doc: &mut Document, code: &str) -> Language {
        let language = Language::from_code(code).unwrap_or_else(|| {
            tracing::warn!(
                code,
                fallback = %self.default_language,
                "Unsupported language, using default"
            );
            self.default_language
        });

        self.current = language;
        doc.set_lang(language.code());
        Self::sync_selectors(doc, language);
        let translated = self.translate_document(doc);

        if let Err(e) = self.storage.set(&self.language_key, language.code()) {
            tracing::warn!(error = %e, "Failed to persist language preference");
        }

        self.listeners.emit(&LanguageChanged {
            language,
            dictionary: self.dictionaries.get(language).cloned().unwrap_or_default(),
        });
        tracing::info!(language = %language, translated, "Language changed");
        language
    }

    fn get_translation(&self, key: &str) -> Option<&str> {
        self.dictionaries.get(self.current)?.resolve(key)
    }

    fn t(&self, key: &str, default: &str) -> String {
        if !self.initialized {
            return default.to_string();
        }
        self.get_translation(key).unwrap_or(default).to_string()
    }

    fn translate_document(&self, doc: &mut Document) -> usize {
        let Some(dictionary) = self.dictionaries.get(self.current) else {
            tracing::error!(language = %self.current, "No translations found for language");
            return 0;
        };

        let mut translated = 0;
        for node in doc.select_all(&Selector::has_attribute(TRANSLATE_ATTRIBUTE)) {
            let Some(text) =
                doc.attribute(node, TRANSLATE_ATTRIBUTE).and_then(|key| dictionary.resolve(key))
            else {
                continue;
            };
            doc.set_text_content(node, text);
            translated += 1;
        }
        translated
    }
}
