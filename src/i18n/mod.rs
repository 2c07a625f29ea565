//! Language Manager: active language, dictionary lookup, document retranslation.
/// Storage-backed language manager
mod manager;

pub use manager::LanguageManager;

use crate::dom::Document;
use crate::language::Language;

/// Attribute carrying an element's dotted translation key.
pub const TRANSLATE_ATTRIBUTE: &str = "data-translate";

/// Translation lookups and document retranslation.
pub trait TranslationService: Send + Sync {
    fn current_language(&self) -> Language;

    /// Switches language and retranslates `doc`. Unsupported codes fall back to the
    /// default language, which is returned.
    fn set_language(&mut self, doc: &mut Document, code: &str) -> Language;

    /// Leaf string for `key` in the current language.
    fn get_translation(&self, key: &str) -> Option<&str>;

    /// Translation for `key`, or `default` when unresolved or not yet initialized.
    fn t(&self, key: &str, default: &str) -> String;

    /// Rewrites the text of every `data-translate` element whose key resolves.
    /// Returns how many elements were rewritten.
    fn translate_document(&self, doc: &mut Document) -> usize;
}
