//! Component Loader: fetches shared HTML fragments into page containers.
/// Fetching loader with per-name load tracking
mod loader;
/// Built-in fragment markup
pub mod templates;

use async_trait::async_trait;

pub use loader::ComponentLoader;

use crate::dom::Document;

/// Injects named fragments into the document.
///
/// Both operations report failure as `false` and never leave a target partially
/// written.
#[async_trait]
pub trait FragmentLoader: Send + Sync {
    /// Fetches `name` into the element matched by `target`.
    async fn load(&mut self, doc: &mut Document, name: &str, target: &str) -> bool;

    /// [`load`](Self::load), then the built-in template for `name` on failure.
    async fn load_with_fallback(&mut self, doc: &mut Document, name: &str, target: &str) -> bool;

    fn is_loaded(&self, name: &str) -> bool;

    /// Drops `name` from the loaded set so the next load fetches again.
    fn forget(&mut self, name: &str);
}
