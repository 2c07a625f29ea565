use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    FragmentLoader,
    templates,
};
use crate::dom::{
    Document,
    NodeId,
    Selector,
};
use crate::events::{
    ComponentLoaded,
    ListenerId,
    Listeners,
};
use crate::fetch::Fetcher;

/// Loads `<prefix>components/<name>.html` fragments.
#[derive(Debug)]
pub struct ComponentLoader {
    /// Transport for fragment files
    fetcher: Arc<dyn Fetcher>,
    /// `"../"` on nested pages, otherwise empty
    prefix: String,
    /// Loaded component names, mapped to whether the built-in template was used
    loaded: HashMap<String, bool>,
    /// Notified after every successful injection
    listeners: Listeners<ComponentLoaded>,
}

impl ComponentLoader {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, prefix: impl Into<String>) -> Self {
        Self { fetcher, prefix: prefix.into(), loaded: HashMap::new(), listeners: Listeners::new() }
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&ComponentLoaded) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Loads each `(name, target)` pair in order.
    pub async fn load_all(&mut self, doc: &mut Document, components: &[(&str, &str)]) -> Vec<bool> {
        let mut results = Vec::with_capacity(components.len());
        for (name, target) in components {
            results.push(self.load(doc, name, target).await);
        }

        let succeeded = results.iter().filter(|ok| **ok).count();
        tracing::info!("Loaded {}/{} components successfully", succeeded, components.len());
        results
    }

    /// `Some(true)` when `name` was filled from the built-in template.
    #[must_use]
    pub fn used_fallback(&self, name: &str) -> Option<bool> {
        self.loaded.get(name).copied()
    }

    #[must_use]
    pub fn path_for(&self, name: &str) -> String {
        format!("{}components/{name}.html", self.prefix)
    }

    /// Marks `name` loaded and notifies listeners.
    fn record(&mut self, name: &str, target: &str, fallback: bool) {
        self.loaded.insert(name.to_string(), fallback);
        self.listeners.emit(&ComponentLoaded {
            name: name.to_string(),
            target: target.to_string(),
            fallback,
        });
    }
}

/// Resolves `target` to an element, logging why when it cannot.
fn find_target(doc: &Document, name: &str, target: &str) -> Option<NodeId> {
    let found = match Selector::parse(target) {
        Ok(selector) => doc.select(&selector),
        Err(e) => {
            tracing::error!(component = name, error = %e, "Invalid target selector");
            return None;
        }
    };
    if found.is_none() {
        tracing::error!(component = name, target, "Target selector not found");
    }
    found
}

#[async_trait]
impl FragmentLoader for ComponentLoader {
    async fn load(&mut self, doc: &mut Document, name: &str, target: &str) -> bool {
        let Some(node) = find_target(doc, name, target) else {
            return false;
        };

        if self.loaded.contains_key(name) {
            tracing::debug!(component = name, "Component already loaded");
            return true;
        }

        // Something else already filled the container.
        if doc.has_content(node) {
            tracing::debug!(component = name, "Target already has content, skipping load");
            self.loaded.insert(name.to_string(), false);
            return true;
        }

        let path = self.path_for(name);
        tracing::debug!(component = name, path, "Loading component");

        let response = match self.fetcher.fetch(&path).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::error!(component = name, path, status = response.status, "HTTP error");
                return false;
            }
            Err(e) => {
                tracing::error!(component = name, error = %e, "Error loading component");
                return false;
            }
        };

        if let Err(e) = doc.set_inner_html(node, &response.body) {
            tracing::error!(component = name, error = %e, "Component markup could not be parsed");
            return false;
        }

        tracing::info!(component = name, path, "Component loaded");
        self.record(name, target, false);
        true
    }

    async fn load_with_fallback(&mut self, doc: &mut Document, name: &str, target: &str) -> bool {
        if self.load(doc, name, target).await {
            return true;
        }

        let Some(node) = find_target(doc, name, target) else {
            return false;
        };
        let Some(markup) = templates::template(name) else {
            tracing::error!(component = name, "No fallback markup available");
            return false;
        };

        if let Err(e) = doc.set_inner_html(node, markup) {
            tracing::error!(component = name, error = %e, "Fallback markup could not be parsed");
            return false;
        }

        tracing::info!(component = name, "Component loaded from fallback");
        self.record(name, target, true);
        true
    }

    fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    fn forget(&mut self, name: &str) {
        self.loaded.remove(name);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::{
        StaticFetcher,
        element,
        page_with_empty_sidebar,
    };

    const FRAGMENT: &str =
        r#"<aside class="sidebar"><a class="nav-link" data-page="home">Home</a></aside>"#;

    fn loader(fetcher: StaticFetcher) -> (ComponentLoader, Arc<StaticFetcher>) {
        let fetcher = Arc::new(fetcher);
        (ComponentLoader::new(Arc::clone(&fetcher) as Arc<dyn Fetcher>, ""), fetcher)
    }

    fn record_events(loader: &mut ComponentLoader) -> Arc<Mutex<Vec<ComponentLoaded>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        loader.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[tokio::test]
    #[googletest::test]
    async fn injects_fetched_fragment_and_notifies() {
        let (mut loader, _) = loader(StaticFetcher::new().with("components/sidebar.html", FRAGMENT));
        let events = record_events(&mut loader);
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        assert_that!(ok, eq(true));
        let container = element(&doc, ".sidebar-container");
        expect_that!(doc.inner_html(container), eq(FRAGMENT));
        expect_that!(loader.used_fallback("sidebar"), some(eq(false)));
        expect_that!(
            *events.lock().unwrap(),
            elements_are![eq(&ComponentLoaded {
                name: "sidebar".to_string(),
                target: ".sidebar-container".to_string(),
                fallback: false,
            })]
        );
    }

    #[tokio::test]
    #[googletest::test]
    async fn missing_target_is_a_failure_without_fetch() {
        let (mut loader, fetcher) = loader(StaticFetcher::new());
        let mut doc = page_with_empty_sidebar();
        let before = doc.to_html();

        expect_that!(loader.load(&mut doc, "sidebar", "#missing").await, eq(false));
        expect_that!(loader.load_with_fallback(&mut doc, "sidebar", "#missing").await, eq(false));
        expect_that!(loader.load(&mut doc, "sidebar", "div > aside").await, eq(false));

        expect_that!(fetcher.request_count(), eq(0));
        expect_that!(doc.to_html(), eq(&before));
    }

    #[tokio::test]
    #[googletest::test]
    async fn second_load_does_not_fetch_again() {
        let (mut loader, fetcher) =
            loader(StaticFetcher::new().with("components/sidebar.html", FRAGMENT));
        let mut doc = page_with_empty_sidebar();

        loader.load(&mut doc, "sidebar", ".sidebar-container").await;
        let again = loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(again, eq(true));
        expect_that!(fetcher.request_count(), eq(1));
    }

    #[tokio::test]
    #[googletest::test]
    async fn occupied_target_is_recorded_without_fetch() {
        let (mut loader, fetcher) = loader(StaticFetcher::new());
        let mut doc = Document::parse(
            r#"<div class="sidebar-container"><aside class="sidebar">inline</aside></div>"#,
        )
        .unwrap();

        let ok = loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(ok, eq(true));
        expect_that!(loader.is_loaded("sidebar"), eq(true));
        expect_that!(fetcher.request_count(), eq(0));
    }

    #[tokio::test]
    #[googletest::test]
    async fn whitespace_only_target_counts_as_empty() {
        let (mut loader, fetcher) =
            loader(StaticFetcher::new().with("components/sidebar.html", FRAGMENT));
        let mut doc = Document::parse("<div class=\"sidebar-container\">\n   </div>").unwrap();

        expect_that!(loader.load(&mut doc, "sidebar", ".sidebar-container").await, eq(true));
        expect_that!(fetcher.request_count(), eq(1));
    }

    #[tokio::test]
    #[googletest::test]
    async fn http_error_leaves_target_untouched() {
        let (mut loader, _) =
            loader(StaticFetcher::new().with_status("components/sidebar.html", 500));
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(ok, eq(false));
        expect_that!(loader.is_loaded("sidebar"), eq(false));
        expect_that!(doc.has_content(element(&doc, ".sidebar-container")), eq(false));
    }

    #[tokio::test]
    #[googletest::test]
    async fn falls_back_to_template_on_404() {
        let (mut loader, _) = loader(StaticFetcher::new());
        let events = record_events(&mut loader);
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load_with_fallback(&mut doc, "sidebar", ".sidebar-container").await;

        assert_that!(ok, eq(true));
        expect_that!(doc.query_selector("#sidebarCollapseBtn").unwrap(), some(anything()));
        expect_that!(loader.used_fallback("sidebar"), some(eq(true)));
        expect_that!(events.lock().unwrap().first().map(|event| event.fallback), some(eq(true)));
    }

    #[tokio::test]
    #[googletest::test]
    async fn falls_back_on_transport_error() {
        let (mut loader, _) = loader(StaticFetcher::new().failing("components/sidebar.html"));
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load_with_fallback(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(ok, eq(true));
        expect_that!(loader.used_fallback("sidebar"), some(eq(true)));
    }

    #[tokio::test]
    #[googletest::test]
    async fn unknown_component_without_template_fails() {
        let (mut loader, _) = loader(StaticFetcher::new());
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load_with_fallback(&mut doc, "header", ".sidebar-container").await;

        expect_that!(ok, eq(false));
        expect_that!(doc.has_content(element(&doc, ".sidebar-container")), eq(false));
    }

    #[tokio::test]
    #[googletest::test]
    async fn unparsable_fragment_is_a_failure() {
        let (mut loader, _) = loader(
            StaticFetcher::new().with("components/sidebar.html", "<aside><!-- unterminated"),
        );
        let mut doc = page_with_empty_sidebar();

        let ok = loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(ok, eq(false));
        expect_that!(doc.has_content(element(&doc, ".sidebar-container")), eq(false));
    }

    #[tokio::test]
    #[googletest::test]
    async fn nested_pages_fetch_from_parent_directory() {
        let fetcher = Arc::new(StaticFetcher::new().with("../components/sidebar.html", FRAGMENT));
        let mut loader = ComponentLoader::new(Arc::clone(&fetcher) as Arc<dyn Fetcher>, "../");
        let mut doc = page_with_empty_sidebar();

        expect_that!(loader.load(&mut doc, "sidebar", ".sidebar-container").await, eq(true));
        expect_that!(fetcher.requested(), elements_are![eq("../components/sidebar.html")]);
    }

    #[tokio::test]
    #[googletest::test]
    async fn forget_allows_reload() {
        let (mut loader, fetcher) =
            loader(StaticFetcher::new().with("components/sidebar.html", FRAGMENT));
        let mut doc = page_with_empty_sidebar();
        let container = element(&doc, ".sidebar-container");

        loader.load(&mut doc, "sidebar", ".sidebar-container").await;
        loader.forget("sidebar");
        doc.set_inner_html(container, "").unwrap();
        loader.load(&mut doc, "sidebar", ".sidebar-container").await;

        expect_that!(fetcher.request_count(), eq(2));
    }

    #[tokio::test]
    #[googletest::test]
    async fn load_all_reports_each_result() {
        let (mut loader, _) = loader(StaticFetcher::new().with("components/sidebar.html", FRAGMENT));
        let mut doc = page_with_empty_sidebar();

        let results = loader
            .load_all(&mut doc, &[("sidebar", ".sidebar-container"), ("header", "#header")])
            .await;

        expect_that!(results, elements_are![eq(&true), eq(&false)]);
    }
}
