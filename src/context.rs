//! Application context: the one place the shared services are wired together.
//!
//! # Lock Order
//!
//! `loader` and `language` are separate `tokio::sync::Mutex`es shared with the
//! sidebar controller. No code path holds both: the context locks `language` only
//! while the sidebar is idle, and the sidebar itself releases the loader before it
//! locks the translator.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::component::{
    ComponentLoader,
    FragmentLoader,
};
use crate::config::ShellSettings;
use crate::dom::{
    Document,
    NodeId,
};
use crate::events::{
    DashboardReady,
    ListenerId,
    Listeners,
};
use crate::fetch::Fetcher;
use crate::i18n::{
    LanguageManager,
    TranslationService,
};
use crate::language::Language;
use crate::page::{
    Page,
    PageLocation,
};
use crate::sidebar::{
    SidebarAction,
    SidebarController,
    SidebarOptions,
};
use crate::storage::Storage;

/// Shared services for one page view.
pub struct AppContext {
    /// Where the page lives; decides the active nav link and the path prefix
    location: PageLocation,
    /// `""` or `"../"`
    prefix: &'static str,
    /// Transport for dictionaries; also held by the loader
    fetcher: Arc<dyn Fetcher>,
    /// Locale reported by the environment, if any
    browser_locale: Option<String>,
    /// Shared with the sidebar as a `FragmentLoader`
    loader: Arc<Mutex<ComponentLoader>>,
    /// Shared with the sidebar as a `TranslationService`
    language: Arc<Mutex<LanguageManager>>,
    /// Sidebar lifecycle and click handling
    sidebar: SidebarController,
    /// Notified once `initialize` finishes
    ready: Listeners<DashboardReady>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("location", &self.location)
            .field("prefix", &self.prefix)
            .field("browser_locale", &self.browser_locale)
            .field("sidebar", &self.sidebar)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds every service from validated settings.
    #[must_use]
    pub fn new(
        settings: &ShellSettings,
        location: PageLocation,
        storage: Arc<dyn Storage>,
        session: Arc<dyn Storage>,
        fetcher: Arc<dyn Fetcher>,
        browser_locale: Option<String>,
    ) -> Self {
        let prefix = location.path_prefix(&settings.nested_path_marker);
        let page = location.page();

        let loader = Arc::new(Mutex::new(ComponentLoader::new(Arc::clone(&fetcher), prefix)));
        let language = Arc::new(Mutex::new(LanguageManager::new(
            Arc::clone(&storage),
            settings.default_language(),
            settings.storage_keys.language.clone(),
        )));

        let fragments: Arc<Mutex<dyn FragmentLoader>> = loader.clone();
        let translator: Arc<Mutex<dyn TranslationService>> = language.clone();
        let sidebar = SidebarController::new(
            fragments,
            translator,
            storage,
            session,
            SidebarOptions::from_settings(settings),
            page,
        );

        tracing::debug!(page = %page, prefix, "Application context created");
        Self {
            location,
            prefix,
            fetcher,
            browser_locale,
            loader,
            language,
            sidebar,
            ready: Listeners::new(),
        }
    }

    /// Startup sequence: language, then the sidebar, then `DashboardReady`.
    ///
    /// A sidebar that cannot be loaded is logged and does not stop the page from
    /// becoming ready.
    pub async fn initialize(&mut self, doc: &mut Document) -> DashboardReady {
        let language = self
            .language
            .lock()
            .await
            .initialize(doc, self.fetcher.as_ref(), self.prefix, self.browser_locale.as_deref())
            .await;

        self.sidebar.restore_collapsed_state(doc);
        if !self.sidebar.load(doc).await {
            tracing::warn!("Dashboard starting without a sidebar");
        }

        let event = DashboardReady { page: self.location.page(), language };
        self.ready.emit(&event);
        tracing::info!(page = %event.page, language = %event.language, "Dashboard ready");
        event
    }

    /// Language selector change.
    pub async fn change_language(&self, doc: &mut Document, code: &str) -> Language {
        self.language.lock().await.set_language(doc, code)
    }

    /// Translation for `key` in the current language.
    pub async fn t(&self, key: &str, default: &str) -> String {
        self.language.lock().await.t(key, default)
    }

    /// Click inside the page, forwarded to the sidebar handlers.
    pub fn handle_click(
        &self,
        doc: &mut Document,
        target: NodeId,
        viewport_width: u32,
    ) -> Vec<SidebarAction> {
        self.sidebar.handle_click(doc, target, viewport_width)
    }

    pub fn subscribe_ready(
        &mut self,
        callback: impl Fn(&DashboardReady) + Send + Sync + 'static,
    ) -> ListenerId {
        self.ready.subscribe(callback)
    }

    pub fn unsubscribe_ready(&mut self, id: ListenerId) -> bool {
        self.ready.unsubscribe(id)
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.location.page()
    }

    #[must_use]
    pub const fn sidebar(&self) -> &SidebarController {
        &self.sidebar
    }

    pub const fn sidebar_mut(&mut self) -> &mut SidebarController {
        &mut self.sidebar
    }

    /// Shared component loader, for pages that inject their own fragments.
    #[must_use]
    pub fn loader(&self) -> Arc<Mutex<ComponentLoader>> {
        Arc::clone(&self.loader)
    }

    /// Shared language manager, for subscribing to language changes.
    #[must_use]
    pub fn language_manager(&self) -> Arc<Mutex<LanguageManager>> {
        Arc::clone(&self.language)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use googletest::prelude::*;

    use super::*;
    use crate::sidebar::SidebarState;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{
        StaticFetcher,
        element,
        page_with_empty_sidebar,
    };

    struct Fixture {
        context: AppContext,
        storage: Arc<MemoryStorage>,
        fetcher: Arc<StaticFetcher>,
    }

    fn fixture(
        pathname: &str,
        storage: MemoryStorage,
        fetcher: StaticFetcher,
        locale: Option<&str>,
    ) -> Fixture {
        let settings = ShellSettings { settle_delay_ms: 0, ..ShellSettings::default() };
        let storage = Arc::new(storage);
        let fetcher = Arc::new(fetcher);
        let durable: Arc<dyn Storage> = storage.clone();
        let transport: Arc<dyn Fetcher> = fetcher.clone();
        let context = AppContext::new(
            &settings,
            PageLocation::new(pathname),
            durable,
            Arc::new(MemoryStorage::new()),
            transport,
            locale.map(str::to_string),
        );
        Fixture { context, storage, fetcher }
    }

    #[tokio::test]
    #[googletest::test]
    async fn initialize_applies_stored_language_and_loads_sidebar() {
        let mut fixture = fixture(
            "/home.html",
            MemoryStorage::with_values([("language", "ru")]),
            StaticFetcher::new(),
            Some("hy-AM"),
        );
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        fixture.context.subscribe_ready(move |event| sink.lock().unwrap().push(*event));
        let mut doc = page_with_empty_sidebar();

        let ready = fixture.context.initialize(&mut doc).await;

        expect_that!(ready, eq(DashboardReady { page: Page::Home, language: Language::Ru }));
        expect_that!(*seen.lock().unwrap(), elements_are![eq(&ready)]);
        expect_that!(doc.lang(), some(eq("ru")));
        expect_that!(fixture.context.sidebar().state(), eq(SidebarState::Loaded));
        expect_that!(
            doc.text_content(element(&doc, r#"[data-translate="nav.dashboard"]"#)),
            eq("Панель управления")
        );
        expect_that!(doc.query_selector_all(".sidebar").unwrap().len(), eq(1));
    }

    #[tokio::test]
    #[googletest::test]
    async fn browser_locale_applies_without_stored_preference() {
        let mut fixture =
            fixture("/home.html", MemoryStorage::new(), StaticFetcher::new(), Some("hy-AM"));
        let mut doc = page_with_empty_sidebar();

        let ready = fixture.context.initialize(&mut doc).await;

        expect_that!(ready.language, eq(Language::Hy));
        expect_that!(fixture.storage.get("language"), some(eq("hy")));
    }

    #[tokio::test]
    #[googletest::test]
    async fn nested_pages_fetch_through_parent_directory() {
        let mut fixture =
            fixture("/pages/customers.html", MemoryStorage::new(), StaticFetcher::new(), None);
        let mut doc = page_with_empty_sidebar();

        let ready = fixture.context.initialize(&mut doc).await;

        expect_that!(ready, eq(DashboardReady { page: Page::Customers, language: Language::En }));
        expect_that!(fixture.fetcher.requested(), each(starts_with("../")));
        expect_that!(fixture.fetcher.requested(), contains(eq("../components/sidebar.html")));
        expect_that!(
            doc.has_class(element(&doc, r#".nav-link[data-page="customers"]"#), "active"),
            eq(true)
        );
    }

    #[tokio::test]
    #[googletest::test]
    async fn change_language_retranslates_sidebar_and_persists() {
        let mut fixture = fixture("/home.html", MemoryStorage::new(), StaticFetcher::new(), None);
        let mut doc = page_with_empty_sidebar();
        fixture.context.initialize(&mut doc).await;

        let applied = fixture.context.change_language(&mut doc, "hy").await;

        expect_that!(applied, eq(Language::Hy));
        expect_that!(fixture.storage.get("language"), some(eq("hy")));
        expect_that!(
            doc.text_content(element(&doc, r#"[data-translate="nav.settings"]"#)),
            eq("Կարգավորումներ")
        );
        expect_that!(fixture.context.t("nav.title", "?").await, eq("Անշարժ գույքի կառավարում"));
    }

    #[tokio::test]
    #[googletest::test]
    async fn clicks_reach_the_sidebar_after_startup() {
        let mut fixture = fixture("/home.html", MemoryStorage::new(), StaticFetcher::new(), None);
        let mut doc = page_with_empty_sidebar();
        fixture.context.initialize(&mut doc).await;
        let button = element(&doc, "#sidebarCollapseBtn");

        let actions = fixture.context.handle_click(&mut doc, button, 1280);

        expect_that!(actions, elements_are![eq(&SidebarAction::CollapseToggled { collapsed: true })]);
        expect_that!(fixture.storage.get("sidebarCollapsed"), some(eq("true")));
    }

    #[tokio::test]
    #[googletest::test]
    async fn ready_fires_even_without_sidebar_container() {
        let mut fixture = fixture("/home.html", MemoryStorage::new(), StaticFetcher::new(), None);
        let mut doc = Document::parse("<html><body><main></main></body></html>").unwrap();

        let ready = fixture.context.initialize(&mut doc).await;

        expect_that!(ready.page, eq(Page::Home));
        expect_that!(fixture.context.sidebar().state(), eq(SidebarState::Unloaded));
    }
}
