use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::markup::{
    ACTIVE,
    COLLAPSE_BUTTON_ID,
    COLLAPSED,
    MOBILE_TOGGLE_CLASS,
    NAV_LINK_CLASS,
    PAGE_ATTRIBUTE,
    SHOW,
    SIDEBAR_CLASS,
};
use super::{
    SIDEBAR_COMPONENT,
    SidebarAction,
    SidebarOptions,
    SidebarState,
};
use crate::component::FragmentLoader;
use crate::dom::{
    Document,
    NodeId,
    Selector,
};
use crate::i18n::TranslationService;
use crate::page::Page;
use crate::storage::Storage;

/// Drives the sidebar through `Unloaded → Loaded` and owns its click handling.
///
/// # Lock Order
///
/// The loader and translator are never held at the same time: `load` releases the
/// loader before it locks the translator.
pub struct SidebarController {
    /// Fragment loader shared with the application context
    loader: Arc<Mutex<dyn FragmentLoader>>,
    /// Used to translate the injected fragment
    translator: Arc<Mutex<dyn TranslationService>>,
    /// Durable storage for the collapse flag
    storage: Arc<dyn Storage>,
    /// Session storage for the last clicked page
    session: Arc<dyn Storage>,
    /// Target, breakpoint, settle delay and storage keys
    options: SidebarOptions,
    /// Page whose nav link is marked active
    page: Page,
    /// Lifecycle state
    state: SidebarState,
    /// Click handlers are active
    bound: bool,
}

impl fmt::Debug for SidebarController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarController")
            .field("options", &self.options)
            .field("page", &self.page)
            .field("state", &self.state)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl SidebarController {
    #[must_use]
    pub fn new(
        loader: Arc<Mutex<dyn FragmentLoader>>,
        translator: Arc<Mutex<dyn TranslationService>>,
        storage: Arc<dyn Storage>,
        session: Arc<dyn Storage>,
        options: SidebarOptions,
        page: Page,
    ) -> Self {
        Self {
            loader,
            translator,
            storage,
            session,
            options,
            page,
            state: SidebarState::Unloaded,
            bound: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SidebarState {
        self.state
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Injects the sidebar (fetched or built-in) and wires it up.
    ///
    /// A no-op returning `true` once loaded.
    pub async fn load(&mut self, doc: &mut Document) -> bool {
        if self.state == SidebarState::Loaded {
            tracing::debug!("Sidebar already loaded, skipping initialization");
            return true;
        }

        let injected = self
            .loader
            .lock()
            .await
            .load_with_fallback(doc, SIDEBAR_COMPONENT, &self.options.target)
            .await;
        if !injected {
            tracing::error!(container = %self.options.target, "Failed to load sidebar component");
            return false;
        }
        self.state = SidebarState::Loaded;

        if !self.options.settle_delay.is_zero() {
            tokio::time::sleep(self.options.settle_delay).await;
        }

        self.restore_collapsed_state(doc);
        self.set_active_page(doc);
        self.bind_events();
        let translated = self.translator.lock().await.translate_document(doc);

        tracing::info!(page = %self.page, translated, "Sidebar loaded");
        true
    }

    /// Clears the container and loads the sidebar again.
    pub async fn refresh(&mut self, doc: &mut Document) -> bool {
        tracing::debug!("Refreshing sidebar");
        self.loader.lock().await.forget(SIDEBAR_COMPONENT);

        match Selector::parse(&self.options.target) {
            Ok(selector) => {
                if let Some(container) = doc.select(&selector)
                    && let Err(e) = doc.set_inner_html(container, "")
                {
                    tracing::warn!(error = %e, "Failed to clear sidebar container");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Invalid sidebar target"),
        }

        self.state = SidebarState::Unloaded;
        self.load(doc).await
    }

    /// Marks the nav link for the current page. Returns `false` when none matches.
    pub fn set_active_page(&self, doc: &mut Document) -> bool {
        let links = doc.select_all(&Selector::class(NAV_LINK_CLASS));
        for link in &links {
            doc.remove_class(*link, ACTIVE);
        }

        let page = self.page.as_str();
        let Some(active) =
            links.into_iter().find(|link| doc.attribute(*link, PAGE_ATTRIBUTE) == Some(page))
        else {
            tracing::warn!(page, "Active link not found for page");
            return false;
        };
        doc.add_class(active, ACTIVE);
        tracing::debug!(page, "Active link set");
        true
    }

    /// Enables click handling. Binding again has no further effect.
    pub fn bind_events(&mut self) {
        if self.bound {
            tracing::debug!("Sidebar events already bound");
            return;
        }
        self.bound = true;
        tracing::debug!("Sidebar events bound");
    }

    /// Applies `collapsed` to the sidebar when the stored flag says so.
    pub fn restore_collapsed_state(&self, doc: &mut Document) -> bool {
        if self.storage.get(&self.options.collapsed_key).as_deref() != Some("true") {
            return false;
        }
        let Some(sidebar) = doc.select(&Selector::class(SIDEBAR_CLASS)) else {
            return false;
        };
        doc.add_class(sidebar, COLLAPSED);
        tracing::debug!("Sidebar state restored: collapsed");
        true
    }

    /// Dispatches a click on `target` through the bound handlers.
    ///
    /// Does nothing until [`bind_events`](Self::bind_events) has run.
    pub fn handle_click(
        &self,
        doc: &mut Document,
        target: NodeId,
        viewport_width: u32,
    ) -> Vec<SidebarAction> {
        let mut actions = Vec::new();
        if !self.bound {
            return actions;
        }

        if let Some(action) = self.on_nav_click(doc, target) {
            actions.push(action);
        }
        if let Some(action) = self.on_collapse_click(doc, target) {
            actions.push(action);
        }
        if let Some(action) = Self::on_mobile_toggle_click(doc, target) {
            actions.push(action);
        } else if let Some(action) = self.on_outside_click(doc, target, viewport_width) {
            actions.push(action);
        }
        actions
    }

    /// Delegated nav link click: move `active`, remember the page for the session.
    ///
    /// A link without `data-page` is ignored.
    fn on_nav_click(&self, doc: &mut Document, target: NodeId) -> Option<SidebarAction> {
        let selector = Selector::class(NAV_LINK_CLASS);
        let link = doc.closest(target, &selector)?;
        let page = doc.attribute(link, PAGE_ATTRIBUTE)?.to_string();

        for other in doc.select_all(&selector) {
            doc.remove_class(other, ACTIVE);
        }
        doc.add_class(link, ACTIVE);

        if let Err(e) = self.session.set(&self.options.current_page_key, &page) {
            tracing::warn!(error = %e, "Failed to store current page");
        }
        Some(SidebarAction::Navigated(page))
    }

    /// Collapse button click: toggle and persist `collapsed`.
    fn on_collapse_click(&self, doc: &mut Document, target: NodeId) -> Option<SidebarAction> {
        let button = doc.get_element_by_id(COLLAPSE_BUTTON_ID)?;
        if !doc.contains(button, target) {
            return None;
        }
        let sidebar = doc.select(&Selector::class(SIDEBAR_CLASS))?;

        let collapsed = doc.toggle_class(sidebar, COLLAPSED);
        let value = if collapsed { "true" } else { "false" };
        if let Err(e) = self.storage.set(&self.options.collapsed_key, value) {
            tracing::warn!(error = %e, "Failed to persist sidebar state");
        }
        tracing::debug!(collapsed, "Sidebar collapse toggled");
        Some(SidebarAction::CollapseToggled { collapsed })
    }

    /// Mobile toggle click: toggle `show`.
    fn on_mobile_toggle_click(doc: &mut Document, target: NodeId) -> Option<SidebarAction> {
        let toggle = doc.select(&Selector::class(MOBILE_TOGGLE_CLASS))?;
        if !doc.contains(toggle, target) {
            return None;
        }
        let sidebar = doc.select(&Selector::class(SIDEBAR_CLASS))?;
        let open = doc.toggle_class(sidebar, SHOW);
        Some(SidebarAction::MobileToggled { open })
    }

    /// Click outside an open mobile sidebar on a narrow viewport: close it.
    fn on_outside_click(
        &self,
        doc: &mut Document,
        target: NodeId,
        viewport_width: u32,
    ) -> Option<SidebarAction> {
        if viewport_width > self.options.mobile_breakpoint {
            return None;
        }
        let sidebar = doc.select(&Selector::class(SIDEBAR_CLASS))?;
        if !doc.has_class(sidebar, SHOW) || doc.contains(sidebar, target) {
            return None;
        }
        if let Some(toggle) = doc.select(&Selector::class(MOBILE_TOGGLE_CLASS))
            && doc.contains(toggle, target)
        {
            return None;
        }

        doc.remove_class(sidebar, SHOW);
        Some(SidebarAction::MobileClosed)
    }
}
