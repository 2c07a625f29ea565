//! Startup of a dashboard page served from a site directory on disk

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use estate_dashboard_shell::AppContext;
use estate_dashboard_shell::config::ConfigManager;
use estate_dashboard_shell::dom::Document;
use estate_dashboard_shell::events::DashboardReady;
use estate_dashboard_shell::fetch::FileFetcher;
use estate_dashboard_shell::language::Language;
use estate_dashboard_shell::page::{
    Page,
    PageLocation,
};
use estate_dashboard_shell::storage::{
    FileStorage,
    MemoryStorage,
    Storage,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PAGE: &str = r#"<html lang="en"><body><div class="sidebar-container"></div><main><h1 data-translate="dashboard.title">Dashboard</h1><select id="languageSelector" value="en"></select></main></body></html>"#;

const SIDEBAR: &str = r#"<aside class="sidebar"><a class="nav-link" data-page="home" data-translate="nav.dashboard">Dashboard</a><a class="nav-link" data-page="customers" data-translate="nav.customers">Customers</a><button id="sidebarCollapseBtn">toggle</button></aside>"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Site with a nested customers page and a zero settle delay.
fn site() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, ".dashboard-shell.json", r#"{"settleDelayMs": 0}"#);
    write(root, "pages/customers.html", PAGE);
    write(
        root,
        "translations/ru.json",
        r#"{"nav": {"dashboard": "Главная", "customers": "Клиенты"}, "dashboard": {"title": "Панель"}}"#,
    );
    write(
        root,
        "translations/en.json",
        r#"{"nav": {"dashboard": "Home", "customers": "Clients"}, "dashboard": {"title": "Overview"}}"#,
    );
    temp_dir
}

fn context(root: &Path, storage: Arc<dyn Storage>) -> AppContext {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(root.to_path_buf())).unwrap();
    let page_path = root.join("pages/customers.html");

    AppContext::new(
        config_manager.get_settings(),
        PageLocation::new(page_path.to_string_lossy()),
        storage,
        Arc::new(MemoryStorage::new()),
        Arc::new(FileFetcher::new(root.join("pages"))),
        Some("en-US".to_string()),
    )
}

fn text(doc: &Document, selector: &str) -> String {
    doc.text_content(doc.query_selector(selector).unwrap().unwrap())
}

#[tokio::test]
async fn nested_page_loads_fetched_fragment_and_stored_language() {
    let temp_dir = site();
    let root = temp_dir.path();
    write(root, "components/sidebar.html", SIDEBAR);
    let storage_path = root.join("storage.json");
    fs::write(&storage_path, r#"{"language": "ru", "sidebarCollapsed": "true"}"#).unwrap();

    let storage = Arc::new(FileStorage::open(&storage_path).unwrap());
    let mut context = context(root, storage);
    let mut doc = Document::parse(PAGE).unwrap();

    let ready = context.initialize(&mut doc).await;

    assert_eq!(ready, DashboardReady { page: Page::Customers, language: Language::Ru });
    assert_eq!(doc.lang(), Some("ru"));
    assert_eq!(text(&doc, r#"[data-translate="nav.customers"]"#), "Клиенты");
    assert_eq!(text(&doc, "h1"), "Панель");
    assert_eq!(context.loader().lock().await.used_fallback("sidebar"), Some(false));

    let sidebar = doc.query_selector(".sidebar").unwrap().unwrap();
    assert!(doc.has_class(sidebar, "collapsed"));
    let active = doc.query_selector(".nav-link.active").unwrap().unwrap();
    assert_eq!(doc.attribute(active, "data-page"), Some("customers"));
}

#[tokio::test]
async fn missing_fragment_falls_back_to_built_in_sidebar() {
    let temp_dir = site();
    let mut context = context(temp_dir.path(), Arc::new(MemoryStorage::new()));
    let mut doc = Document::parse(PAGE).unwrap();

    let ready = context.initialize(&mut doc).await;

    assert_eq!(ready.language, Language::En);
    assert_eq!(context.loader().lock().await.used_fallback("sidebar"), Some(true));
    assert_eq!(text(&doc, r#"[data-translate="nav.customers"]"#), "Clients");
    assert_eq!(text(&doc, r#"[data-translate="nav.settings"]"#), "Settings");
}

#[tokio::test]
async fn language_switch_is_persisted_to_storage_file() {
    let temp_dir = site();
    let root = temp_dir.path();
    let storage_path = root.join("storage.json");
    let storage = Arc::new(FileStorage::open(&storage_path).unwrap());
    let mut context = context(root, storage);
    let mut doc = Document::parse(PAGE).unwrap();
    context.initialize(&mut doc).await;

    let applied = context.change_language(&mut doc, "ru").await;

    assert_eq!(applied, Language::Ru);
    assert_eq!(text(&doc, "h1"), "Панель");
    let selector = doc.query_selector("#languageSelector").unwrap().unwrap();
    assert_eq!(doc.attribute(selector, "value"), Some("ru"));

    let reopened = FileStorage::open(&storage_path).unwrap();
    assert_eq!(reopened.get("language"), Some("ru".to_string()));
}
