//! Built-in fragment markup, used when the component file cannot be fetched.

/// Sidebar fragment. Every visible label carries a `data-translate` key.
pub const SIDEBAR: &str = r#"<aside class="sidebar">
    <div class="sidebar-header">
        <h1>
            <i class="fas fa-building"></i>
            <span class="sidebar-title" data-translate="nav.title">Property Management</span>
        </h1>
    </div>
    <nav class="sidebar-nav">
        <ul class="nav-menu">
            <li class="nav-item">
                <a href="home.html" class="nav-link" data-page="home">
                    <i class="fas fa-th-large"></i>
                    <span class="nav-text" data-translate="nav.dashboard">Dashboard</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="customers.html" class="nav-link" data-page="customers">
                    <i class="fas fa-users"></i>
                    <span class="nav-text" data-translate="nav.customers">Customers</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="properties.html" class="nav-link" data-page="properties">
                    <i class="fas fa-building"></i>
                    <span class="nav-text" data-translate="nav.properties">Properties</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="employees.html" class="nav-link" data-page="employees">
                    <i class="fas fa-user-tie"></i>
                    <span class="nav-text" data-translate="nav.employees">Employees</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="maintenance.html" class="nav-link" data-page="maintenance">
                    <i class="fas fa-tools"></i>
                    <span class="nav-text" data-translate="nav.maintenance">Maintenance</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="finances.html" class="nav-link" data-page="finances">
                    <i class="fas fa-chart-line"></i>
                    <span class="nav-text" data-translate="nav.finances">Finances</span>
                </a>
            </li>
            <li class="nav-item">
                <a href="settings.html" class="nav-link" data-page="settings">
                    <i class="fas fa-cog"></i>
                    <span class="nav-text" data-translate="nav.settings">Settings</span>
                </a>
            </li>
        </ul>
    </nav>
    <div class="sidebar-footer">
        <div class="user-profile">
            <img src="https://via.placeholder.com/40" alt="User Avatar">
            <div class="user-info">
                <div class="user-name" data-translate="user.name">Admin User</div>
                <div class="user-role" data-translate="user.role">Administrator</div>
            </div>
        </div>
    </div>
    <button class="sidebar-collapse-btn" id="sidebarCollapseBtn" aria-label="Toggle sidebar">
        <i class="fas fa-chevron-left"></i>
    </button>
</aside>"#;

/// Built-in markup for a component name.
#[must_use]
pub fn template(name: &str) -> Option<&'static str> {
    match name {
        "sidebar" => Some(SIDEBAR),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::dictionary::embedded;
    use crate::dom::Document;
    use crate::language::Language;

    #[googletest::test]
    fn sidebar_template_parses_with_every_nav_entry() {
        let doc = Document::parse(SIDEBAR).unwrap();

        let pages: Vec<String> = doc
            .query_selector_all(".nav-link")
            .unwrap()
            .into_iter()
            .filter_map(|link| doc.attribute(link, "data-page").map(str::to_string))
            .collect();
        expect_that!(
            pages,
            elements_are![
                eq("home"),
                eq("customers"),
                eq("properties"),
                eq("employees"),
                eq("maintenance"),
                eq("finances"),
                eq("settings"),
            ]
        );
        expect_that!(doc.get_element_by_id("sidebarCollapseBtn"), some(anything()));
    }

    #[googletest::test]
    fn every_template_key_resolves_in_every_language() {
        let doc = Document::parse(SIDEBAR).unwrap();
        let keys: Vec<String> = doc
            .query_selector_all("[data-translate]")
            .unwrap()
            .into_iter()
            .filter_map(|node| doc.attribute(node, "data-translate").map(str::to_string))
            .collect();

        expect_that!(keys.len(), eq(10));
        for language in Language::ALL {
            let dictionary = embedded(language);
            for key in &keys {
                expect_that!(dictionary.resolve(key), some(anything()));
            }
        }
    }

    #[googletest::test]
    fn unknown_components_have_no_template() {
        expect_that!(template("header"), none());
    }
}
