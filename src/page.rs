//! Current page identification from the URL path.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Navigation entry a page belongs to. Matches the `data-page` marker on nav links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Customers,
    Properties,
    Employees,
    Maintenance,
    Finances,
    Settings,
}

impl Page {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Customers => "customers",
            Self::Properties => "properties",
            Self::Employees => "employees",
            Self::Maintenance => "maintenance",
            Self::Finances => "finances",
            Self::Settings => "settings",
        }
    }

    /// Static filename → page mapping. Detail pages resolve to their list page.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        match filename {
            "home" => Some(Self::Home),
            "customers" => Some(Self::Customers),
            "properties" | "property-detail" => Some(Self::Properties),
            "employees" => Some(Self::Employees),
            "maintenance" => Some(Self::Maintenance),
            "finances" => Some(Self::Finances),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `window.location` as far as the dashboard cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Path part of the page URL
    pathname: String,
}

impl PageLocation {
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self { pathname: pathname.into() }
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Last path segment without the `.html` extension.
    #[must_use]
    pub fn filename(&self) -> &str {
        let last = self.pathname.rsplit('/').next().unwrap_or_default();
        last.strip_suffix(".html").unwrap_or(last)
    }

    /// Page identifier; unknown filenames fall back to [`Page::Home`].
    #[must_use]
    pub fn page(&self) -> Page {
        let filename = self.filename();
        let page = Page::from_filename(filename).unwrap_or_default();
        tracing::debug!(filename, page = %page, "Mapped location to page");
        page
    }

    /// Relative prefix to reach the site root: `../` inside the nested pages folder.
    #[must_use]
    pub fn path_prefix(&self, nested_marker: &str) -> &'static str {
        if !nested_marker.is_empty() && self.pathname.contains(nested_marker) { "../" } else { "" }
    }
}
