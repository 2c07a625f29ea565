//! Sidebar Controller: injects the sidebar, marks the active page, handles clicks.
/// Load state machine and click dispatch
mod controller;

use std::time::Duration;

pub use controller::SidebarController;

use crate::config::ShellSettings;

/// Component name of the sidebar fragment.
pub const SIDEBAR_COMPONENT: &str = "sidebar";

/// Class names and ids shared with the sidebar markup and stylesheet.
pub mod markup {
    /// The `<aside>` the state classes go on
    pub const SIDEBAR_CLASS: &str = "sidebar";
    pub const NAV_LINK_CLASS: &str = "nav-link";
    pub const MOBILE_TOGGLE_CLASS: &str = "mobile-sidebar-toggle";
    pub const COLLAPSE_BUTTON_ID: &str = "sidebarCollapseBtn";
    /// Nav link attribute holding the page identifier
    pub const PAGE_ATTRIBUTE: &str = "data-page";

    pub const ACTIVE: &str = "active";
    pub const COLLAPSED: &str = "collapsed";
    /// Mobile-open state
    pub const SHOW: &str = "show";
}

/// Controller settings derived from [`ShellSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Selector of the container the fragment is injected into
    pub target: String,
    pub mobile_breakpoint: u32,
    pub settle_delay: Duration,
    /// Durable storage key for the collapse flag
    pub collapsed_key: String,
    /// Session storage key for the last clicked page
    pub current_page_key: String,
}

impl SidebarOptions {
    #[must_use]
    pub fn from_settings(settings: &ShellSettings) -> Self {
        Self {
            target: settings.sidebar_target.clone(),
            mobile_breakpoint: settings.mobile_breakpoint,
            settle_delay: settings.settle_delay(),
            collapsed_key: settings.storage_keys.sidebar_collapsed.clone(),
            current_page_key: settings.storage_keys.current_page.clone(),
        }
    }
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self::from_settings(&ShellSettings::default())
    }
}

/// Lifecycle of the sidebar on one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarState {
    #[default]
    Unloaded,
    Loaded,
}

/// Effect of a dispatched click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// A nav link became active; carries its page identifier
    Navigated(String),
    CollapseToggled { collapsed: bool },
    MobileToggled { open: bool },
    /// The mobile sidebar closed because of a click outside it
    MobileClosed,
}
