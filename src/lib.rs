//! estate-dashboard-shell
//!
//! Client-side scaffolding for a multi-page property management dashboard:
//! shared fragment loading, the sidebar, the active language and display
//! formatting.

pub mod component;
pub mod config;
pub mod context;
pub mod dictionary;
pub mod dom;
pub mod events;
pub mod fetch;
pub mod format;
pub mod i18n;
pub mod language;
pub mod page;
pub mod sidebar;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use context::AppContext;
