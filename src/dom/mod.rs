//! In-memory page document: the DOM contract the dashboard scripts run against.
/// Document tree and node operations
mod document;
/// DOM errors
mod error;
/// Lenient markup reader
mod parse;
/// CSS selector subset
mod selector;

pub use document::{
    Document,
    NodeId,
    escape_text,
};
pub use error::DomError;
pub use selector::Selector;
