use thiserror::Error;

/// Errors raised by the page document model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Selector string could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
    /// Markup could not be parsed into nodes
    #[error("Failed to parse markup: {0}")]
    Markup(String),
}

impl DomError {
    /// Shorthand for [`DomError::Selector`].
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::Selector { selector: selector.to_string(), reason: reason.into() }
    }
}
