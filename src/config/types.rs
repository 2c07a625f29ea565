use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::dom::Selector;
use crate::language::Language;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "storageKeys.language")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellSettings {
    /// Used when neither a stored preference nor the browser locale is supported,
    /// and in place of any unsupported code passed to `set_language`.
    pub default_language: String,

    /// Container the sidebar fragment is injected into.
    pub sidebar_target: String,

    /// Pages whose path contains this marker live one directory below the site
    /// root and load fragments and dictionaries through `../`.
    pub nested_path_marker: String,

    /// Viewport widths at or below this close the mobile sidebar on outside clicks.
    pub mobile_breakpoint: u32,

    /// Pause between fragment injection and event binding.
    pub settle_delay_ms: u64,

    pub storage_keys: StorageKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageKeys {
    /// Durable language preference
    pub language: String,
    /// Durable `"true"`/`"false"` collapse flag
    pub sidebar_collapsed: String,
    /// Session-scoped last clicked nav page
    pub current_page: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            language: "language".to_string(),
            sidebar_collapsed: "sidebarCollapsed".to_string(),
            current_page: "currentPage".to_string(),
        }
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            default_language: Language::default().code().to_string(),
            sidebar_target: ".sidebar-container".to_string(),
            nested_path_marker: "/pages/".to_string(),
            mobile_breakpoint: 768,
            settle_delay_ms: 100,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl ShellSettings {
    /// The configured default language. Only meaningful after [`validate`](Self::validate).
    #[must_use]
    pub fn default_language(&self) -> Language {
        Language::from_code(&self.default_language).unwrap_or_default()
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// # Errors
    /// - Unsupported default language
    /// - Sidebar target is not a supported selector
    /// - Empty path marker or storage key
    /// - Zero breakpoint
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if Language::from_code(&self.default_language).is_none() {
            let supported: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Unsupported language '{}'. Supported languages: {}",
                    self.default_language,
                    supported.join(", ")
                ),
            ));
        }

        if let Err(e) = Selector::parse(&self.sidebar_target) {
            errors.push(ValidationError::new("sidebarTarget", e.to_string()));
        }

        if self.nested_path_marker.is_empty() {
            errors.push(ValidationError::new(
                "nestedPathMarker",
                "The marker cannot be empty. Example: \"/pages/\"",
            ));
        }

        if self.mobile_breakpoint == 0 {
            errors.push(ValidationError::new(
                "mobileBreakpoint",
                "The breakpoint must be a positive width in pixels. Example: 768",
            ));
        }

        for (field, key) in [
            ("storageKeys.language", &self.storage_keys.language),
            ("storageKeys.sidebarCollapsed", &self.storage_keys.sidebar_collapsed),
            ("storageKeys.currentPage", &self.storage_keys.current_page),
        ] {
            if key.is_empty() {
                errors.push(ValidationError::new(field, "The storage key cannot be empty"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
