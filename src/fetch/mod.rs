//! Transport for fragments and translation files.
/// Fetcher reading from the site directory
mod file;
/// Fetcher issuing HTTP GET requests
mod http;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileFetcher;
pub use http::HttpFetcher;

/// Transport-level failures. Non-2xx responses are not errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),
}

/// A completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    #[must_use]
    pub const fn not_found() -> Self {
        Self { status: 404, body: String::new() }
    }

    /// `Response.ok`: status in 200..=299.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// `fetch()` for a path relative to the current page.
#[async_trait]
pub trait Fetcher: fmt::Debug + Send + Sync {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError>;
}
