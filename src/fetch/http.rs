use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    Url,
};

use super::{
    FetchError,
    FetchResponse,
    Fetcher,
};

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Issues GET requests relative to the page URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    /// Relative paths are joined onto this
    page_url: Url,
}

impl HttpFetcher {
    /// # Errors
    /// `page_url` is not an absolute URL, or the HTTP client cannot be built
    pub fn new(page_url: &str) -> Result<Self, FetchError> {
        let page_url =
            Url::parse(page_url).map_err(|e| FetchError::InvalidUrl(format!("{page_url}: {e}")))?;
        let client =
            Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;
        Ok(Self { client, page_url })
    }

    /// Pathname part of the page URL, for page identification.
    #[must_use]
    pub fn pathname(&self) -> &str {
        self.page_url.path()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let url =
            self.page_url.join(path).map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))?;
        tracing::debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}
