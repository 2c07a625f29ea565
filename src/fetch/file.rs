use std::io::ErrorKind;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use async_trait::async_trait;

use super::{
    FetchError,
    FetchResponse,
    Fetcher,
};

/// Serves relative paths from the directory the page lives in.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    /// Directory of the current page
    base_dir: PathBuf,
}

impl FileFetcher {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Lexically joins `path` onto the base directory, resolving `.` and `..`.
    fn resolve(&self, path: &str) -> PathBuf {
        let mut resolved = self.base_dir.clone();
        for component in Path::new(path).components() {
            match component {
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::Normal(part) => resolved.push(part),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        resolved
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let resolved = self.resolve(path);
        tracing::debug!(path, resolved = %resolved.display(), "Reading file");

        match tokio::fs::read_to_string(&resolved).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(source) => Err(FetchError::Io { path: path.to_string(), source }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn resolves_parent_segments_from_nested_page() {
        let site = TempDir::new().unwrap();
        fs::create_dir_all(site.path().join("components")).unwrap();
        fs::create_dir_all(site.path().join("pages")).unwrap();
        fs::write(site.path().join("components/sidebar.html"), "<aside></aside>").unwrap();
        let fetcher = FileFetcher::new(site.path().join("pages"));

        let response = fetcher.fetch("../components/sidebar.html").await.unwrap();

        assert_that!(response, eq(&FetchResponse::ok("<aside></aside>")));
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let site = TempDir::new().unwrap();
        let fetcher = FileFetcher::new(site.path());

        let response = fetcher.fetch("translations/hy.json").await.unwrap();

        assert_that!(response.status, eq(404));
        assert_that!(response.is_success(), eq(false));
    }
}
