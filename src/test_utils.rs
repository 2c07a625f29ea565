//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use async_trait::async_trait;

use crate::dom::{
    Document,
    NodeId,
};
use crate::fetch::{
    FetchError,
    FetchResponse,
    Fetcher,
};

/// 事前に登録したレスポンスを返す Fetcher
///
/// 未登録のパスは 404 を返す。リクエスト数と順序を記録する。
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    /// パスごとのレスポンス
    responses: HashMap<String, FetchResponse>,
    /// エラーを返すパス
    failing: Vec<String>,
    /// リクエスト数
    count: AtomicUsize,
    /// リクエストされたパス（順序通り）
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// レスポンス未登録の Fetcher
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `path` に 200 レスポンスを登録する
    pub(crate) fn with(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(path.to_string(), FetchResponse::ok(body));
        self
    }

    /// `path` に任意のステータスを登録する
    pub(crate) fn with_status(mut self, path: &str, status: u16) -> Self {
        self.responses.insert(path.to_string(), FetchResponse { status, body: String::new() });
        self
    }

    /// `path` へのリクエストをトランスポートエラーにする
    pub(crate) fn failing(mut self, path: &str) -> Self {
        self.failing.push(path.to_string());
        self
    }

    /// これまでのリクエスト数
    pub(crate) fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// リクエストされたパス
    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(path.to_string());

        if self.failing.iter().any(|p| p == path) {
            return Err(FetchError::Io {
                path: path.to_string(),
                source: std::io::Error::other("connection refused"),
            });
        }
        Ok(self.responses.get(path).cloned().unwrap_or_else(FetchResponse::not_found))
    }
}

/// 空のサイドバーコンテナを持つページ
pub(crate) fn page_with_empty_sidebar() -> Document {
    Document::parse(
        r#"<html lang="en"><body><div class="sidebar-container"></div><main><h1 data-translate="dashboard.title">Dashboard</h1><select id="languageSelector" value="en"></select></main></body></html>"#,
    )
    .unwrap()
}

/// セレクターに一致する最初の要素
pub(crate) fn element(doc: &Document, selector: &str) -> NodeId {
    doc.query_selector(selector).unwrap().unwrap()
}
