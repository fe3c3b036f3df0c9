//! Test doubles shared by unit tests.

use crate::fetch::{FetchError, Fetcher};
use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Serves canned responses and counts every fetch per URL.
///
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: FxHashMap<String, String>,
    delays: FxHashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_owned(), html.to_owned());
        self
    }

    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_owned(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|u| *u == url).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().push(url.to_owned());
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_owned(),
            status: 404,
        })
    }
}

/// Index markup listing the given post paths, in order.
pub fn index_html(paths: &[&str]) -> String {
    let items: String = paths
        .iter()
        .map(|p| {
            format!(
                r##"<div class="index-item"><h3 class="index-title"><a hx-get="/posts/{p}/post.html" hx-target="#content-area" hx-push-url="#post/{p}">Title {p}</a></h3></div>"##
            )
        })
        .collect();
    format!(r#"<h2>Index</h2><div class="index-container">{items}</div>"#)
}
