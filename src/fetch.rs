//! Content fetching: the seam between the controller and the content server.
//!
//! - [`HttpFetcher`]: a live site over HTTP(S) (`reqwest`)
//! - [`DirFetcher`]: a local build directory, resolved the way a static server would

use crate::config::SiteConfig;
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Why a resource could not be loaded.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("`{url}` answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("network error while fetching `{url}`")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

impl FetchError {
    /// Status code for failures that have one (missing files count as 404).
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Io(_, err) if err.kind() == std::io::ErrorKind::NotFound => Some(404),
            _ => None,
        }
    }
}

/// Fetches a fragment resource by its site-relative URL (e.g. `/posts/x/post.html`).
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Return the markup on success; any non-success status is an error.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches from a content server over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.site.base_url.as_deref().unwrap_or_default(),
            Duration::from_secs(config.fetch.timeout_secs),
            &config.fetch.user_agent,
        )
    }

    /// Absolute URL for a site-relative one. Absolute inputs pass through.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_owned()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let absolute = self.absolute_url(url);

        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: absolute.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: absolute,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Network { url: absolute, source })
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// Fetches from a directory holding the built site.
///
/// Resolution order: exact file, then `index.html` inside a directory.
/// Anything else is a 404.
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site-relative URL to a path under the root.
    ///
    /// Query strings are dropped; `..` segments are ignored so lookups stay inside the root.
    pub fn local_path(&self, url: &str) -> PathBuf {
        let decoded = urlencoding::decode(url)
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_else(|_| url.to_owned());
        let without_query = decoded.split(['?', '#']).next().unwrap_or_default();

        without_query
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl Fetcher for DirFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut path = self.local_path(url);
        if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
            path = path.join("index.html");
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status {
                url: url.to_owned(),
                status: 404,
            }),
            Err(err) => Err(FetchError::Io(path, err)),
        }
    }
}
