//! Location parsing: browser hash → route → resource URL.
//!
//! # Hash Grammar
//!
//! | Hash              | Route                  | Resource                          |
//! |-------------------|------------------------|-----------------------------------|
//! | `` / `#home`      | `Home`                 | `{prefix}/indexes/index-all.html` |
//! | `#about`          | `About`                | `{prefix}/about/about-content.html`|
//! | `#project` etc.   | `Collection(context)`  | `{prefix}/indexes/index-{c}.html` |
//! | `#post/<path>`    | `Post(path)`           | `{prefix}/posts/<path>/post.html` |
//!
//! Anything else falls through to `Home`.

use crate::context::Context;
use std::fmt;

/// Marker that starts a post hash.
pub const POST_PREFIX: &str = "#post/";

/// A parsed client-side route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The default "all" collection.
    Home,
    About,
    /// A named, non-default collection index.
    Collection(Context),
    /// A single post, by its stable path identifier (e.g. `20240101_title`).
    Post(String),
}

impl Route {
    /// Parse a location hash. Never fails: unknown hashes are `Home`.
    pub fn parse(hash: &str) -> Self {
        let hash = hash.trim();

        if let Some(path) = hash.strip_prefix(POST_PREFIX) {
            let path = path.trim_matches('/');
            return if path.is_empty() {
                Self::Home
            } else {
                Self::Post(path.to_owned())
            };
        }

        match hash.trim_start_matches('#') {
            "about" => Self::About,
            "" | "home" | "all" => Self::Home,
            name => match Context::ALL.into_iter().find(|c| c.name() == name) {
                Some(Context::All) | None => Self::Home,
                Some(context) => Self::Collection(context),
            },
        }
    }

    /// Canonical hash for this route.
    pub fn hash(&self) -> String {
        match self {
            Self::Home => Context::All.hash().to_owned(),
            Self::About => "#about".to_owned(),
            Self::Collection(context) => context.hash().to_owned(),
            Self::Post(path) => format!("{POST_PREFIX}{path}"),
        }
    }

    /// Resource URL for this route, below the given site prefix.
    ///
    /// The prefix may be empty (`/posts/...`) or a path like `/webpage`.
    pub fn resource_url(&self, prefix: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        match self {
            Self::Home => format!("{prefix}{}", Context::All.index_path()),
            Self::About => format!("{prefix}/about/about-content.html"),
            Self::Collection(context) => format!("{prefix}{}", context.index_path()),
            Self::Post(path) => format!("{prefix}/posts/{path}/post.html"),
        }
    }

    #[inline]
    pub const fn is_post(&self) -> bool {
        matches!(self, Self::Post(_))
    }

    pub fn post_path(&self) -> Option<&str> {
        match self {
            Self::Post(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::About => f.write_str("about"),
            Self::Collection(context) => write!(f, "collection:{context}"),
            Self::Post(path) => write!(f, "post:{path}"),
        }
    }
}

/// Resource URL of the default collection, the fallback target of every failed load.
pub fn default_resource_url(prefix: &str) -> String {
    Route::Home.resource_url(prefix)
}
