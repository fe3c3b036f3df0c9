//! hashnav - hash-based navigation for a static blog.
//!
//! A location hash (`#project`, `#post/20240101_title`, ...) is resolved to a
//! content fragment, fetched through a [`Fetcher`], and handed to a
//! [`ContentMounter`]. Per-collection post lists are cached so previous/next
//! controls can be rendered below each post.

pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod fetch;
pub mod history;
pub mod loader;
pub mod logger;
pub mod markup;
pub mod mount;
pub mod navbar;
pub mod post;
pub mod render;
pub mod route;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::SiteConfig;
pub use context::Context;
pub use controller::{Event, Key, NavigationController, RouterState};
pub use fetch::{DirFetcher, FetchError, Fetcher, HttpFetcher};
pub use mount::{ContentMounter, MemoryMounter};
pub use post::Post;
pub use route::Route;
