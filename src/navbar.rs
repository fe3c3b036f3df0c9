//! Sidebar navigation links and active-item highlighting.

use crate::route::POST_PREFIX;
use serde::{Deserialize, Serialize};

/// A sidebar link: display label and target hash (its `hx-push-url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub hash: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hash: hash.into(),
        }
    }
}

/// The sidebar: links in display order, at most one of them active.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    links: Vec<NavLink>,
    active: Option<usize>,
}

impl NavBar {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links, active: None }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active(&self) -> Option<&NavLink> {
        self.active.and_then(|i| self.links.get(i))
    }

    /// Mark the link targeting `hash` active and clear all others.
    ///
    /// Nothing is active while a post is shown or when no link matches.
    /// An empty hash counts as `#home`.
    pub fn update_active(&mut self, hash: &str) -> Option<&NavLink> {
        let hash = if hash.is_empty() { "#home" } else { hash };
        self.active = if hash.starts_with(POST_PREFIX) {
            None
        } else {
            self.links.iter().position(|link| link.hash == hash)
        };
        self.active()
    }
}
