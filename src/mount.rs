//! Content mounting: where fetched fragments end up.
//!
//! The controller never touches a document directly. It hands markup to a
//! [`ContentMounter`], which replaces a mount point's content and then makes
//! the declarative-navigation links inside it interactive.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Replaces mount point content and binds embedded navigation links.
///
/// Methods take `&self` so that several in-flight loads can share one mounter.
pub trait ContentMounter: Send + Sync {
    /// Replace the content of `target` with `html`.
    fn mount(&self, html: &str, target: &str);

    /// Scan `target` and make any declarative-navigation links in it work.
    fn bind_interactivity(&self, target: &str);
}

impl<M: ContentMounter + ?Sized> ContentMounter for &M {
    fn mount(&self, html: &str, target: &str) {
        (**self).mount(html, target);
    }

    fn bind_interactivity(&self, target: &str) {
        (**self).bind_interactivity(target);
    }
}

/// In-memory document: one markup string per mount point.
///
/// Used by the terminal client and by tests; it records how often each
/// region was bound so callers can check the mount/bind contract.
#[derive(Debug, Default)]
pub struct MemoryMounter {
    regions: RwLock<FxHashMap<String, String>>,
    binds: RwLock<FxHashMap<String, usize>>,
}

impl MemoryMounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup of a mount point (`None` if never mounted).
    pub fn content(&self, target: &str) -> Option<String> {
        self.regions.read().get(target).cloned()
    }

    /// How many times `target` was bound.
    pub fn bind_count(&self, target: &str) -> usize {
        self.binds.read().get(target).copied().unwrap_or(0)
    }
}

impl ContentMounter for MemoryMounter {
    fn mount(&self, html: &str, target: &str) {
        self.regions.write().insert(target.to_owned(), html.to_owned());
    }

    fn bind_interactivity(&self, target: &str) {
        *self.binds.write().entry(target.to_owned()).or_default() += 1;
    }
}
