//! Navigation state: active context, its post list and the current post.
//!
//! Owned by the controller and exposed through accessors only. Lives as
//! long as the controller (one page session).

use crate::{context::Context, log, post::Post, route::Route};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct NavigationState {
    current_context: Context,
    posts: Vec<Post>,
    current_post_index: Option<usize>,
    /// Post lists per context. Populated lazily, never evicted.
    context_posts: FxHashMap<Context, Vec<Post>>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub const fn current_context(&self) -> Context {
        self.current_context
    }

    #[inline]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[inline]
    pub const fn current_post_index(&self) -> Option<usize> {
        self.current_post_index
    }

    pub fn current_post(&self) -> Option<&Post> {
        self.current_post_index.and_then(|i| self.posts.get(i))
    }

    /// Cached post list of a context, if it was loaded before.
    pub fn cached(&self, context: Context) -> Option<&[Post]> {
        self.context_posts.get(&context).map(Vec::as_slice)
    }

    #[inline]
    pub fn is_cached(&self, context: Context) -> bool {
        self.context_posts.contains_key(&context)
    }

    /// Store a context's post list without activating it.
    pub fn cache(&mut self, context: Context, posts: Vec<Post>) {
        self.context_posts.insert(context, posts);
    }

    /// Make `context` active with the given posts, caching them too.
    ///
    /// The current post index is reset; call [`set_current_post`](Self::set_current_post)
    /// to locate a post in the new list.
    pub fn set_context(&mut self, context: Context, posts: Vec<Post>) {
        log!(@debug "context"; "set {context} ({} posts)", posts.len());
        self.current_context = context;
        self.context_posts.insert(context, posts.clone());
        self.posts = posts;
        self.current_post_index = None;
    }

    /// Activate a context from the cache. Returns `false` if it is not cached.
    pub fn activate_cached(&mut self, context: Context) -> bool {
        match self.context_posts.get(&context) {
            Some(posts) => {
                self.current_context = context;
                self.posts = posts.clone();
                self.current_post_index = None;
                true
            }
            None => false,
        }
    }

    /// Locate `path` in the active list. Unknown paths clear the index.
    pub fn set_current_post(&mut self, path: &str) -> Option<usize> {
        self.current_post_index = self.posts.iter().position(|post| post.path == path);
        log!(@debug "context"; "current post {:?} of {} in {}",
            self.current_post_index, self.posts.len(), self.current_context);
        self.current_post_index
    }

    /// Context a hash logically belongs to.
    ///
    /// Collection hashes map 1:1; a post keeps the active context; all else is `all`.
    /// Reads state only, so repeated calls agree.
    pub fn determine_context_from_hash(&self, hash: &str) -> Context {
        match Route::parse(hash) {
            Route::Post(_) => self.current_context,
            Route::Collection(context) => context,
            Route::Home | Route::About => Context::All,
        }
    }

    /// Whether `path` is listed in the cached posts of `context`.
    pub fn context_contains(&self, context: Context, path: &str) -> bool {
        self.cached(context)
            .is_some_and(|posts| posts.iter().any(|post| post.path == path))
    }

    pub fn previous_post(&self) -> Option<&Post> {
        let index = self.current_post_index?;
        index.checked_sub(1).and_then(|i| self.posts.get(i))
    }

    pub fn next_post(&self) -> Option<&Post> {
        let index = self.current_post_index?;
        self.posts.get(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Post> {
        ["a", "b", "c"]
            .into_iter()
            .map(|p| Post::new(p, p.to_uppercase(), format!("/posts/{p}/post.html")))
            .collect()
    }

    #[test]
    fn test_previous_next_middle() {
        let mut state = NavigationState::new();
        state.set_context(Context::Project, abc());
        state.set_current_post("b");
        assert_eq!(state.previous_post().map(|p| p.path.as_str()), Some("a"));
        assert_eq!(state.next_post().map(|p| p.path.as_str()), Some("c"));
    }

    #[test]
    fn test_previous_next_edges() {
        let mut state = NavigationState::new();
        state.set_context(Context::Project, abc());

        state.set_current_post("a");
        assert!(state.previous_post().is_none());
        assert_eq!(state.next_post().map(|p| p.path.as_str()), Some("b"));

        state.set_current_post("c");
        assert_eq!(state.previous_post().map(|p| p.path.as_str()), Some("b"));
        assert!(state.next_post().is_none());
    }

    #[test]
    fn test_unknown_post_clears_index() {
        let mut state = NavigationState::new();
        state.set_context(Context::Paper, abc());
        state.set_current_post("b");
        assert_eq!(state.set_current_post("zzz"), None);
        assert!(state.current_post().is_none());
        assert!(state.previous_post().is_none());
        assert!(state.next_post().is_none());
    }

    #[test]
    fn test_empty_list_has_no_index() {
        let mut state = NavigationState::new();
        state.set_context(Context::Paper, Vec::new());
        assert_eq!(state.set_current_post("a"), None);
    }

    #[test]
    fn test_default_context_is_all() {
        let state = NavigationState::new();
        assert_eq!(state.current_context(), Context::All);
        assert!(state.posts().is_empty());
        assert_eq!(state.current_post_index(), None);
    }

    #[test]
    fn test_determine_context_from_hash() {
        let mut state = NavigationState::new();
        assert_eq!(state.determine_context_from_hash("#project"), Context::Project);
        assert_eq!(state.determine_context_from_hash("#about"), Context::All);
        assert_eq!(state.determine_context_from_hash("#whatever"), Context::All);
        assert_eq!(state.determine_context_from_hash("#post/x"), Context::All);

        state.set_context(Context::Pennings, abc());
        assert_eq!(state.determine_context_from_hash("#post/x"), Context::Pennings);
    }

    #[test]
    fn test_determine_context_is_idempotent() {
        let mut state = NavigationState::new();
        state.set_context(Context::Paper, abc());
        for hash in ["#post/b", "#paper", "#home", "", "#nope"] {
            let first = state.determine_context_from_hash(hash);
            let second = state.determine_context_from_hash(hash);
            assert_eq!(first, second, "hash {hash:?}");
        }
    }

    #[test]
    fn test_cache_and_activate() {
        let mut state = NavigationState::new();
        state.cache(Context::Paper, abc());
        assert_eq!(state.current_context(), Context::All);
        assert!(state.context_contains(Context::Paper, "c"));
        assert!(!state.context_contains(Context::Project, "c"));

        assert!(state.activate_cached(Context::Paper));
        assert_eq!(state.current_context(), Context::Paper);
        assert_eq!(state.posts().len(), 3);
        assert!(!state.activate_cached(Context::Blog));
    }
}
