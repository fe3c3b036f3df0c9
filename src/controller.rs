//! Navigation controller: the single router behind every navigation event.
//!
//! # Router States
//!
//! ```text
//!            dispatch(event)
//!   Idle ───────────────────► Loading ──┬──► Loaded
//!                                ▲      └──► Error
//!                                └───── (next event)
//! ```
//!
//! Every input (hash change, history step, link click, arrow key, swap
//! notification, response error) goes through [`NavigationController::dispatch`].
//! Events that do nothing (an arrow key with no neighbor, back at the start of
//! history) leave the router state unchanged.
//!
//! # Load Flow
//!
//! ```text
//! hash ─► Route ─┬─ post ──────────────────────────► load post ─► ensure context ─► prev/next
//!                └─ other ─► load context posts ──► load page ─► (index markup?) install context
//!                                                      │
//!                                                      └─► update active nav link
//! ```

use crate::{
    config::SiteConfig,
    context::Context,
    fetch::Fetcher,
    history::History,
    loader::{ContentLoader, LoadOutcome, MAX_FALLBACK_RETRIES},
    log,
    mount::ContentMounter,
    navbar::NavBar,
    post::{Post, extract_posts, is_index_markup},
    render::render_post_navigation,
    route::Route,
    state::NavigationState,
};

// ============================================================================
// Router Types
// ============================================================================

/// Router state after the last event that started a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Keys with a navigation meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
}

/// Everything that can move the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Initial load of the current location.
    Ready,
    /// The location hash was set (typed, linked, or pushed externally).
    HashChanged(String),
    /// The host already moved through its history; show `hash` without pushing.
    PopState(String),
    Back,
    Forward,
    /// Sidebar link with the given `hx-push-url`.
    NavClick(String),
    /// Post link inside an index listing.
    IndexClick(String),
    Previous,
    Next,
    Key(Key),
    /// The content region was swapped by the host's declarative-navigation processor.
    AfterSwap,
    /// The host's declarative-navigation processor reported a failed response.
    ResponseError,
}

// ============================================================================
// Controller
// ============================================================================

pub struct NavigationController<F, M> {
    fetcher: F,
    mounter: M,
    loader: ContentLoader,
    state: NavigationState,
    navbar: NavBar,
    history: History,
    router: RouterState,
    /// Current location hash (empty until the first navigation).
    hash: String,
    prefix: String,
    content_target: String,
    navigation_target: String,
}

impl<F: Fetcher, M: ContentMounter> NavigationController<F, M> {
    pub fn new(fetcher: F, mounter: M, config: &SiteConfig) -> Self {
        Self {
            fetcher,
            mounter,
            loader: ContentLoader::new(config.fallback_url()),
            state: NavigationState::new(),
            navbar: NavBar::new(config.nav.clone()),
            history: History::new(),
            router: RouterState::Idle,
            hash: String::new(),
            prefix: config.site.prefix.clone(),
            content_target: config.mount.content.clone(),
            navigation_target: config.mount.navigation.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    pub fn navbar(&self) -> &NavBar {
        &self.navbar
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub const fn router_state(&self) -> RouterState {
        self.router
    }

    /// Current location hash (empty before the first navigation).
    #[inline]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    #[inline]
    pub fn mounter(&self) -> &M {
        &self.mounter
    }

    #[inline]
    pub fn content_target(&self) -> &str {
        &self.content_target
    }

    #[inline]
    pub fn navigation_target(&self) -> &str {
        &self.navigation_target
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Handle one event and return the resulting router state.
    pub async fn dispatch(&mut self, event: Event) -> RouterState {
        log!(@debug "nav"; "{event:?} in {:?}", self.router);
        match event {
            Event::Ready => {
                let hash = self.hash.clone();
                self.history.replace(effective_hash(&hash));
                self.load_content_from_hash().await;
            }
            Event::HashChanged(hash) => self.navigate(&hash).await,
            Event::PopState(hash) => {
                self.history.replace(effective_hash(&hash));
                self.hash = hash;
                self.load_content_from_hash().await;
            }
            Event::Back => {
                if let Some(hash) = self.history.go_back() {
                    self.hash = hash.to_owned();
                    self.load_content_from_hash().await;
                }
            }
            Event::Forward => {
                if let Some(hash) = self.history.go_forward() {
                    self.hash = hash.to_owned();
                    self.load_content_from_hash().await;
                }
            }
            Event::NavClick(push_url) => {
                let context = self.state.determine_context_from_hash(&push_url);
                self.load_context_posts(context).await;
                self.navigate(&push_url).await;
            }
            Event::IndexClick(push_url) => {
                log!(@debug "context"; "index click keeps {}", self.state.current_context());
                self.navigate(&push_url).await;
            }
            Event::Previous | Event::Key(Key::ArrowLeft) => {
                if self.viewing_post()
                    && let Some(post) = self.state.previous_post().cloned()
                {
                    self.navigate_to_post(&post).await;
                }
            }
            Event::Next | Event::Key(Key::ArrowRight) => {
                if self.viewing_post()
                    && let Some(post) = self.state.next_post().cloned()
                {
                    self.navigate_to_post(&post).await;
                }
            }
            Event::AfterSwap => self.after_swap().await,
            Event::ResponseError => self.recover_from_response_error().await,
        }
        self.router
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Push `hash` onto the history and load it.
    async fn navigate(&mut self, hash: &str) {
        self.hash = hash.to_owned();
        self.history.push(effective_hash(hash));
        self.load_content_from_hash().await;
    }

    /// Load a post directly and push its hash.
    ///
    /// Uses the post's own fetch URL when the index provided one.
    pub async fn navigate_to_post(&mut self, post: &Post) {
        let url = if post.url.is_empty() {
            Route::Post(post.path.clone()).resource_url(&self.prefix)
        } else {
            post.url.clone()
        };
        self.hash = post.hash();
        self.history.push(&self.hash);
        log!("nav"; "{} → {url}", self.hash);

        let outcome = self.load(&url).await;
        self.settle(outcome).await;
    }

    /// Resolve the current hash to a resource and load it.
    ///
    /// Non-post hashes make their context active first.
    pub async fn load_content_from_hash(&mut self) -> RouterState {
        let hash = effective_hash(&self.hash).to_owned();
        let route = Route::parse(&hash);

        if !route.is_post() {
            let context = self.state.determine_context_from_hash(&hash);
            self.load_context_posts(context).await;
        }

        let url = route.resource_url(&self.prefix);
        log!("nav"; "{hash} → {url}");
        let outcome = self.load(&url).await;
        self.settle(outcome).await;
        self.router
    }

    async fn load(&mut self, url: &str) -> LoadOutcome {
        self.router = RouterState::Loading;
        let ticket = self.loader.issue();
        self.loader
            .load(
                &self.fetcher,
                &self.mounter,
                url,
                &self.content_target,
                ticket,
                MAX_FALLBACK_RETRIES,
            )
            .await
    }

    /// Apply a finished load to state, nav highlighting and post controls.
    async fn settle(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded { url, html, fell_back } => {
                if is_index_markup(&html) {
                    self.extract_navigation_context(&url, &html);
                }
                self.router = RouterState::Loaded;
                self.navbar.update_active(&self.hash);

                if fell_back {
                    self.clear_post_navigation();
                } else {
                    self.refresh_post_navigation().await;
                }
            }
            LoadOutcome::Failed { url, error } => {
                log!("error"; "could not load {url}: {error}");
                self.router = RouterState::Error;
            }
            LoadOutcome::Superseded => {}
        }
    }

    /// Re-run the post-swap bookkeeping for the current hash.
    async fn after_swap(&mut self) {
        self.navbar.update_active(&self.hash);
        self.refresh_post_navigation().await;
    }

    /// Show the default collection and reset the location to `#home`.
    async fn recover_from_response_error(&mut self) {
        let url = self.loader.fallback_url().to_owned();
        log!("warn"; "response error, showing {url}");

        self.router = RouterState::Loading;
        let ticket = self.loader.issue();
        let outcome = self
            .loader
            .load(&self.fetcher, &self.mounter, &url, &self.content_target, ticket, 0)
            .await;

        if outcome.is_loaded() {
            self.hash = Context::All.hash().to_owned();
            self.history.replace(&self.hash);
        }
        self.settle(outcome).await;
    }

    #[inline]
    fn viewing_post(&self) -> bool {
        Route::parse(&self.hash).is_post()
    }

    // ------------------------------------------------------------------------
    // Context Resolution
    // ------------------------------------------------------------------------

    /// Make `context` active, fetching its index only if it is not cached.
    ///
    /// A failed fetch caches nothing and leaves the active context as it was.
    pub async fn load_context_posts(&mut self, context: Context) -> &[Post] {
        if self.state.activate_cached(context) {
            log!(@debug "context"; "{context} from cache");
            return self.state.posts();
        }

        let url = format!("{}{}", self.prefix.trim_end_matches('/'), context.index_path());
        match self.fetcher.fetch(&url).await {
            Ok(html) => {
                let posts = extract_posts(&html);
                log!("context"; "{context}: {} posts", posts.len());
                self.state.set_context(context, posts);
                self.state.posts()
            }
            Err(error) if error.status() == Some(404) => {
                log!(@debug "context"; "no index for {context} at {url}");
                &[]
            }
            Err(error) => {
                log!("warn"; "could not load {context} posts: {error}");
                &[]
            }
        }
    }

    /// First context in probe order whose list contains `path`, else `all`.
    pub async fn find_post_context(&mut self, path: &str) -> Context {
        for context in Context::PROBE_ORDER {
            self.load_context_posts(context).await;
            if self.state.context_contains(context, path) {
                log!(@debug "context"; "{path} found in {context}");
                return context;
            }
        }
        Context::All
    }

    /// Make sure the active context is the one `path` should be navigated in.
    ///
    /// Probing only happens while the active context is `all`; a post opened
    /// from a specific collection stays in it.
    pub async fn ensure_context(&mut self, path: &str) -> Context {
        let mut target = self.state.determine_context_from_hash(&self.hash);
        if target == Context::All {
            let found = self.find_post_context(path).await;
            if found != Context::All {
                target = found;
            }
        }

        if self.state.current_context() != target || !self.state.is_cached(target) {
            self.load_context_posts(target).await;
        }
        self.state.current_context()
    }

    /// Install the post list of a loaded index page as its context.
    ///
    /// An already cached list stays authoritative.
    fn extract_navigation_context(&mut self, url: &str, html: &str) {
        let context = Context::from_index_url(url);
        if !self.state.activate_cached(context) {
            self.state.set_context(context, extract_posts(html));
        }
    }

    // ------------------------------------------------------------------------
    // Post Navigation
    // ------------------------------------------------------------------------

    /// Rebuild previous/next controls for the current hash.
    ///
    /// Cleared when the hash is not a post or the post has no neighbors.
    async fn refresh_post_navigation(&mut self) {
        let Route::Post(path) = Route::parse(&self.hash) else {
            self.clear_post_navigation();
            return;
        };

        let context = self.ensure_context(&path).await;
        self.state.set_current_post(&path);

        let previous = self.state.previous_post();
        let next = self.state.next_post();
        log!(@debug "nav"; "{path} in {context}: prev {:?}, next {:?}",
            previous.map(|p| p.title.as_str()), next.map(|p| p.title.as_str()));

        match render_post_navigation(previous, next, &self.content_target) {
            Ok(Some(markup)) => {
                self.mounter.mount(&markup, &self.navigation_target);
                self.mounter.bind_interactivity(&self.navigation_target);
            }
            Ok(None) => self.clear_post_navigation(),
            Err(err) => {
                log!("error"; "could not render post navigation: {err}");
                self.clear_post_navigation();
            }
        }
    }

    fn clear_post_navigation(&self) {
        self.mounter.mount("", &self.navigation_target);
    }
}

/// The hash navigation acts on: an empty location means `#home`.
fn effective_hash(hash: &str) -> &str {
    if hash.is_empty() || hash == "#" { "#home" } else { hash }
}

// ============================================================================
// Tests
// ============================================================================
