//! The content load operation.
//!
//! Fetch a resource and mount it; on failure fall back once to the default
//! collection. The fallback is bounded by an explicit retry budget, so a
//! failing fallback ends the operation instead of trying again.
//!
//! # Request Sequencing
//!
//! ```text
//!  issue() ─► Ticket(1) ──fetch (slow)────────────────► settle: stale → Superseded
//!  issue() ─► Ticket(2) ──fetch (fast)──► settle: current → mount
//! ```
//!
//! Only the newest ticket mounts, so a slow earlier request can no longer
//! overwrite the content of a faster later one.

use crate::{
    fetch::{FetchError, Fetcher},
    log,
    mount::ContentMounter,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Upper bound on fallback attempts after the primary load.
pub const MAX_FALLBACK_RETRIES: u8 = 1;

/// Identifies one load request; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Result of a load operation.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Markup was mounted. `url` is what actually loaded.
    Loaded {
        url: String,
        html: String,
        fell_back: bool,
    },
    /// A newer request was issued while this one was in flight; nothing was mounted.
    Superseded,
    /// Primary and fallback both failed; the mount point is unchanged.
    Failed { url: String, error: FetchError },
}

impl LoadOutcome {
    #[inline]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

pub struct ContentLoader {
    fallback_url: String,
    latest: AtomicU64,
}

impl ContentLoader {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            fallback_url: fallback_url.into(),
            latest: AtomicU64::new(0),
        }
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[inline]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Load `url` into `target`.
    ///
    /// `retries` is capped at [`MAX_FALLBACK_RETRIES`]. A failure of the
    /// fallback resource itself is never retried.
    pub async fn load<F, M>(
        &self,
        fetcher: &F,
        mounter: &M,
        url: &str,
        target: &str,
        ticket: Ticket,
        retries: u8,
    ) -> LoadOutcome
    where
        F: Fetcher + ?Sized,
        M: ContentMounter + ?Sized,
    {
        let mut retries = retries.min(MAX_FALLBACK_RETRIES);
        let mut current = url.to_owned();

        loop {
            log!(@debug "load"; "{current} → #{target}");
            match fetcher.fetch(&current).await {
                Ok(html) => {
                    if !self.is_current(ticket) {
                        log!(@debug "load"; "{current} superseded, not mounting");
                        return LoadOutcome::Superseded;
                    }
                    mounter.mount(&html, target);
                    mounter.bind_interactivity(target);
                    let fell_back = current != url;
                    return LoadOutcome::Loaded {
                        url: current,
                        html,
                        fell_back,
                    };
                }
                Err(error) => {
                    log!("warn"; "failed to load {current}: {error}");
                    if !self.is_current(ticket) {
                        return LoadOutcome::Superseded;
                    }
                    if retries == 0 || current == self.fallback_url {
                        return LoadOutcome::Failed { url: current, error };
                    }
                    retries -= 1;
                    current.clone_from(&self.fallback_url);
                }
            }
        }
    }
}
