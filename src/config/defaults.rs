//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn base_url() -> Option<String> {
        None
    }

    pub fn prefix() -> String {
        String::new()
    }

    pub fn root() -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// [mount] Section Defaults
// ============================================================================

pub mod mount {
    pub fn content() -> String {
        "content-area".into()
    }

    pub fn navigation() -> String {
        "post-navigation".into()
    }
}

// ============================================================================
// [fetch] Section Defaults
// ============================================================================

pub mod fetch {
    pub fn timeout_secs() -> u64 {
        30
    }

    pub fn user_agent() -> String {
        concat!("hashnav/", env!("CARGO_PKG_VERSION")).into()
    }
}

// ============================================================================
// [[nav]] Defaults
// ============================================================================

pub fn nav() -> Vec<crate::navbar::NavLink> {
    use crate::navbar::NavLink;

    vec![
        NavLink::new("Home", "#home"),
        NavLink::new("About", "#about"),
        NavLink::new("Projects", "#project"),
        NavLink::new("Papers", "#paper"),
        NavLink::new("Pennings", "#pennings"),
    ]
}
