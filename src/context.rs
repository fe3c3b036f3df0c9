//! Browsing contexts: the named post collections of the site.
//!
//! | Context      | Hash          | Index resource               |
//! |--------------|---------------|------------------------------|
//! | `all`        | `#home`       | `/indexes/index-all.html`    |
//! | `project`    | `#project`    | `/indexes/index-project.html`|
//! | `paper`      | `#paper`      | `/indexes/index-paper.html`  |
//! | `pennings`   | `#pennings`   | `/indexes/index-pennings.html`|
//! | `blog`       | `#blog`       | `/indexes/index-blog.html`   |
//! | `haikuesque` | `#haikuesque` | `/indexes/index-haikuesque.html`|

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A named collection of posts used to scope previous/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    #[default]
    All,
    Project,
    Paper,
    Pennings,
    Blog,
    Haikuesque,
}

impl Context {
    /// Order in which contexts are searched for a post with no known context.
    pub const PROBE_ORDER: [Self; 4] = [Self::Project, Self::Paper, Self::Pennings, Self::All];

    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Project,
        Self::Paper,
        Self::Pennings,
        Self::Blog,
        Self::Haikuesque,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Project => "project",
            Self::Paper => "paper",
            Self::Pennings => "pennings",
            Self::Blog => "blog",
            Self::Haikuesque => "haikuesque",
        }
    }

    /// Canonical hash of the context's index page.
    ///
    /// The default collection is addressed as `#home`.
    pub const fn hash(self) -> &'static str {
        match self {
            Self::All => "#home",
            Self::Project => "#project",
            Self::Paper => "#paper",
            Self::Pennings => "#pennings",
            Self::Blog => "#blog",
            Self::Haikuesque => "#haikuesque",
        }
    }

    /// Index resource path, relative to the site prefix.
    pub fn index_path(self) -> String {
        format!("/indexes/index-{}.html", self.name())
    }

    /// Recover the context from an index resource URL.
    ///
    /// `/webpage/indexes/index-paper.html` → `Paper`; anything unrecognized is `All`.
    pub fn from_index_url(url: &str) -> Self {
        let file = url.rsplit('/').next().unwrap_or(url);
        file.strip_prefix("index-")
            .and_then(|rest| rest.strip_suffix(".html"))
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown context `{s}`"))
    }
}
