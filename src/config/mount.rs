//! `[mount]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[mount]` section in hashnav.toml - mount point ids.
///
/// # Example
/// ```toml
/// [mount]
/// content = "content-area"
/// navigation = "post-navigation"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MountConfig {
    /// Region that receives every loaded fragment.
    #[serde(default = "defaults::mount::content")]
    #[educe(Default = defaults::mount::content())]
    pub content: String,

    /// Region that receives the previous/next controls of a post.
    #[serde(default = "defaults::mount::navigation")]
    #[educe(Default = defaults::mount::navigation())]
    pub navigation: String,
}
