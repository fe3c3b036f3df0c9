//! `[fetch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[fetch]` section in hashnav.toml - HTTP client settings.
///
/// # Example
/// ```toml
/// [fetch]
/// timeout_secs = 10
/// user_agent = "my-reader/1.0"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds (default: 30).
    #[serde(default = "defaults::fetch::timeout_secs")]
    #[educe(Default = defaults::fetch::timeout_secs())]
    pub timeout_secs: u64,

    #[serde(default = "defaults::fetch::user_agent")]
    #[educe(Default = defaults::fetch::user_agent())]
    pub user_agent: String,
}
