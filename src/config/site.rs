//! `[site]` section configuration.
//!
//! Where content comes from and how resource paths are prefixed.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in hashnav.toml - content source.
///
/// # Example
/// ```toml
/// [site]
/// base_url = "https://example.com"
/// prefix = "/webpage"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Content server URL. Fragments are fetched from here over HTTP.
    #[serde(default = "defaults::site::base_url")]
    #[educe(Default = defaults::site::base_url())]
    pub base_url: Option<String>,

    /// Path prefix in front of every resource (`/webpage` → `/webpage/posts/...`).
    #[serde(default = "defaults::site::prefix")]
    #[educe(Default = defaults::site::prefix())]
    pub prefix: String,

    /// Local build directory. Takes precedence over `base_url` when set.
    #[serde(default = "defaults::site::root")]
    #[educe(Default = defaults::site::root())]
    pub root: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_section_full() {
        let config = r#"
            [site]
            base_url = "https://example.com"
            prefix = "/webpage"
            root = "public"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.site.prefix, "/webpage");
        assert_eq!(config.site.root.as_deref(), Some(std::path::Path::new("public")));
    }

    #[test]
    fn test_site_section_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert!(config.site.base_url.is_none());
        assert_eq!(config.site.prefix, "");
        assert!(config.site.root.is_none());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            title = "not a site field"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
