//! Configuration management for `hashnav.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[site]`    | Content source (base URL or local root), prefix|
//! | `[mount]`   | Mount point ids for content and post controls  |
//! | `[fetch]`   | HTTP client (timeout, user agent)              |
//! | `[[nav]]`   | Sidebar links (label, target hash)             |
//!
//! # Example
//!
//! ```toml
//! [site]
//! base_url = "https://example.com"
//! prefix = "/webpage"
//!
//! [fetch]
//! timeout_secs = 10
//!
//! [[nav]]
//! label = "Home"
//! hash = "#home"
//!
//! [[nav]]
//! label = "Projects"
//! hash = "#project"
//! ```

pub mod defaults;
mod error;
mod fetch;
mod mount;
mod site;

pub use error::ConfigError;
pub use fetch::FetchConfig;
pub use mount::MountConfig;
pub use site::SourceConfig;

use crate::{cli::Cli, navbar::NavLink, route::default_resource_url};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing hashnav.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading, empty if none was found)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Content source
    #[serde(default)]
    pub site: SourceConfig,

    /// Mount point ids
    #[serde(default)]
    pub mount: MountConfig,

    /// HTTP client settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Sidebar links in display order
    #[serde(default = "defaults::nav")]
    #[educe(Default = defaults::nav())]
    pub nav: Vec<NavLink>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(config)
    }

    /// Load the config file named by the CLI if it exists, otherwise defaults,
    /// then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.site.base_url = Some(base_url.clone());
        }
        if let Some(root) = &cli.root {
            self.site.root = Some(root.clone());
        }
        Self::update_option(&mut self.site.prefix, cli.prefix.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resource URL of the default collection, used as the load fallback.
    pub fn fallback_url(&self) -> String {
        default_resource_url(&self.site.prefix)
    }

    /// Validate configuration.
    ///
    /// `needs_source` is false for commands that never fetch (e.g. `resolve`).
    pub fn validate(&self, needs_source: bool) -> Result<()> {
        if needs_source && self.site.base_url.is_none() && self.site.root.is_none() {
            bail!(ConfigError::Validation(
                "either [site.base_url] (--base-url) or [site.root] (--root) is required".into()
            ));
        }

        if let Some(base_url) = &self.site.base_url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.base_url] must start with http:// or https://".into()
            ));
        }

        if let Some(root) = &self.site.root
            && needs_source
            && !root.is_dir()
        {
            bail!(ConfigError::Validation(format!(
                "[site.root] `{}` is not a directory",
                root.display()
            )));
        }

        if !self.site.prefix.is_empty() && !self.site.prefix.starts_with('/') {
            bail!(ConfigError::Validation(
                "[site.prefix] must be empty or start with `/`".into()
            ));
        }

        if self.mount.content.is_empty() || self.mount.navigation.is_empty() {
            bail!(ConfigError::Validation("[mount] ids must not be empty".into()));
        }
        if self.mount.content == self.mount.navigation {
            bail!(ConfigError::Validation(
                "[mount.content] and [mount.navigation] must differ".into()
            ));
        }

        if self.fetch.timeout_secs == 0 {
            bail!(ConfigError::Validation(
                "[fetch.timeout_secs] must be greater than 0".into()
            ));
        }

        if let Some(link) = self.nav.iter().find(|link| !link.hash.starts_with('#')) {
            bail!(ConfigError::Validation(format!(
                "[[nav]] `{}` hash must start with `#`",
                link.label
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hashnav").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert!(config.site.base_url.is_none());
        assert_eq!(config.mount.content, "content-area");
        assert_eq!(config.nav.len(), 5);
        assert_eq!(config.fallback_url(), "/indexes/index-all.html");
    }

    #[test]
    fn test_nav_links() {
        let config = SiteConfig::from_str(r##"
            [[nav]]
            label = "Home"
            hash = "#home"

            [[nav]]
            label = "Haiku"
            hash = "#haikuesque"
        "##).unwrap();

        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.nav[1], NavLink::new("Haiku", "#haikuesque"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[site\nbase_url = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = SiteConfig::from_str("[serve]\nport = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashnav.toml");
        fs::write(&path, "[site]\nprefix = \"/webpage\"\n").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert_eq!(config.site.prefix, "/webpage");
        assert_eq!(config.fallback_url(), "/webpage/indexes/index-all.html");
        assert!(config.config_path.is_absolute());

        let missing = SiteConfig::from_path(&dir.path().join("nope.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SiteConfig::from_str(r#"
            [site]
            base_url = "https://old.example.com"
            prefix = "/webpage"
        "#).unwrap();
        config.update_with_cli(&cli(&["--base-url", "https://new.example.com", "resolve", "#home"]));

        assert_eq!(config.site.base_url.as_deref(), Some("https://new.example.com"));
        assert_eq!(config.site.prefix, "/webpage");
    }

    #[test]
    fn test_validate_requires_source() {
        let config = SiteConfig::default();
        assert!(config.validate(true).is_err());
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = SiteConfig::default();
        config.site.base_url = Some("example.com".into());
        assert!(config.validate(true).is_err());

        config.site.base_url = Some("https://example.com".into());
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_validate_root_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.site.root = Some(dir.path().join("missing"));
        assert!(config.validate(true).is_err());

        config.site.root = Some(dir.path().to_path_buf());
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_validate_mount_and_nav() {
        let mut config = SiteConfig::default();
        config.site.base_url = Some("https://example.com".into());

        config.mount.navigation = config.mount.content.clone();
        assert!(config.validate(true).is_err());
        config.mount.navigation = "post-navigation".into();

        config.nav.push(NavLink::new("Broken", "project"));
        let err = config.validate(true).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_validate_prefix_and_timeout() {
        let mut config = SiteConfig::default();
        config.site.prefix = "webpage".into();
        assert!(config.validate(false).is_err());

        config.site.prefix = "/webpage".into();
        config.fetch.timeout_secs = 0;
        assert!(config.validate(false).is_err());
    }
}
