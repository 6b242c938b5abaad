//! `[[routes]]` configuration.
//!
//! Each route binds a URL path to one page variant.

use super::defaults;
use crate::page::PageOptions;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One `[[routes]]` entry in appbadge.toml.
///
/// # Example
/// ```toml
/// [[routes]]
/// path = "/download"
/// localized = true
/// delay_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// URL path, must start with `/`.
    pub path: String,

    /// Use locale-specific copy and show the detected language.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub localized: bool,

    /// Artificial delay before the page leaves its loading state.
    #[serde(default = "defaults::routes::delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "defaults::routes::badge_width")]
    #[educe(Default = defaults::routes::badge_width())]
    pub badge_width: u32,

    #[serde(default = "defaults::routes::badge_height")]
    #[educe(Default = defaults::routes::badge_height())]
    pub badge_height: u32,
}

impl RouteConfig {
    /// Page behavior for this route.
    pub const fn options(&self) -> PageOptions {
        PageOptions::new(self.localized, Duration::from_millis(self.delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::time::Duration;

    #[test]
    fn test_default_routes() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes.len(), 2);

        let home = &config.routes[0];
        assert_eq!(home.path, "/");
        assert!(!home.localized);
        assert_eq!(home.options().artificial_delay, Duration::ZERO);
        assert_eq!((home.badge_width, home.badge_height), (150, 50));

        let download = &config.routes[1];
        assert_eq!(download.path, "/download");
        assert!(download.localized);
        assert_eq!(download.options().artificial_delay, Duration::from_millis(2000));
        assert_eq!((download.badge_width, download.badge_height), (160, 52));
    }

    #[test]
    fn test_custom_routes_replace_defaults() {
        let config = r#"
            [[routes]]
            path = "/get"
            delay_ms = 500
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.routes.len(), 1);
        let route = &config.routes[0];
        assert_eq!(route.path, "/get");
        assert!(route.localized);
        assert_eq!(route.delay_ms, 500);
        assert_eq!(route.badge_width, 160);
    }

    #[test]
    fn test_route_requires_path() {
        let result: Result<SiteConfig, _> = toml::from_str("[[routes]]\nlocalized = false");
        assert!(result.is_err());
    }
}
