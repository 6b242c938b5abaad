//! `[stores]` section configuration.
//!
//! Link targets, image paths, and alt text for the two store badges.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[stores]` section in appbadge.toml.
///
/// # Example
/// ```toml
/// [stores]
/// apple_url = "https://apps.apple.com/app/id0000000000"
/// google_url = "https://play.google.com/store/apps/details?id=com.example.app"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Outbound link for the App Store badge.
    #[serde(default = "defaults::stores::apple_url")]
    #[educe(Default = defaults::stores::apple_url())]
    pub apple_url: String,

    /// Outbound link for the Google Play badge.
    #[serde(default = "defaults::stores::google_url")]
    #[educe(Default = defaults::stores::google_url())]
    pub google_url: String,

    /// URL path of the App Store badge image.
    #[serde(default = "defaults::stores::apple_badge")]
    #[educe(Default = defaults::stores::apple_badge())]
    pub apple_badge: String,

    /// URL path of the Google Play badge image.
    #[serde(default = "defaults::stores::google_badge")]
    #[educe(Default = defaults::stores::google_badge())]
    pub google_badge: String,

    #[serde(default = "defaults::stores::apple_alt")]
    #[educe(Default = defaults::stores::apple_alt())]
    pub apple_alt: String,

    #[serde(default = "defaults::stores::google_alt")]
    #[educe(Default = defaults::stores::google_alt())]
    pub google_alt: String,
}
