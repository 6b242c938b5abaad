//! `[build]` section configuration.
//!
//! Controls how rendered pages are post-processed and where badge assets live.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in appbadge.toml.
///
/// # Example
/// ```toml
/// [build]
/// minify = true
/// assets = "static"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Minify rendered HTML before sending it.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Directory holding `appstore.svg` and `playstore.svg`, relative to root.
    /// Embedded badges are served when a file is missing.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,
}
