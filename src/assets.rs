//! Store badge images.
//!
//! Badges are read from the site's assets directory when present, with the
//! embedded SVGs as fallback.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::{borrow::Cow, fs, path::Path};

pub const APP_STORE_SVG: &[u8] = include_bytes!("embed/appstore.svg");
pub const PLAY_STORE_SVG: &[u8] = include_bytes!("embed/playstore.svg");

/// One of the two badge images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge<'a> {
    /// File name inside the assets directory.
    pub file_name: &'a str,
    pub embedded: &'static [u8],
}

impl<'a> Badge<'a> {
    /// Badge whose configured URL path equals `url_path`.
    pub fn lookup(config: &'a SiteConfig, url_path: &str) -> Option<Self> {
        let stores = &config.stores;
        let url_path = url_path.trim_start_matches('/');

        [
            (stores.apple_badge.as_str(), APP_STORE_SVG),
            (stores.google_badge.as_str(), PLAY_STORE_SVG),
        ]
        .into_iter()
        .find(|(badge, _)| badge.trim_start_matches('/') == url_path)
        .map(|(badge, embedded)| Self {
            file_name: file_name(badge),
            embedded,
        })
    }

    /// Bytes of the badge, preferring the file in `assets_dir`.
    pub fn load(&self, assets_dir: &Path) -> Result<Cow<'static, [u8]>> {
        let path = assets_dir.join(self.file_name);
        if !path.is_file() {
            return Ok(Cow::Borrowed(self.embedded));
        }
        let content =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Cow::Owned(content))
    }
}

/// Last path segment of a URL path.
fn file_name(url_path: &str) -> &str {
    url_path.rsplit('/').next().unwrap_or(url_path)
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
pub fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_default_badges() {
        let config = SiteConfig::default();

        let apple = Badge::lookup(&config, "/appstore.svg").unwrap();
        assert_eq!(apple.file_name, "appstore.svg");
        assert_eq!(apple.embedded, APP_STORE_SVG);

        let google = Badge::lookup(&config, "/playstore.svg").unwrap();
        assert_eq!(google.file_name, "playstore.svg");
        assert_eq!(google.embedded, PLAY_STORE_SVG);

        assert!(Badge::lookup(&config, "/favicon.ico").is_none());
    }

    #[test]
    fn test_lookup_nested_badge_path() {
        let mut config = SiteConfig::default();
        config.stores.apple_badge = "/static/badges/apple.svg".into();

        let apple = Badge::lookup(&config, "/static/badges/apple.svg").unwrap();
        assert_eq!(apple.file_name, "apple.svg");
        assert!(Badge::lookup(&config, "/appstore.svg").is_none());
    }

    #[test]
    fn test_load_prefers_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let badge = Badge::lookup(&config, "/appstore.svg").unwrap();

        let embedded = badge.load(dir.path()).unwrap();
        assert!(matches!(embedded, Cow::Borrowed(_)));

        fs::write(dir.path().join("appstore.svg"), b"<svg/>").unwrap();
        let custom = badge.load(dir.path()).unwrap();
        assert_eq!(&*custom, b"<svg/>");
    }

    #[test]
    fn test_embedded_badges_are_svg() {
        for svg in [APP_STORE_SVG, PLAY_STORE_SVG] {
            assert!(String::from_utf8_lossy(svg).trim_start().starts_with("<svg"));
        }
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("appstore.svg")), "image/svg+xml");
        assert_eq!(guess_content_type(Path::new("badge.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("noext")), "application/octet-stream");
    }
}
