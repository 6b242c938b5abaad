//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn workers() -> usize {
        32
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn assets() -> PathBuf {
        "assets".into()
    }
}

// ============================================================================
// [stores] Section Defaults
// ============================================================================

pub mod stores {
    pub fn apple_url() -> String {
        "https://www.apple.com/app-store/".into()
    }

    pub fn google_url() -> String {
        "https://play.google.com/store".into()
    }

    pub fn apple_badge() -> String {
        "/appstore.svg".into()
    }

    pub fn google_badge() -> String {
        "/playstore.svg".into()
    }

    pub fn apple_alt() -> String {
        "Download on the App Store".into()
    }

    pub fn google_alt() -> String {
        "Get it on Google Play".into()
    }
}

// ============================================================================
// [[routes]] Defaults
// ============================================================================

pub mod routes {
    use super::super::RouteConfig;

    /// The plain landing page and the localized download page.
    pub fn all() -> Vec<RouteConfig> {
        vec![
            RouteConfig {
                path: "/".into(),
                localized: false,
                delay_ms: 0,
                badge_width: 150,
                badge_height: 50,
            },
            RouteConfig {
                path: "/download".into(),
                localized: true,
                delay_ms: 2000,
                badge_width: badge_width(),
                badge_height: badge_height(),
            },
        ]
    }

    pub fn delay_ms() -> u64 {
        0
    }

    pub fn badge_width() -> u32 {
        160
    }

    pub fn badge_height() -> u32 {
        52
    }
}
