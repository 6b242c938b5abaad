//! Device platform detection from a user-agent string.
//!
//! Classification is total: every input, including the empty string,
//! maps to exactly one [`Platform`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

/// Apple mobile devices, matched anywhere in the user agent.
static IOS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iphone|ipad|ipod").expect("valid ios pattern"));

/// Android devices, checked only after the iOS pattern missed.
static ANDROID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)android").expect("valid android pattern"));

/// Platform of the requesting device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    /// Fallback for desktops, bots, and anything unrecognized.
    #[default]
    Desktop,
}

impl Platform {
    /// Lowercase tag, e.g. `ios`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Desktop => "desktop",
        }
    }

    /// Whether the Apple App Store badge applies to this platform.
    pub const fn shows_app_store(self) -> bool {
        matches!(self, Self::Ios | Self::Desktop)
    }

    /// Whether the Google Play badge applies to this platform.
    pub const fn shows_play_store(self) -> bool {
        matches!(self, Self::Android | Self::Desktop)
    }

    /// Number of store badges shown for this platform.
    pub const fn badge_count(self) -> usize {
        self.shows_app_store() as usize + self.shows_play_store() as usize
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw user-agent string.
///
/// iOS patterns win over Android, so a user agent mentioning both
/// (some iPad emulation strings do) is treated as iOS.
pub fn classify_device(user_agent: &str) -> Platform {
    if IOS_PATTERN.is_match(user_agent) {
        Platform::Ios
    } else if ANDROID_PATTERN.is_match(user_agent) {
        Platform::Android
    } else {
        Platform::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const PIXEL_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const WINDOWS_FIREFOX: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_ios_devices() {
        assert_eq!(classify_device(IPHONE_SAFARI), Platform::Ios);
        assert_eq!(classify_device("Mozilla/5.0 (iPad; CPU OS 16_6)"), Platform::Ios);
        assert_eq!(classify_device("Mozilla/5.0 (iPod touch)"), Platform::Ios);
    }

    #[test]
    fn test_ios_any_case() {
        for ua in ["IPHONE", "iphone", "IpHoNe", "IPAD", "ipod", "xxIPodxx"] {
            assert_eq!(classify_device(ua), Platform::Ios, "{ua}");
        }
    }

    #[test]
    fn test_android() {
        assert_eq!(classify_device(PIXEL_CHROME), Platform::Android);
        assert_eq!(classify_device("ANDROID"), Platform::Android);
        assert_eq!(classify_device("android"), Platform::Android);
    }

    #[test]
    fn test_ios_wins_over_android() {
        assert_eq!(classify_device("Android iPad hybrid"), Platform::Ios);
    }

    #[test]
    fn test_desktop_fallback() {
        assert_eq!(classify_device(WINDOWS_FIREFOX), Platform::Desktop);
        assert_eq!(classify_device(""), Platform::Desktop);
        assert_eq!(classify_device("Googlebot/2.1"), Platform::Desktop);
        assert_eq!(
            classify_device("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)"),
            Platform::Desktop
        );
    }

    #[test]
    fn test_badge_rules() {
        assert!(Platform::Ios.shows_app_store());
        assert!(!Platform::Ios.shows_play_store());
        assert!(!Platform::Android.shows_app_store());
        assert!(Platform::Android.shows_play_store());
        assert_eq!(Platform::Desktop.badge_count(), 2);
        assert_eq!(Platform::Ios.badge_count(), 1);
        assert_eq!(Platform::Android.badge_count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::Ios.to_string(), "ios");
        assert_eq!(Platform::default(), Platform::Desktop);
    }

    fn flip_case(token: &str, upper: &[bool]) -> String {
        token
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    fn mentions_device(user_agent: &str) -> bool {
        let lower = user_agent.to_ascii_lowercase();
        ["iphone", "ipad", "ipod", "android"]
            .iter()
            .any(|token| lower.contains(token))
    }

    proptest! {
        #[test]
        fn ios_token_in_any_case_is_ios(
            token in prop_oneof![Just("iphone"), Just("ipad"), Just("ipod")],
            upper in prop::collection::vec(any::<bool>(), 1..8),
            prefix in any::<String>(),
            suffix in any::<String>(),
        ) {
            let user_agent = format!("{prefix}{}{suffix}", flip_case(token, &upper));
            prop_assert_eq!(classify_device(&user_agent), Platform::Ios);
        }

        #[test]
        fn android_token_without_ios_is_android(
            upper in prop::collection::vec(any::<bool>(), 1..8),
            // No `i`, so no iOS token can appear around the match.
            prefix in "[a-hj-zA-HJ-Z0-9 ;/().]{0,40}",
            suffix in "[a-hj-zA-HJ-Z0-9 ;/().]{0,40}",
        ) {
            let user_agent = format!("{prefix}{}{suffix}", flip_case("android", &upper));
            prop_assert_eq!(classify_device(&user_agent), Platform::Android);
        }

        #[test]
        fn anything_else_is_desktop(user_agent in "[ -~]{0,80}") {
            prop_assume!(!mentions_device(&user_agent));
            prop_assert_eq!(classify_device(&user_agent), Platform::Desktop);
        }
    }
}
