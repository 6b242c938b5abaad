//! Locale detection from a language tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported page locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Bengali,
    German,
}

impl Locale {
    pub const ALL: [Self; 3] = [Self::English, Self::Bengali, Self::German];

    /// Lowercase tag, e.g. `german`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Bengali => "bengali",
            Self::German => "german",
        }
    }

    /// Value for the document's `lang` attribute.
    pub const fn html_lang(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Bengali => "bn",
            Self::German => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a BCP 47 language tag such as `de-AT`.
///
/// Prefix match is case-sensitive; anything else falls back to English.
pub fn classify_locale(tag: &str) -> Locale {
    if tag.starts_with("bn") {
        Locale::Bengali
    } else if tag.starts_with("de") {
        Locale::German
    } else {
        Locale::English
    }
}

/// First language range of an `Accept-Language` header.
///
/// `"de-AT,de;q=0.9,en;q=0.8"` yields `"de-AT"`, which is what a browser
/// reports as its preferred language.
pub fn primary_language(accept_language: &str) -> &str {
    accept_language
        .split(',')
        .next()
        .and_then(|range| range.split(';').next())
        .map(str::trim)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_locale() {
        assert_eq!(classify_locale("bn-BD"), Locale::Bengali);
        assert_eq!(classify_locale("bn"), Locale::Bengali);
        assert_eq!(classify_locale("de-DE"), Locale::German);
        assert_eq!(classify_locale("de-AT"), Locale::German);
        assert_eq!(classify_locale("fr-FR"), Locale::English);
        assert_eq!(classify_locale("en-US"), Locale::English);
        assert_eq!(classify_locale(""), Locale::English);
    }

    #[test]
    fn test_classify_locale_case_sensitive() {
        assert_eq!(classify_locale("DE-de"), Locale::English);
        assert_eq!(classify_locale("BN"), Locale::English);
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(primary_language("de-AT,de;q=0.9,en;q=0.8"), "de-AT");
        assert_eq!(primary_language("bn;q=1.0"), "bn");
        assert_eq!(primary_language("  fr-FR , en"), "fr-FR");
        assert_eq!(primary_language(""), "");
        assert_eq!(primary_language("*"), "*");
    }

    #[test]
    fn test_header_to_locale() {
        assert_eq!(classify_locale(primary_language("de-CH, en;q=0.5")), Locale::German);
        assert_eq!(classify_locale(primary_language("en-GB,bn;q=0.9")), Locale::English);
    }

    #[test]
    fn test_html_lang() {
        assert_eq!(Locale::Bengali.html_lang(), "bn");
        assert_eq!(Locale::default(), Locale::English);
        assert_eq!(Locale::German.to_string(), "german");
    }

    proptest! {
        #[test]
        fn bn_prefix_is_bengali(rest in any::<String>()) {
            prop_assert_eq!(classify_locale(&format!("bn{rest}")), Locale::Bengali);
        }

        #[test]
        fn de_prefix_is_german(rest in any::<String>()) {
            prop_assert_eq!(classify_locale(&format!("de{rest}")), Locale::German);
        }

        #[test]
        fn other_tags_are_english(tag in any::<String>()) {
            prop_assume!(!tag.starts_with("bn") && !tag.starts_with("de"));
            prop_assert_eq!(classify_locale(&tag), Locale::English);
        }
    }
}
