//! HTML minification for rendered pages.
//!
//! Only complete documents are minified; streamed fragments are sent as-is.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a complete HTML document if `[build].minify` is enabled.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}
