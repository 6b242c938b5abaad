//! HTML rendering of a page state.
//!
//! Rendering is pure: the same [`PageState`] and context always produce the
//! same markup. The document is split into pieces so the server can stream
//! the loading block first and the ready block once the transition fires:
//!
//! ```text
//! document_head ─► render_loading ─► [hide_loading + render_ready] ─► document_tail
//! ```

use crate::{
    config::{RouteConfig, StoreConfig},
    device::Platform,
    i18n::{Strings, Translations},
    locale::Locale,
    page::{PageOptions, PageState},
};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Document frame up to the opening of the page card.
const PAGE_TEMPLATE: &str = include_str!("embed/page.html");

/// Stylesheet inlined into every page.
const PAGE_STYLE: &str = include_str!("embed/page.css");

const DOCUMENT_TAIL: &str = "</section>\n</main>\n</body>\n</html>\n";

/// Element ids of the two state blocks.
const LOADING_ID: &str = "page-loading";
const READY_ID: &str = "page-ready";

/// Pixel size of a badge image (and of its placeholder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSize {
    pub width: u32,
    pub height: u32,
}

/// Static inputs shared by every render of one route.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: PageOptions,
    pub badge: BadgeSize,
    pub translations: &'a Translations,
    pub stores: &'a StoreConfig,
}

impl<'a> RenderContext<'a> {
    pub fn for_route(
        route: &RouteConfig,
        translations: &'a Translations,
        stores: &'a StoreConfig,
    ) -> Self {
        Self {
            options: route.options(),
            badge: BadgeSize {
                width: route.badge_width,
                height: route.badge_height,
            },
            translations,
            stores,
        }
    }

    /// Locale whose copy is displayed. Unlocalized pages always use English.
    fn display_locale(&self, state: &PageState) -> Locale {
        if self.options.localized {
            state.locale
        } else {
            Locale::English
        }
    }

    fn strings(&self, state: &PageState) -> &'a Strings {
        self.translations.get(self.display_locale(state))
    }

    /// Doctype, head, and the opening of the page card.
    pub fn document_head(&self, state: &PageState) -> String {
        let locale = self.display_locale(state);
        PAGE_TEMPLATE
            .replace("{lang}", locale.html_lang())
            .replace("{title}", &escape(self.strings(state).title.as_str()))
            .replace("{style}", PAGE_STYLE)
    }

    pub const fn document_tail(&self) -> &'static str {
        DOCUMENT_TAIL
    }

    /// Complete document for the state's current phase.
    pub fn render_page(&self, state: &PageState) -> String {
        let body = if state.loading() {
            self.render_loading(state)
        } else {
            self.render_ready(state)
        };
        let mut html = self.document_head(state);
        html.push_str(&body);
        html.push_str(self.document_tail());
        html
    }

    /// Copy plus badge placeholders.
    ///
    /// The placeholder count follows the best-guess platform carried by the
    /// state, which is the initial `Desktop` for as long as the page loads.
    pub fn render_loading(&self, state: &PageState) -> String {
        let mut html = String::new();
        let _ = writeln!(html, r#"<div id="{LOADING_ID}" aria-busy="true">"#);
        self.write_copy(&mut html, state);

        html.push_str("<div class=\"badges\">\n");
        for _ in 0..state.platform.badge_count() {
            let _ = writeln!(
                html,
                r#"<div class="skeleton" style="width: {}px; height: {}px"></div>"#,
                self.badge.width, self.badge.height
            );
        }
        html.push_str("</div>\n");

        self.write_detected(&mut html, state);
        html.push_str("</div>\n");
        html
    }

    /// Copy, store badges for the detected platform, and detection summary.
    pub fn render_ready(&self, state: &PageState) -> String {
        let stores = self.stores;
        let mut html = String::new();
        let _ = writeln!(html, r#"<div id="{READY_ID}">"#);
        self.write_copy(&mut html, state);

        html.push_str("<div class=\"badges\">\n");
        if state.platform.shows_app_store() {
            self.write_badge(&mut html, &stores.apple_url, &stores.apple_badge, &stores.apple_alt);
        }
        if state.platform.shows_play_store() {
            self.write_badge(
                &mut html,
                &stores.google_url,
                &stores.google_badge,
                &stores.google_alt,
            );
        }
        html.push_str("</div>\n");

        self.write_detected(&mut html, state);
        html.push_str("</div>\n");
        html
    }

    /// Style rule that hides the loading block once the ready block arrives.
    pub const fn hide_loading(&self) -> &'static str {
        "<style>#page-loading { display: none; }</style>\n"
    }

    fn write_copy(&self, html: &mut String, state: &PageState) {
        let strings = self.strings(state);
        let _ = writeln!(html, "<h1>{}</h1>", escape(strings.title.as_str()));
        let _ = writeln!(
            html,
            r#"<p class="description">{}</p>"#,
            escape(strings.description.as_str())
        );
    }

    fn write_badge(&self, html: &mut String, href: &str, src: &str, alt: &str) {
        let _ = writeln!(
            html,
            r#"<a href="{}" target="_blank" rel="noopener noreferrer"><img src="{}" alt="{}" width="{}" height="{}"></a>"#,
            escape(href),
            escape(src),
            escape(alt),
            self.badge.width,
            self.badge.height
        );
    }

    fn write_detected(&self, html: &mut String, state: &PageState) {
        let strings = self.strings(state);
        let platform = platform_label(state.platform);

        if !self.options.localized {
            let _ = writeln!(
                html,
                r#"<p class="note">{}: <strong>{platform}</strong></p>"#,
                escape(strings.detected.as_str())
            );
            return;
        }

        let _ = write!(
            html,
            concat!(
                "<div class=\"detected\">\n",
                "<div><p class=\"label\">{}</p><p class=\"value\">{}</p></div>\n",
                "<div><p class=\"label\">{}</p><p class=\"value\">{}</p></div>\n",
                "</div>\n"
            ),
            escape(strings.detected.as_str()),
            platform,
            escape(strings.lang.as_str()),
            capitalize(state.locale.as_str()),
        );
    }
}

fn platform_label(platform: Platform) -> String {
    capitalize(platform.as_str())
}

/// Uppercase the first character: `android` → `Android`.
fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SiteConfig,
        page::{Phase, Signals},
    };

    fn ready(user_agent: &str, language: &str) -> PageState {
        PageState::classified(&Signals::new(user_agent, language))
    }

    fn with_context<R>(path: &str, f: impl FnOnce(RenderContext<'_>) -> R) -> R {
        let config = SiteConfig::default();
        let route = config.route(path).unwrap();
        f(RenderContext::for_route(
            route,
            Translations::embedded(),
            &config.stores,
        ))
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("ios"), "Ios");
        assert_eq!(capitalize("german"), "German");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_iphone_german_end_to_end() {
        let state = ready("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", "de-AT");
        assert_eq!(
            state,
            PageState {
                platform: Platform::Ios,
                locale: Locale::German,
                phase: Phase::Ready,
            }
        );

        let html = with_context("/download", |ctx| ctx.render_page(&state));
        assert!(html.contains(r#"href="https://www.apple.com/app-store/""#));
        assert!(html.contains(r#"src="/appstore.svg""#));
        assert!(!html.contains("play.google.com"));
        assert!(!html.contains("/playstore.svg"));
        assert!(html.contains("Laden Sie unsere App herunter"));
        assert!(html.contains("Erkanntes Gerät"));
        assert!(html.contains(">Ios<"));
        assert!(html.contains(">German<"));
        assert!(html.contains(r#"<html lang="de">"#));
        assert!(!html.contains("skeleton\""));
    }

    #[test]
    fn test_android_shows_only_play_store() {
        let state = ready("Linux; Android 14", "bn-BD");
        let html = with_context("/download", |ctx| ctx.render_ready(&state));

        assert!(html.contains("play.google.com"));
        assert!(!html.contains("apple.com"));
        assert!(html.contains("আমাদের অ্যাপ ডাউনলোড করুন"));
        assert!(html.contains(">Android<"));
        assert!(html.contains(">Bengali<"));
    }

    #[test]
    fn test_desktop_shows_both_badges() {
        let state = ready("Mozilla/5.0 (X11; Linux x86_64)", "fr-FR");
        let html = with_context("/download", |ctx| ctx.render_ready(&state));

        assert!(html.contains("apple.com"));
        assert!(html.contains("play.google.com"));
        assert_eq!(html.matches("<img ").count(), 2);
        assert!(html.contains(r#"width="160" height="52""#));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains("Download Our App"));
        assert!(html.contains(">English<"));
    }

    #[test]
    fn test_loading_placeholders() {
        let state = PageState::default();
        let html = with_context("/download", |ctx| ctx.render_loading(&state));

        assert_eq!(html.matches(r#"class="skeleton""#).count(), 2);
        assert!(html.contains("width: 160px; height: 52px"));
        assert!(!html.contains("<a "));
        assert!(html.contains(r#"id="page-loading""#));
        assert!(html.contains("Download Our App"));
    }

    #[test]
    fn test_placeholder_count_follows_platform() {
        let state = PageState {
            platform: Platform::Ios,
            ..PageState::default()
        };
        let html = with_context("/download", |ctx| ctx.render_loading(&state));
        assert_eq!(html.matches(r#"class="skeleton""#).count(), 1);
    }

    #[test]
    fn test_render_page_picks_phase() {
        let html = with_context("/download", |ctx| ctx.render_page(&PageState::default()));
        assert!(html.contains(r#"id="page-loading""#));
        assert!(!html.contains(r#"id="page-ready""#));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_unlocalized_page_ignores_locale() {
        let state = ready("iPad", "de-DE");
        let html = with_context("/", |ctx| ctx.render_page(&state));

        assert!(html.contains("Download Our App"));
        assert!(!html.contains("Laden Sie"));
        assert!(html.contains("Detected device: <strong>Ios</strong>"));
        assert!(!html.contains("German"));
        assert!(html.contains(r#"width="150" height="50""#));
        assert!(html.contains(r#"<html lang="en">"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let translations = Translations::from_json(
            r#"{ "english": { "title": "<b>Apps & more</b>", "description": "\"quoted\"", "detected": "d", "lang": "l" } }"#,
        )
        .unwrap();
        let stores = StoreConfig::default();
        let route = RouteConfig::default();
        let ctx = RenderContext::for_route(&route, &translations, &stores);

        let html = ctx.render_page(&ready("", ""));
        assert!(html.contains("&lt;b&gt;Apps &amp; more&lt;/b&gt;"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_streamed_pieces_form_document() {
        let state = ready("Android", "de");
        let html = with_context("/download", |ctx| {
            let mut html = ctx.document_head(&PageState::default());
            html.push_str(&ctx.render_loading(&PageState::default()));
            html.push_str(ctx.hide_loading());
            html.push_str(&ctx.render_ready(&state));
            html.push_str(ctx.document_tail());
            html
        });

        let loading = html.find("page-loading\"").unwrap();
        let hide = html.find("#page-loading { display: none; }").unwrap();
        let ready = html.find("page-ready").unwrap();
        assert!(loading < hide && hide < ready);
    }
}
