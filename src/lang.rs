//! Fallback language switcher.
//!
//! Every rendered page must let visitors reach the same content in another
//! locale. Themes are expected to render their own switcher and declare it
//! via [`crate::theme::RenderedPage::includes_language_switcher`]; when a
//! theme does not, the orchestrator splices this floating fragment into the
//! page just before the closing `</body>` (or appends it when the boundary
//! is missing).
//!
//! For each target locale the current public path is reduced to its
//! locale-neutral form and re-rooted under the target, so the switcher
//! always links to the locale-equivalent of the page being viewed.

use maud::{Markup, PreEscaped, html};

use crate::locale;

/// At most this many locales appear in the fallback switcher.
const MAX_SWITCHER_LOCALES: usize = 6;

const SWITCHER_CSS: &str = "\
.ps-lang-switcher{position:fixed;right:16px;bottom:16px;z-index:9999;\
background:rgba(20,20,22,.75);backdrop-filter:blur(8px);padding:6px;\
border-radius:9999px;border:1px solid rgba(255,255,255,.15)}\
.ps-lang-switcher a{display:inline-block;margin:0 2px;padding:6px 10px;\
border-radius:9999px;color:#fff;text-decoration:none;\
font:600 12px/1 system-ui,-apple-system,Segoe UI,Roboto,sans-serif;\
border:1px solid rgba(255,255,255,.25)}\
.ps-lang-switcher a.active{background:#fff;color:#111}\
@media (max-width:480px){.ps-lang-switcher{right:10px;bottom:10px}}";

/// Render the floating switcher fragment for the current route, or `None`
/// when fewer than two locales exist.
pub fn build_switcher(
    current_href: &str,
    locales: &[String],
    current_locale: &str,
    default_locale: &str,
) -> Option<Markup> {
    if locales.len() <= 1 {
        return None;
    }

    Some(html! {
        style { (PreEscaped(SWITCHER_CSS)) }
        div.ps-lang-switcher {
            @for code in locales.iter().take(MAX_SWITCHER_LOCALES) {
                @let href = locale::href_for_locale(current_href, code, default_locale, locales);
                a.active[code == current_locale] href=(href) {
                    (code.to_uppercase())
                }
            }
        }
    })
}

/// Splice `fragment` immediately before the last closing `</body>`
/// (case-insensitive); append at the end when no such boundary exists.
pub fn inject_before_close_body(page: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return page.to_string();
    }
    let lower = page.to_ascii_lowercase();
    match lower.rfind("</body>") {
        Some(i) => format!("{}{}{}", &page[..i], fragment, &page[i..]),
        None => format!("{page}{fragment}"),
    }
}
