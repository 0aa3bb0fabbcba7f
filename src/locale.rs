//! Locale context and locale-prefix arithmetic.
//!
//! All cross-locale link rewriting goes through two operations:
//!
//! - **strip**: remove a known locale prefix from a public href, yielding the
//!   locale-neutral path
//! - **prefix**: re-root a neutral path under a target locale (a no-op for
//!   the default locale, which owns the bare root)
//!
//! The navigation builder and language switcher both compose these instead
//! of doing their own string surgery, so the canonicalization rule lives in
//! one place.

/// The locale a tree is currently being built for, plus the site default.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    pub current: String,
    pub default: String,
}

impl LocaleContext {
    pub fn new(current: &str, default: &str) -> Self {
        LocaleContext {
            current: current.to_lowercase(),
            default: default.to_lowercase(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.current == self.default
    }

    /// Root a locale-neutral path under the current locale.
    pub fn prefix_href(&self, neutral: &str) -> String {
        prefix_href(neutral, &self.current, &self.default)
    }
}

/// Root a locale-neutral, `/`-rooted path under `locale`. The default
/// locale's paths stay unprefixed.
pub fn prefix_href(neutral: &str, locale: &str, default_locale: &str) -> String {
    if locale == default_locale {
        neutral.to_string()
    } else if neutral.starts_with('/') {
        format!("/{locale}{neutral}")
    } else {
        format!("/{locale}/{neutral}")
    }
}

/// Strip a leading locale segment from a public href, keeping the leading
/// slash. Hrefs without a known locale prefix pass through unchanged; an
/// empty href normalizes to `/`.
pub fn strip_locale_prefix(href: &str, locales: &[String]) -> String {
    for locale in locales {
        let bare = format!("/{locale}");
        let prefixed = format!("/{locale}/");
        if href == bare {
            return "/".to_string();
        }
        if let Some(rest) = href.strip_prefix(&prefixed) {
            return format!("/{rest}");
        }
    }
    if href.is_empty() {
        "/".to_string()
    } else {
        href.to_string()
    }
}

/// The locale-equivalent of `href` under `target`: strip whatever locale
/// prefix it carries, then re-root under the target locale.
pub fn href_for_locale(
    href: &str,
    target: &str,
    default_locale: &str,
    locales: &[String],
) -> String {
    let neutral = strip_locale_prefix(href, locales);
    prefix_href(&neutral, target, default_locale)
}
