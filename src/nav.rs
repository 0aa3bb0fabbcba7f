//! Navigation construction, localization, and active-link marking.
//!
//! The base navigation is built once per build from default-locale content:
//! either from explicit configuration (`theme.nav.items`) or inferred from
//! the page set. Base hrefs are locale-neutral; each locale tree localizes a
//! copy and marks the entry matching the route being rendered.
//!
//! Inference rules (when no explicit items are configured):
//!
//! - `privacy` and `terms` never appear in navigation
//! - remaining page slugs sort lexicographically, Home pinned first when a
//!   `home`/`index` page exists
//! - the inferred list caps at 7 entries
//! - a Blog entry is appended when posts exist and none is present yet
//!
//! Entries dedupe by href, first occurrence wins.

use serde::Serialize;

use crate::blueprint::NavConfig;
use crate::document::Document;
use crate::locale;
use crate::route::is_home_slug;

/// One navigation entry. Hrefs are `/`-rooted and slash-terminated except
/// for the bare root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: String,
    pub label: String,
    pub active: bool,
}

impl NavItem {
    fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        NavItem {
            href: href.into(),
            label: label.into(),
            active: false,
        }
    }
}

/// Maximum number of inferred entries (explicit config is not capped).
const MAX_INFERRED_ITEMS: usize = 7;

/// Build the locale-neutral base navigation.
///
/// `pages` and `has_posts` describe default-locale content only.
pub fn build_nav(config: &NavConfig, pages: &[&Document], has_posts: bool) -> Vec<NavItem> {
    if !config.items.is_empty() {
        let mut items: Vec<NavItem> = config
            .items
            .iter()
            .map(|i| {
                let href = slug_href(&i.slug);
                let label = i
                    .title
                    .clone()
                    .unwrap_or_else(|| pretty_label(&i.slug));
                NavItem::new(href, label)
            })
            .collect();
        if config.include_blog && has_posts && !items.iter().any(|i| i.href == "/blog/") {
            items.push(NavItem::new("/blog/", "Blog"));
        }
        return dedupe_by_href(items);
    }

    let mut slugs: Vec<&str> = pages
        .iter()
        .map(|p| p.slug.as_str())
        .filter(|s| !matches!(*s, "privacy" | "terms"))
        .collect();
    slugs.sort_unstable();

    let mut items = Vec::new();
    if slugs.iter().any(|s| is_home_slug(s)) {
        items.push(NavItem::new("/", "Home"));
    }
    for slug in &slugs {
        if items.len() >= MAX_INFERRED_ITEMS {
            break;
        }
        let href = slug_href(slug);
        if !items.iter().any(|i| i.href == href) {
            items.push(NavItem::new(href, pretty_label(slug)));
        }
    }
    if has_posts && !items.iter().any(|i| i.href == "/blog/") {
        items.push(NavItem::new("/blog/", "Blog"));
    }
    dedupe_by_href(items)
}

/// Localize every href for a target locale: strip any existing locale
/// prefix, then re-root under the target. Identity for the default locale.
pub fn localize_nav(
    nav: &[NavItem],
    target: &str,
    default_locale: &str,
    locales: &[String],
) -> Vec<NavItem> {
    nav.iter()
        .map(|item| NavItem {
            href: locale::href_for_locale(&item.href, target, default_locale, locales),
            label: item.label.clone(),
            active: item.active,
        })
        .collect()
}

/// Mark the entry whose href exactly equals `current_href`; all others
/// inactive. No prefix matching — `/blog/` is not active on `/blog/post/`.
pub fn mark_active(nav: &[NavItem], current_href: &str) -> Vec<NavItem> {
    nav.iter()
        .map(|item| NavItem {
            active: item.href == current_href,
            ..item.clone()
        })
        .collect()
}

/// Map a configured slug to its href: root-ish slugs collapse to `/`,
/// everything else becomes `/{slug}/`.
fn slug_href(slug: &str) -> String {
    let s = slug.trim().trim_matches('/');
    if s.is_empty() || is_home_slug(s) {
        "/".to_string()
    } else {
        format!("/{s}/")
    }
}

/// Human label from a slug: hyphens to spaces, words title-cased.
/// Root-ish slugs label as "Home".
fn pretty_label(slug: &str) -> String {
    let s = slug.trim().trim_matches('/');
    if s.is_empty() || is_home_slug(s) {
        return "Home".to_string();
    }
    s.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dedupe_by_href(items: Vec<NavItem>) -> Vec<NavItem> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|i| seen.insert(i.href.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::NavConfigItem;
    use crate::document::{Document, RawDocument};

    fn page(slug: &str) -> Document {
        Document::normalize(RawDocument {
            slug: Some(slug.to_string()),
            ..Default::default()
        })
    }

    fn hrefs(nav: &[NavItem]) -> Vec<&str> {
        nav.iter().map(|i| i.href.as_str()).collect()
    }

    fn explicit(slugs: &[(&str, Option<&str>)], include_blog: bool) -> NavConfig {
        NavConfig {
            items: slugs
                .iter()
                .map(|(s, t)| NavConfigItem {
                    slug: s.to_string(),
                    title: t.map(str::to_string),
                })
                .collect(),
            include_blog,
        }
    }

    #[test]
    fn explicit_items_keep_configured_order() {
        let cfg = explicit(&[("about", None), ("home", None), ("pricing", None)], false);
        let nav = build_nav(&cfg, &[], false);
        assert_eq!(hrefs(&nav), vec!["/about/", "/", "/pricing/"]);
    }

    #[test]
    fn explicit_title_overrides_pretty_label() {
        let cfg = explicit(&[("our-team", Some("The Team"))], false);
        let nav = build_nav(&cfg, &[], false);
        assert_eq!(nav[0].label, "The Team");

        let cfg = explicit(&[("our-team", None)], false);
        let nav = build_nav(&cfg, &[], false);
        assert_eq!(nav[0].label, "Our Team");
    }

    #[test]
    fn explicit_blog_entry_only_when_posts_exist() {
        let cfg = explicit(&[("home", None)], true);
        assert!(hrefs(&build_nav(&cfg, &[], true)).contains(&"/blog/"));
        assert!(!hrefs(&build_nav(&cfg, &[], false)).contains(&"/blog/"));
    }

    #[test]
    fn explicit_blog_not_duplicated() {
        let cfg = explicit(&[("blog", None)], true);
        let nav = build_nav(&cfg, &[], true);
        assert_eq!(hrefs(&nav), vec!["/blog/"]);
    }

    #[test]
    fn inferred_nav_sorts_and_pins_home_first() {
        let pages = [page("pricing"), page("about"), page("home")];
        let refs: Vec<&Document> = pages.iter().collect();
        let nav = build_nav(&NavConfig::default(), &refs, false);
        assert_eq!(hrefs(&nav), vec!["/", "/about/", "/pricing/"]);
        assert_eq!(nav[0].label, "Home");
    }

    #[test]
    fn inferred_nav_excludes_legal_pages() {
        let pages = [page("privacy"), page("terms"), page("about")];
        let refs: Vec<&Document> = pages.iter().collect();
        let nav = build_nav(&NavConfig::default(), &refs, false);
        assert_eq!(hrefs(&nav), vec!["/about/"]);
    }

    #[test]
    fn inferred_nav_caps_at_seven() {
        let pages: Vec<Document> = ["a", "b", "c", "d", "e", "f", "g", "h", "home"]
            .iter()
            .map(|s| page(s))
            .collect();
        let refs: Vec<&Document> = pages.iter().collect();
        let nav = build_nav(&NavConfig::default(), &refs, false);
        assert_eq!(nav.len(), 7);
        assert_eq!(nav[0].href, "/");
    }

    #[test]
    fn inferred_nav_appends_blog() {
        let pages = [page("about")];
        let refs: Vec<&Document> = pages.iter().collect();
        let nav = build_nav(&NavConfig::default(), &refs, true);
        assert_eq!(hrefs(&nav), vec!["/about/", "/blog/"]);
        assert_eq!(nav.last().unwrap().label, "Blog");
    }

    #[test]
    fn localize_is_identity_for_default_locale() {
        let all = vec!["en".to_string(), "fr".to_string()];
        let nav = vec![NavItem::new("/", "Home"), NavItem::new("/about/", "About")];
        assert_eq!(localize_nav(&nav, "en", "en", &all), nav);
    }

    #[test]
    fn localize_round_trips_through_other_locale() {
        let all = vec!["en".to_string(), "fr".to_string()];
        let nav = vec![NavItem::new("/", "Home"), NavItem::new("/blog/", "Blog")];
        let fr = localize_nav(&nav, "fr", "en", &all);
        assert_eq!(hrefs(&fr), vec!["/fr/", "/fr/blog/"]);
        assert_eq!(localize_nav(&fr, "en", "en", &all), nav);
    }

    #[test]
    fn mark_active_exact_match_only() {
        let nav = vec![NavItem::new("/blog/", "Blog"), NavItem::new("/about/", "About")];

        let marked = mark_active(&nav, "/about/");
        assert_eq!(marked.iter().filter(|i| i.active).count(), 1);
        assert!(marked[1].active);

        // Prefix of an entry is not a match.
        let marked = mark_active(&nav, "/blog/first-post/");
        assert_eq!(marked.iter().filter(|i| i.active).count(), 0);
    }

    #[test]
    fn pretty_label_title_cases_hyphenated_slugs() {
        assert_eq!(pretty_label("our-great-team"), "Our Great Team");
        assert_eq!(pretty_label("home"), "Home");
        assert_eq!(pretty_label("index"), "Home");
        assert_eq!(pretty_label(""), "Home");
    }
}
