//! Route planning: canonical URLs and output paths.
//!
//! One (locale, slug, role) tuple maps to exactly one output file and one
//! public URL. The single canonicalization rule everything else (feeds,
//! sitemap, language switcher) depends on:
//!
//! - the default locale owns the bare site root — its routes are never
//!   locale-prefixed
//! - every other locale's entire tree nests one segment deeper under
//!   `/{locale}/`
//!
//! The filesystem path is always locale-relative (the orchestrator picks the
//! per-locale output base), while the public href carries the prefix.

use crate::locale::LocaleContext;

/// Which collection a document belongs to. Posts route under `/blog/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Page,
    Post,
}

/// Slugs that collapse to the site root.
pub fn is_home_slug(slug: &str) -> bool {
    slug == "home" || slug == "index"
}

/// The planned route for one resolved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Locale-relative output path, `/`-rooted and slash-terminated
    /// (`/`, `/about/`, `/blog/launch/`).
    pub fs_path: String,
    /// Public path including any locale prefix (`/fr/about/`).
    pub public_href: String,
}

impl RoutePlan {
    /// Plan the route for a document slug under a locale context.
    pub fn new(slug: &str, role: Role, locale: &LocaleContext) -> Self {
        let fs_path = match role {
            Role::Page if is_home_slug(slug) => "/".to_string(),
            Role::Page => format!("/{slug}/"),
            Role::Post => format!("/blog/{slug}/"),
        };
        let public_href = locale.prefix_href(&fs_path);
        RoutePlan {
            fs_path,
            public_href,
        }
    }

    /// The route for the home step (always the locale root).
    pub fn home(locale: &LocaleContext) -> Self {
        RoutePlan {
            fs_path: "/".to_string(),
            public_href: locale.prefix_href("/"),
        }
    }

    /// Absolute canonical URL for this route.
    pub fn canonical_url(&self, hostname: &str) -> String {
        format!("https://{hostname}{}", self.public_href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_en() -> LocaleContext {
        LocaleContext::new("en", "en")
    }

    fn fr_under_en() -> LocaleContext {
        LocaleContext::new("fr", "en")
    }

    #[test]
    fn page_route_default_locale() {
        let r = RoutePlan::new("about", Role::Page, &default_en());
        assert_eq!(r.fs_path, "/about/");
        assert_eq!(r.public_href, "/about/");
    }

    #[test]
    fn page_route_non_default_locale_is_prefixed() {
        let r = RoutePlan::new("about", Role::Page, &fr_under_en());
        assert_eq!(r.fs_path, "/about/");
        assert_eq!(r.public_href, "/fr/about/");
    }

    #[test]
    fn home_and_index_slugs_collapse_to_root() {
        for slug in ["home", "index"] {
            let r = RoutePlan::new(slug, Role::Page, &default_en());
            assert_eq!(r.fs_path, "/");
            assert_eq!(r.public_href, "/");
        }
        let r = RoutePlan::new("home", Role::Page, &fr_under_en());
        assert_eq!(r.public_href, "/fr/");
    }

    #[test]
    fn post_routes_under_blog() {
        let r = RoutePlan::new("launch", Role::Post, &default_en());
        assert_eq!(r.fs_path, "/blog/launch/");
        assert_eq!(r.public_href, "/blog/launch/");

        let r = RoutePlan::new("launch", Role::Post, &fr_under_en());
        assert_eq!(r.public_href, "/fr/blog/launch/");
    }

    #[test]
    fn post_named_home_still_routes_under_blog() {
        let r = RoutePlan::new("home", Role::Post, &default_en());
        assert_eq!(r.fs_path, "/blog/home/");
    }

    #[test]
    fn canonical_url_is_absolute() {
        let r = RoutePlan::new("about", Role::Page, &fr_under_en());
        assert_eq!(
            r.canonical_url("example.com"),
            "https://example.com/fr/about/"
        );
    }

    #[test]
    fn home_step_route() {
        assert_eq!(RoutePlan::home(&default_en()).public_href, "/");
        assert_eq!(RoutePlan::home(&fr_under_en()).public_href, "/fr/");
    }
}
