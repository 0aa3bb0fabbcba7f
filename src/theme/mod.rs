//! Theme trait and static registry.
//!
//! A theme turns one resolved route (document content + localized nav +
//! metadata) into a complete HTML page, and optionally materializes shared
//! assets (stylesheets) once per build. Themes are compiled in and resolved
//! by name from a static registry — an unknown name is a configuration
//! error surfaced before any file is written, never a runtime shape probe.
//!
//! Built-in themes:
//!
//! | Name | Layout |
//! |------|--------|
//! | `classic` | two-column with brand header, sidebar widgets, own language switcher |
//! | `minimal` | single column, inline styles, no assets |
//! | `midnight` | dark sidebar layout with configurable palette |
//!
//! Every render returns a [`RenderedPage`] that declares whether the markup
//! already contains a language switcher; the orchestrator injects the
//! fallback switcher from [`crate::lang`] only when it does not.

mod classic;
mod midnight;
mod minimal;

use std::path::Path;

use thiserror::Error;

use crate::blueprint::ThemeSettings;
use crate::locale::LocaleContext;
use crate::nav::NavItem;

pub use classic::Classic;
pub use midnight::Midnight;
pub use minimal::Minimal;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Unknown theme \"{0}\" (available: {names})", names = available_names())]
    Unknown(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only site descriptor shared by every locale tree.
#[derive(Debug, Clone)]
pub struct Site {
    pub name: String,
    pub has_blog: bool,
}

/// Per-route page metadata.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Meta title, falling back to the document title.
    pub title: String,
    pub description: String,
    /// Absolute canonical URL of the route.
    pub canonical: String,
    /// First image referenced by the document, if any.
    pub og_image: Option<String>,
}

/// Everything a theme needs to render one route.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub hostname: &'a str,
    pub site: &'a Site,
    /// Public path of the route being rendered (locale-prefixed).
    pub path_href: &'a str,
    pub meta: &'a PageMeta,
    /// Document body markup, already trusted HTML.
    pub content_html: &'a str,
    /// Localized navigation with the active entry marked.
    pub nav: &'a [NavItem],
    pub assets_href: &'a str,
    pub settings: &'a ThemeSettings,
    pub locales: &'a [String],
    pub locale: &'a LocaleContext,
}

/// Inputs for one-time asset preparation.
#[derive(Debug)]
pub struct PrepareContext<'a> {
    /// The site's `public/` directory.
    pub public_dir: &'a Path,
    pub settings: &'a ThemeSettings,
}

/// Result of asset preparation.
#[derive(Debug, Clone)]
pub struct PreparedAssets {
    /// `/`-rooted href the rendered pages reference assets under.
    pub assets_href: String,
}

/// A fully rendered page.
#[derive(Debug)]
pub struct RenderedPage {
    pub html: String,
    /// True when the markup already carries a language switcher, suppressing
    /// the orchestrator's fallback injection.
    pub includes_language_switcher: bool,
}

/// A named page renderer. Implementations are stateless and registered in
/// [`resolve`].
pub trait Theme: Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Materialize shared assets under `public/`. The default writes nothing
    /// and derives the asset href from the theme name.
    fn prepare(&self, _ctx: &PrepareContext) -> Result<PreparedAssets, ThemeError> {
        Ok(PreparedAssets {
            assets_href: format!("/assets/{}/", self.name()),
        })
    }

    /// Render one route to a complete HTML document. Infallible — themes are
    /// pure functions of the context.
    fn render(&self, ctx: &RenderContext) -> RenderedPage;
}

static THEMES: &[&dyn Theme] = &[&Classic, &Minimal, &Midnight];

/// Look up a theme by its registered name. Fails fast on unknown names so a
/// misconfigured blueprint aborts before any output is written.
pub fn resolve(name: &str) -> Result<&'static dyn Theme, ThemeError> {
    THEMES
        .iter()
        .copied()
        .find(|t| t.name() == name)
        .ok_or_else(|| ThemeError::Unknown(name.to_string()))
}

/// Registered theme names, registry order.
pub fn names() -> Vec<&'static str> {
    THEMES.iter().map(|t| t.name()).collect()
}

fn available_names() -> String {
    names().join(", ")
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock theme that records rendered hrefs and returns a fixed shell.
    /// Uses Mutex so it is Sync and usable from rayon workers.
    #[derive(Debug, Default)]
    pub struct MockTheme {
        pub rendered_hrefs: Mutex<Vec<String>>,
        pub includes_switcher: bool,
    }

    impl Theme for MockTheme {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn render(&self, ctx: &RenderContext) -> RenderedPage {
            self.rendered_hrefs
                .lock()
                .unwrap()
                .push(ctx.path_href.to_string());
            RenderedPage {
                html: format!(
                    "<html><body data-canonical=\"{}\">{}</body></html>",
                    ctx.meta.canonical, ctx.content_html
                ),
                includes_language_switcher: self.includes_switcher,
            }
        }
    }

    #[test]
    fn resolve_finds_builtin_themes() {
        for name in ["classic", "minimal", "midnight"] {
            assert_eq!(resolve(name).unwrap().name(), name);
        }
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let err = resolve("handlebars").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("handlebars"));
        assert!(msg.contains("classic"));
    }

    #[test]
    fn default_prepare_derives_assets_href() {
        let theme = MockTheme::default();
        let ctx = PrepareContext {
            public_dir: Path::new("/tmp/unused"),
            settings: &ThemeSettings::default(),
        };
        let assets = theme.prepare(&ctx).unwrap();
        assert_eq!(assets.assets_href, "/assets/mock/");
    }
}
