//! The `classic` theme: a two-column layout with a brand header, primary
//! navigation, a header language switcher, and sidebar widgets.
//!
//! `prepare` writes two stylesheets under `assets/classic/`: the base
//! stylesheet and a `vars.css` synthesized from the blueprint's theme
//! settings (primary/accent color, body font), so color overrides never
//! require re-rendering pages.

use std::fs;

use chrono::{Datelike, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::{PrepareContext, PreparedAssets, RenderContext, RenderedPage, Theme, ThemeError};

const BASE_CSS: &str = include_str!("classic.css");

const DEFAULT_PRIMARY: &str = "#2563eb";
const DEFAULT_ACCENT: &str = "#a855f7";
const DEFAULT_FONT: &str = "Inter, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, \
     Cantarell, \"Helvetica Neue\", Arial, \"Noto Sans\", sans-serif";

#[derive(Debug)]
pub struct Classic;

impl Theme for Classic {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn prepare(&self, ctx: &PrepareContext) -> Result<PreparedAssets, ThemeError> {
        let out_dir = ctx.public_dir.join("assets/classic");
        fs::create_dir_all(&out_dir)?;
        fs::write(out_dir.join("classic.css"), BASE_CSS)?;
        fs::write(out_dir.join("vars.css"), vars_css(ctx))?;
        Ok(PreparedAssets {
            assets_href: "/assets/classic/".to_string(),
        })
    }

    fn render(&self, ctx: &RenderContext) -> RenderedPage {
        let brand = ctx
            .settings
            .logo_text
            .as_deref()
            .unwrap_or(&ctx.site.name);
        let has_switcher = ctx.locales.len() > 1;

        let markup = html! {
            (DOCTYPE)
            html lang=(ctx.locale.current) {
                (head(ctx))
                body {
                    header.header {
                        div.container.header__inner {
                            a.brand href="/" { span.star { "★" } " " (brand) }
                            nav.primary-nav aria-label="Primary" {
                                ul {
                                    @for item in ctx.nav {
                                        li {
                                            a.active[item.active] href=(item.href) { (item.label) }
                                        }
                                    }
                                }
                            }
                            @if has_switcher {
                                (lang_links(ctx))
                            }
                        }
                    }
                    div.container.layout {
                        main {
                            article.card { (PreEscaped(ctx.content_html)) }
                        }
                        aside.sidebar {
                            @if ctx.site.has_blog {
                                div.widget {
                                    strong { "Blog" }
                                    div { a href=(ctx.locale.prefix_href("/blog/")) { "Latest Posts" } }
                                    div { a href="/rss.xml" { "RSS Feed" } }
                                }
                            }
                            div.widget {
                                strong { "Navigation" }
                                ul.widget-nav {
                                    @for item in ctx.nav {
                                        li { a href=(item.href) { (item.label) } }
                                    }
                                }
                            }
                        }
                    }
                    footer.footer {
                        div.container.footer__inner {
                            small { "© " (Utc::now().year()) " " (ctx.site.name) }
                            small { "Powered by polysite" }
                        }
                    }
                }
            }
        };

        RenderedPage {
            html: markup.into_string(),
            includes_language_switcher: has_switcher,
        }
    }
}

fn head(ctx: &RenderContext) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (ctx.meta.title) }
            meta name="description" content=(ctx.meta.description);
            link rel="canonical" href=(ctx.meta.canonical);
            meta property="og:title" content=(ctx.meta.title);
            meta property="og:description" content=(ctx.meta.description);
            meta property="og:type" content="website";
            meta property="og:url" content=(ctx.meta.canonical);
            @if let Some(img) = &ctx.meta.og_image {
                meta property="og:image" content=(img);
            }
            link rel="sitemap" type="application/xml" title="Sitemap" href="/sitemap.xml";
            @if ctx.site.has_blog {
                link rel="alternate" type="application/rss+xml" title="RSS" href="/rss.xml";
            }
            link rel="stylesheet" href={ (ctx.assets_href) "vars.css" };
            link rel="stylesheet" href={ (ctx.assets_href) "classic.css" };
        }
    }
}

/// The header language switcher. Locale roots only — the per-page
/// locale-equivalent links live in the fallback switcher, which this theme
/// suppresses by declaring its own.
fn lang_links(ctx: &RenderContext) -> Markup {
    html! {
        div.lang {
            @for code in ctx.locales {
                @let href = if *code == ctx.locale.default {
                    "/".to_string()
                } else {
                    format!("/{code}/")
                };
                a.active[*code == ctx.locale.current] href=(href) { (code.to_uppercase()) }
            }
        }
    }
}

/// CSS custom properties from the blueprint's theme settings.
fn vars_css(ctx: &PrepareContext) -> String {
    format!(
        ":root{{\n  --color-primary: {};\n  --color-accent:  {};\n  --font-body:     {};\n}}\n",
        ctx.settings.primary_color.as_deref().unwrap_or(DEFAULT_PRIMARY),
        ctx.settings.accent_color.as_deref().unwrap_or(DEFAULT_ACCENT),
        ctx.settings.font.as_deref().unwrap_or(DEFAULT_FONT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::ThemeSettings;
    use crate::locale::LocaleContext;
    use crate::nav::NavItem;
    use crate::theme::{PageMeta, Site};

    fn render_with(locales: &[&str], current: &str) -> RenderedPage {
        let site = Site {
            name: "Example".to_string(),
            has_blog: true,
        };
        let meta = PageMeta {
            title: "About — Example".to_string(),
            description: "About the example site".to_string(),
            canonical: "https://example.com/about/".to_string(),
            og_image: Some("/img/cover.png".to_string()),
        };
        let nav = vec![NavItem {
            href: "/about/".to_string(),
            label: "About".to_string(),
            active: true,
        }];
        let settings = ThemeSettings {
            logo_text: Some("Example Co".to_string()),
            ..Default::default()
        };
        let locales: Vec<String> = locales.iter().map(|l| l.to_string()).collect();
        let locale = LocaleContext::new(current, "en");
        let ctx = RenderContext {
            hostname: "example.com",
            site: &site,
            path_href: "/about/",
            meta: &meta,
            content_html: "<h1>About</h1>",
            nav: &nav,
            assets_href: "/assets/classic/",
            settings: &settings,
            locales: &locales,
            locale: &locale,
        };
        Classic.render(&ctx)
    }

    #[test]
    fn renders_complete_document_with_meta() {
        let page = render_with(&["en"], "en");
        assert!(page.html.starts_with("<!DOCTYPE html>"));
        assert!(page.html.contains("<title>About — Example</title>"));
        assert!(page.html.contains(r#"rel="canonical" href="https://example.com/about/""#));
        assert!(page.html.contains(r#"property="og:image" content="/img/cover.png""#));
    }

    #[test]
    fn brand_prefers_logo_text() {
        let page = render_with(&["en"], "en");
        assert!(page.html.contains("Example Co"));
    }

    #[test]
    fn active_nav_entry_is_marked() {
        let page = render_with(&["en"], "en");
        assert!(page.html.contains(r#"class="active" href="/about/""#));
    }

    #[test]
    fn declares_switcher_only_with_multiple_locales() {
        assert!(!render_with(&["en"], "en").includes_language_switcher);
        let page = render_with(&["en", "fr"], "fr");
        assert!(page.includes_language_switcher);
        assert!(page.html.contains(">FR<"));
        assert!(page.html.contains(r#"href="/fr/""#));
    }

    #[test]
    fn blog_widget_links_into_current_locale() {
        let page = render_with(&["en", "fr"], "fr");
        assert!(page.html.contains(r#"href="/fr/blog/""#));
    }

    #[test]
    fn prepare_writes_both_stylesheets() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = ThemeSettings {
            primary_color: Some("#112233".to_string()),
            ..Default::default()
        };
        let assets = Classic
            .prepare(&PrepareContext {
                public_dir: tmp.path(),
                settings: &settings,
            })
            .unwrap();
        assert_eq!(assets.assets_href, "/assets/classic/");

        let vars = std::fs::read_to_string(tmp.path().join("assets/classic/vars.css")).unwrap();
        assert!(vars.contains("--color-primary: #112233"));
        assert!(tmp.path().join("assets/classic/classic.css").exists());
    }
}
