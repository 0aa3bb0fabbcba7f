//! The `midnight` theme: a dark, fixed-sidebar layout with a palette
//! configurable from the blueprint's theme settings. Like `minimal` it
//! renders no language switcher, relying on the orchestrator's fallback.

use std::fs;

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::{PrepareContext, PreparedAssets, RenderContext, RenderedPage, Theme, ThemeError};

const LAYOUT_CSS: &str = "\
*{box-sizing:border-box}html,body{height:100%}\
body{margin:0;padding:0;background:var(--bg);color:var(--fg);\
font:16px/1.65 var(--font-body);display:grid;grid-template-columns:260px 1fr;min-height:100vh}\
aside{background:var(--sidebar);border-right:1px solid var(--border);padding:22px 18px}\
aside .brand{font-weight:800;letter-spacing:.3px;color:var(--primary)}\
aside .brand .dot{display:inline-block;width:8px;height:8px;border-radius:50%;\
background:var(--accent);margin-right:8px}\
aside ul{list-style:none;margin:22px 0 0;padding:0}\
aside li{margin:6px 0}\
aside a{display:block;padding:8px 10px;border-radius:8px;color:var(--fg);text-decoration:none}\
aside a:hover{background:var(--surface)}\
aside a.active{background:var(--surface);color:var(--primary);\
border-left:2px solid var(--primary)}\
main{padding:32px;max-width:900px}\
main a{color:var(--primary)}\
main img{max-width:100%;border-radius:8px;border:1px solid var(--border)}\
@media (max-width:760px){body{grid-template-columns:1fr}aside{border-right:none;\
border-bottom:1px solid var(--border)}}";

struct Palette {
    bg: String,
    sidebar: &'static str,
    surface: &'static str,
    fg: &'static str,
    border: &'static str,
    primary: String,
    accent: String,
    font: String,
}

#[derive(Debug)]
pub struct Midnight;

impl Theme for Midnight {
    fn name(&self) -> &'static str {
        "midnight"
    }

    fn prepare(&self, ctx: &PrepareContext) -> Result<PreparedAssets, ThemeError> {
        // No stylesheets to ship (everything is inlined), but the assets
        // directory is still created so future fonts/images have a home.
        fs::create_dir_all(ctx.public_dir.join("assets/midnight"))?;
        Ok(PreparedAssets {
            assets_href: "/assets/midnight/".to_string(),
        })
    }

    fn render(&self, ctx: &RenderContext) -> RenderedPage {
        let palette = palette_from(ctx);
        let markup = html! {
            (DOCTYPE)
            html lang=(ctx.locale.current) {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width,initial-scale=1";
                    title { (ctx.meta.title) }
                    meta name="description" content=(ctx.meta.description);
                    link rel="canonical" href=(ctx.meta.canonical);
                    @if let Some(img) = &ctx.meta.og_image {
                        meta property="og:image" content=(img);
                    }
                    link rel="sitemap" type="application/xml" title="Sitemap" href="/sitemap.xml";
                    style { (PreEscaped(root_vars(&palette))) (PreEscaped(LAYOUT_CSS)) }
                }
                body {
                    aside {
                        div.brand { span.dot {} (ctx.site.name) }
                        (sidebar_nav(ctx))
                    }
                    main { (PreEscaped(ctx.content_html)) }
                }
            }
        };

        RenderedPage {
            html: markup.into_string(),
            includes_language_switcher: false,
        }
    }
}

fn sidebar_nav(ctx: &RenderContext) -> Markup {
    html! {
        ul {
            @for item in ctx.nav {
                li { a.active[item.active] href=(item.href) { (item.label) } }
            }
        }
    }
}

fn palette_from(ctx: &RenderContext) -> Palette {
    Palette {
        bg: ctx.settings.bg.clone().unwrap_or_else(|| "#0b0f16".to_string()),
        sidebar: "#0e1420",
        surface: "#111827",
        fg: "#e5e7eb",
        border: "#1f2937",
        primary: ctx
            .settings
            .primary_color
            .clone()
            .unwrap_or_else(|| "#00e5ff".to_string()),
        accent: ctx
            .settings
            .accent_color
            .clone()
            .unwrap_or_else(|| "#ff4ecd".to_string()),
        font: ctx.settings.font.clone().unwrap_or_else(|| {
            "Inter, ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, sans-serif"
                .to_string()
        }),
    }
}

fn root_vars(p: &Palette) -> String {
    format!(
        ":root{{--bg:{};--sidebar:{};--surface:{};--fg:{};--border:{};--primary:{};--accent:{};--font-body:{}}}",
        p.bg, p.sidebar, p.surface, p.fg, p.border, p.primary, p.accent, p.font
    )
}
