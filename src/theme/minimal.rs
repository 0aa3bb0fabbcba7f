//! The `minimal` theme: a single-column page with inline styles and no
//! materialized assets. Renders no language switcher of its own, so the
//! orchestrator injects the floating fallback on multi-locale sites.

use maud::{DOCTYPE, PreEscaped, html};

use super::{PrepareContext, PreparedAssets, RenderContext, RenderedPage, Theme, ThemeError};

const INLINE_CSS: &str = "\
body{font:16px/1.6 system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Cantarell,sans-serif;\
margin:2rem;color:#111}\
nav a{margin-right:12px}\
nav a.active{font-weight:700}\
a{color:#2563eb;text-decoration:none}";

#[derive(Debug)]
pub struct Minimal;

impl Theme for Minimal {
    fn name(&self) -> &'static str {
        "minimal"
    }

    /// No assets to write; the stub href keeps the render contract uniform.
    fn prepare(&self, _ctx: &PrepareContext) -> Result<PreparedAssets, ThemeError> {
        Ok(PreparedAssets {
            assets_href: "/assets/minimal/".to_string(),
        })
    }

    fn render(&self, ctx: &RenderContext) -> RenderedPage {
        let markup = html! {
            (DOCTYPE)
            html lang=(ctx.locale.current) {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width,initial-scale=1";
                    title { (ctx.meta.title) }
                    meta name="description" content=(ctx.meta.description);
                    link rel="canonical" href=(ctx.meta.canonical);
                    style { (PreEscaped(INLINE_CSS)) }
                }
                body {
                    nav {
                        @for item in ctx.nav {
                            a.active[item.active] href=(item.href) { (item.label) }
                        }
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
