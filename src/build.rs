//! Build orchestration.
//!
//! Sequences one build invocation end to end:
//!
//! ```text
//! normalize → index → [default locale tree] → [other locale trees]
//!           → sitemap.xml / robots.txt / rss*.xml → manifest.json
//! ```
//!
//! Each locale tree resolves home first, then every page slug, then every
//! post slug; each resolved route renders through the selected theme and
//! lands at its planned filesystem path. Route writes within a locale run on
//! the rayon pool — every (locale, slug, role) tuple maps to a distinct
//! output path, so writes never contend — and each returns its canonical
//! URL; the orchestrator folds those into the sitemap list.
//!
//! Failure policy: a slug that resolves to no document is silently skipped
//! (the route is simply not produced). Theme resolution and filesystem
//! failures are fatal and abort the whole build; the caller should treat the
//! target directory as unreliable until a full rebuild succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::blueprint::{BuildRequest, ThemeSettings};
use crate::document::{self, Document};
use crate::feeds::{self, FeedPost};
use crate::index::DocumentIndex;
use crate::lang;
use crate::locale::LocaleContext;
use crate::nav::{self, NavItem};
use crate::route::{Role, RoutePlan, is_home_slug};
use crate::theme::{self, PageMeta, PrepareContext, RenderContext, Site, Theme, ThemeError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
    #[error("Build request has no hostname (set `hostname` or `blueprint.primary_domain`)")]
    MissingHostname,
}

/// What one build produced, for CLI reporting.
#[derive(Debug)]
pub struct BuildSummary {
    pub hostname: String,
    pub site_name: String,
    pub theme: String,
    pub locales: Vec<String>,
    pub default_locale: String,
    pub page_count: usize,
    pub post_count: usize,
    /// Per locale, the public hrefs written, in write order.
    pub locale_routes: Vec<(String, Vec<String>)>,
    /// Top-level files written alongside the route tree.
    pub extra_files: Vec<String>,
    pub output_dir: PathBuf,
}

/// Remove a hostname's entire site tree. Missing trees are fine.
pub fn clean_site(sites_root: &Path, hostname: &str) -> Result<(), BuildError> {
    let base = sites_root.join(hostname);
    if base.exists() {
        fs::remove_dir_all(&base)?;
    }
    Ok(())
}

/// Run one complete build into `{sites_root}/{hostname}/public/`.
///
/// The target tree is removed first: a build either yields a complete,
/// consistent output tree or fails outright. Rebuilding with identical
/// inputs produces byte-identical output except for the manifest's
/// `built_at` field.
pub fn build_site(sites_root: &Path, request: &BuildRequest) -> Result<BuildSummary, BuildError> {
    let hostname = request.hostname().ok_or(BuildError::MissingHostname)?;
    let locales = request.locales();
    let default_locale = request.default_locale();

    let base = sites_root.join(&hostname);
    let public_dir = base.join("public");
    if base.exists() {
        fs::remove_dir_all(&base)?;
    }
    fs::create_dir_all(&public_dir)?;

    let pages: Vec<Document> = request
        .pages
        .iter()
        .cloned()
        .map(Document::normalize)
        .collect();
    let posts: Vec<Document> = request
        .posts
        .iter()
        .cloned()
        .map(Document::normalize)
        .collect();

    let settings = &request.blueprint.theme;
    let theme = theme::resolve(&settings.theme_name())?;
    let assets = theme.prepare(&PrepareContext {
        public_dir: &public_dir,
        settings,
    })?;

    let site = Site {
        name: request
            .blueprint
            .site_name
            .clone()
            .unwrap_or_else(|| hostname.clone()),
        has_blog: !posts.is_empty(),
    };

    // Base nav comes from default-locale content only; each locale tree
    // localizes its own copy.
    let default_pages: Vec<&Document> = pages
        .iter()
        .filter(|p| p.locale_or(&default_locale) == default_locale)
        .collect();
    let default_has_posts = posts
        .iter()
        .any(|p| p.locale_or(&default_locale) == default_locale);
    let base_nav = nav::build_nav(&settings.nav, &default_pages, default_has_posts);

    let page_index = DocumentIndex::build(&pages);
    let post_index = DocumentIndex::build(&posts);

    let mut sitemap_urls = Vec::new();
    let mut locale_routes = Vec::new();

    for code in ordered_locales(&locales, &default_locale) {
        let ctx = LocaleContext::new(&code, &default_locale);
        let out_base = if ctx.is_default() {
            public_dir.clone()
        } else {
            let dir = public_dir.join(&code);
            fs::create_dir_all(&dir)?;
            dir
        };

        let tree = LocaleTree {
            hostname: &hostname,
            site: &site,
            theme,
            assets_href: &assets.assets_href,
            settings,
            locales: &locales,
            ctx,
            nav: nav::localize_nav(&base_nav, &code, &default_locale, &locales),
            out_base,
        };
        let written = tree.build(&page_index, &post_index)?;

        let hrefs = written.iter().map(|r| r.public_href.clone()).collect();
        locale_routes.push((code.clone(), hrefs));
        sitemap_urls.extend(written.into_iter().map(|r| r.canonical));
    }

    let mut extra_files = Vec::new();
    fs::write(
        public_dir.join("sitemap.xml"),
        feeds::sitemap_xml(&sitemap_urls),
    )?;
    extra_files.push("sitemap.xml".to_string());
    fs::write(public_dir.join("robots.txt"), feeds::robots_txt(&hostname))?;
    extra_files.push("robots.txt".to_string());

    extra_files.extend(write_rss_feeds(
        &public_dir,
        &hostname,
        &site,
        &posts,
        &locales,
        &default_locale,
    )?);

    let manifest = BuildManifest {
        hostname: hostname.clone(),
        site_name: site.name.clone(),
        locales: locales.clone(),
        default_locale: default_locale.clone(),
        pages: manifest_docs(&pages, &default_locale),
        posts: manifest_docs(&posts, &default_locale),
        built_at: Utc::now().to_rfc3339(),
        theme: ManifestTheme {
            name: theme.name().to_string(),
            config: settings.clone(),
        },
    };
    fs::write(
        base.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    extra_files.push("manifest.json".to_string());

    Ok(BuildSummary {
        hostname,
        site_name: site.name,
        theme: theme.name().to_string(),
        locales,
        default_locale,
        page_count: pages.len(),
        post_count: posts.len(),
        locale_routes,
        extra_files,
        output_dir: public_dir,
    })
}

/// Default locale first, then the rest in configured order.
fn ordered_locales(locales: &[String], default_locale: &str) -> Vec<String> {
    let mut out = vec![default_locale.to_string()];
    out.extend(
        locales
            .iter()
            .filter(|l| *l != default_locale)
            .cloned(),
    );
    out
}

/// A route that was written: its public href and canonical URL.
struct WrittenRoute {
    public_href: String,
    canonical: String,
}

/// Everything shared across one locale's route writes.
struct LocaleTree<'a> {
    hostname: &'a str,
    site: &'a Site,
    theme: &'static dyn Theme,
    assets_href: &'a str,
    settings: &'a ThemeSettings,
    locales: &'a [String],
    ctx: LocaleContext,
    nav: Vec<NavItem>,
    out_base: PathBuf,
}

impl LocaleTree<'_> {
    /// Resolve and write every route for this locale, in slug order:
    /// home, then pages, then posts.
    fn build(
        &self,
        page_index: &DocumentIndex,
        post_index: &DocumentIndex,
    ) -> Result<Vec<WrittenRoute>, BuildError> {
        let mut jobs: Vec<(&Document, RoutePlan)> = Vec::new();

        if let Some(doc) = self.resolve_home(page_index) {
            jobs.push((doc, RoutePlan::home(&self.ctx)));
        }

        // The home step owns the root; root-collapsing slugs are skipped
        // here so every route is written exactly once.
        for slug in page_index.slugs().filter(|s| !is_home_slug(s)) {
            if let Some(doc) = page_index.pick(slug, &self.ctx.current, &self.ctx.default) {
                jobs.push((doc, RoutePlan::new(slug, Role::Page, &self.ctx)));
            }
        }

        for slug in post_index.slugs() {
            if let Some(doc) = post_index.pick(slug, &self.ctx.current, &self.ctx.default) {
                jobs.push((doc, RoutePlan::new(slug, Role::Post, &self.ctx)));
            }
        }

        // Disjoint output paths; collect preserves job order.
        jobs.par_iter()
            .map(|(doc, plan)| self.write_route(*doc, plan))
            .collect()
    }

    /// The home document: slug `home`, else `index`, else the first
    /// resolvable page at all.
    fn resolve_home<'i>(&self, page_index: &'i DocumentIndex) -> Option<&'i Document> {
        page_index
            .pick("home", &self.ctx.current, &self.ctx.default)
            .or_else(|| page_index.pick("index", &self.ctx.current, &self.ctx.default))
            .or_else(|| page_index.first_available(&self.ctx.current, &self.ctx.default))
    }

    /// Render one resolved document and write it at its planned path.
    fn write_route(&self, doc: &Document, plan: &RoutePlan) -> Result<WrittenRoute, BuildError> {
        let dir = if plan.fs_path == "/" {
            self.out_base.clone()
        } else {
            self.out_base.join(plan.fs_path.trim_matches('/'))
        };
        fs::create_dir_all(&dir)?;

        let canonical = plan.canonical_url(self.hostname);
        let images = document::extract_image_urls(&doc.html, &doc.media_links);
        let meta = PageMeta {
            title: if doc.meta_title.is_empty() {
                doc.title.clone()
            } else {
                doc.meta_title.clone()
            },
            description: doc.meta_description.clone(),
            canonical: canonical.clone(),
            og_image: images.into_iter().next(),
        };

        let page = self.theme.render(&RenderContext {
            hostname: self.hostname,
            site: self.site,
            path_href: &plan.public_href,
            meta: &meta,
            content_html: &doc.html,
            nav: &nav::mark_active(&self.nav, &plan.public_href),
            assets_href: self.assets_href,
            settings: self.settings,
            locales: self.locales,
            locale: &self.ctx,
        });

        let html = if page.includes_language_switcher {
            page.html
        } else {
            match lang::build_switcher(
                &plan.public_href,
                self.locales,
                &self.ctx.current,
                &self.ctx.default,
            ) {
                Some(fragment) => {
                    lang::inject_before_close_body(&page.html, &fragment.into_string())
                }
                None => page.html,
            }
        };

        fs::write(dir.join("index.html"), html)?;
        Ok(WrittenRoute {
            public_href: plan.public_href.clone(),
            canonical,
        })
    }
}

/// rss.xml for default-locale posts plus rss.{locale}.xml per non-default
/// locale with posts. Locales without posts get no feed file at all.
fn write_rss_feeds(
    public_dir: &Path,
    hostname: &str,
    site: &Site,
    posts: &[Document],
    locales: &[String],
    default_locale: &str,
) -> Result<Vec<String>, BuildError> {
    let mut written = Vec::new();
    for code in locales {
        let ctx = LocaleContext::new(code, default_locale);
        let locale_posts: Vec<FeedPost> = posts
            .iter()
            .filter(|p| p.locale_or(default_locale) == *code)
            .map(|p| FeedPost {
                doc: p,
                path: RoutePlan::new(&p.slug, Role::Post, &ctx).public_href,
            })
            .collect();
        if locale_posts.is_empty() {
            continue;
        }

        let (filename, channel_name) = if ctx.is_default() {
            ("rss.xml".to_string(), site.name.clone())
        } else {
            (
                format!("rss.{code}.xml"),
                format!("{} ({})", site.name, code.to_uppercase()),
            )
        };
        fs::write(
            public_dir.join(&filename),
            feeds::rss_xml(hostname, &channel_name, &locale_posts),
        )?;
        written.push(filename);
    }
    Ok(written)
}

#[derive(Debug, Serialize)]
struct BuildManifest {
    hostname: String,
    site_name: String,
    locales: Vec<String>,
    default_locale: String,
    pages: Vec<ManifestDoc>,
    posts: Vec<ManifestDoc>,
    built_at: String,
    theme: ManifestTheme,
}

/// Inventory line for one document: locale defaults applied.
#[derive(Debug, Serialize)]
struct ManifestDoc {
    title: String,
    slug: String,
    locale: String,
}

#[derive(Debug, Serialize)]
struct ManifestTheme {
    name: String,
    config: ThemeSettings,
}

fn manifest_docs(docs: &[Document], default_locale: &str) -> Vec<ManifestDoc> {
    docs.iter()
        .map(|d| ManifestDoc {
            title: d.title.clone(),
            slug: d.slug.clone(),
            locale: d.locale_or(default_locale).to_string(),
        })
        .collect()
}
