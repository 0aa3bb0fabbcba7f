//! # polysite
//!
//! A multi-tenant, locale-partitioned static site builder. One build
//! invocation takes a JSON payload of structured content documents (pages
//! and posts, each optionally tagged with a locale) and produces a complete
//! static file tree with canonical routing, navigation, a language switcher,
//! and discovery feeds (sitemap, robots, RSS) under
//! `{sites_root}/{hostname}/public/`.
//!
//! # Architecture: Resolve, Plan, Render
//!
//! The core of the pipeline is the locale-aware resolution and routing
//! engine:
//!
//! ```text
//! raw records → document::normalize → index (slug × locale)
//!             → per (locale, slug): index::pick → route::RoutePlan
//!             → theme render + language switcher → output tree + feeds
//! ```
//!
//! Three invariants hold everything together:
//!
//! - **URL canonicalization**: the default locale owns the bare root;
//!   every other locale's whole tree nests under `/{locale}/`. Sitemap,
//!   feeds, navigation, and the language switcher all derive from this one
//!   rule ([`route`], [`locale`]).
//! - **Deterministic fallback**: when a slug has no variant for the
//!   requested locale, [`index::DocumentIndex::pick`] walks a fixed chain
//!   (exact locale, locale-agnostic, default locale, lexicographically
//!   first remainder) so rebuilds are reproducible.
//! - **Idempotent rebuild**: identical inputs against a clean target yield
//!   byte-identical output, except the manifest's build timestamp.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | Normalizes raw records into canonical [`document::Document`]s |
//! | [`index`] | Slug × locale index and the resolution fallback chain |
//! | [`route`] | Canonical hrefs, output paths, and absolute URLs per route |
//! | [`locale`] | Locale-prefix arithmetic shared by nav, switcher, and routes |
//! | [`nav`] | Navigation building, localization, active-link marking |
//! | [`lang`] | Fallback language switcher fragment and injection |
//! | [`theme`] | `Theme` trait, static registry, built-in maud themes |
//! | [`feeds`] | sitemap.xml / robots.txt / rss.xml formatting |
//! | [`blueprint`] | Build request deserialization with safe defaults |
//! | [`build`] | Orchestrator: locale trees, feeds, build manifest |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! Themes are compiled-in [maud](https://maud.lambda.xyz/) renderers behind
//! a small `Theme` trait, resolved by name from a static registry. Malformed
//! markup is a build error, interpolation is escaped by default, and an
//! unknown theme name fails before any file is written. There is no runtime
//! template loading to go wrong.
//!
//! ## Input Defects Are Never Fatal
//!
//! Content arrives from an upstream CMS and is normalized, not validated:
//! every missing or malformed field has a documented default, and two
//! documents colliding on a slug resolve last-write-wins. The only fatal
//! errors are a missing hostname, an unknown theme, and filesystem failures.
//!
//! ## Per-Route Parallelism Without Shared State
//!
//! Every (locale, slug, role) tuple maps to a distinct output path, so
//! route writes within a locale run on the rayon pool with no locking.
//! Each write returns its canonical URL and the orchestrator folds them
//! into the sitemap, keeping leaf functions free of shared mutable state.

pub mod blueprint;
pub mod build;
pub mod document;
pub mod feeds;
pub mod index;
pub mod lang;
pub mod locale;
pub mod nav;
pub mod output;
pub mod route;
pub mod theme;
