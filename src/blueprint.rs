//! Build request deserialization.
//!
//! A build invocation is a single JSON payload: a blueprint (site identity,
//! theme selection, default locale), the locale set, and the raw page/post
//! records. Every field is optional with a safe default — input defects are
//! normalized away, never surfaced (the one exception is a missing hostname,
//! which the orchestrator rejects before touching the filesystem).
//!
//! ```json
//! {
//!   "hostname": "example.com",
//!   "locales": ["en", "fr"],
//!   "blueprint": {
//!     "site_name": "Example",
//!     "default_locale": "en",
//!     "theme": {
//!       "name": "classic",
//!       "primaryColor": "#2563eb",
//!       "nav": { "items": [{ "slug": "home" }], "includeBlog": true }
//!     }
//!   },
//!   "pages": [ { "title": "...", "slug": "...", "html": "..." } ],
//!   "posts": []
//! }
//! ```
//!
//! Blueprint keys are snake_case; theme settings keys are camelCase, matching
//! the payloads the upstream CMS emits.

use serde::{Deserialize, Serialize};

use crate::document::RawDocument;

/// One complete build invocation payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildRequest {
    /// Target hostname; falls back to `blueprint.primary_domain`.
    pub hostname: Option<String>,
    #[serde(default)]
    pub blueprint: Blueprint,
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default)]
    pub pages: Vec<RawDocument>,
    #[serde(default)]
    pub posts: Vec<RawDocument>,
}

impl BuildRequest {
    /// Resolved hostname: the explicit field, else the blueprint's primary
    /// domain. `None` means the request is unbuildable.
    pub fn hostname(&self) -> Option<String> {
        self.hostname
            .as_deref()
            .or(self.blueprint.primary_domain.as_deref())
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
    }

    /// The locale set, lowercased; an empty set defaults to `["en"]`.
    pub fn locales(&self) -> Vec<String> {
        let cleaned: Vec<String> = self
            .locales
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        if cleaned.is_empty() {
            vec!["en".to_string()]
        } else {
            cleaned
        }
    }

    /// The default locale: the blueprint's, else the first of the set.
    pub fn default_locale(&self) -> String {
        self.blueprint
            .default_locale
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.locales()[0].clone())
    }
}

/// Site identity and theme selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Blueprint {
    pub site_name: Option<String>,
    pub primary_domain: Option<String>,
    pub default_locale: Option<String>,
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// Theme selection and presentation overrides. Serialized back into the
/// build manifest verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "NavConfig::is_empty")]
    pub nav: NavConfig,
}

impl ThemeSettings {
    /// Selected theme name, lowercased; defaults to `classic`.
    pub fn theme_name(&self) -> String {
        self.name
            .as_deref()
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "classic".to_string())
    }
}

/// Explicit navigation configuration. When `items` is empty the navigation
/// builder infers entries from the default-locale pages instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavConfig {
    #[serde(default)]
    pub items: Vec<NavConfigItem>,
    #[serde(default)]
    pub include_blog: bool,
}

impl NavConfig {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.include_blog
    }
}

/// One explicit navigation entry. Label defaults to a title-cased slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfigItem {
    pub slug: String,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_parses_with_defaults() {
        let req: BuildRequest = serde_json::from_str(r#"{ "hostname": "Example.COM" }"#).unwrap();
        assert_eq!(req.hostname().as_deref(), Some("example.com"));
        assert_eq!(req.locales(), vec!["en"]);
        assert_eq!(req.default_locale(), "en");
        assert_eq!(req.blueprint.theme.theme_name(), "classic");
        assert!(req.pages.is_empty());
    }

    #[test]
    fn hostname_falls_back_to_primary_domain() {
        let req: BuildRequest =
            serde_json::from_str(r#"{ "blueprint": { "primary_domain": "site.example" } }"#)
                .unwrap();
        assert_eq!(req.hostname().as_deref(), Some("site.example"));
    }

    #[test]
    fn missing_hostname_is_none() {
        let req: BuildRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.hostname(), None);
    }

    #[test]
    fn default_locale_prefers_blueprint_over_first() {
        let req: BuildRequest = serde_json::from_str(
            r#"{ "locales": ["FR", "en"], "blueprint": { "default_locale": "EN" } }"#,
        )
        .unwrap();
        assert_eq!(req.locales(), vec!["fr", "en"]);
        assert_eq!(req.default_locale(), "en");
    }

    #[test]
    fn theme_settings_use_camel_case_keys() {
        let settings: ThemeSettings = serde_json::from_str(
            r##"{ "name": "Midnight", "primaryColor": "#00e5ff",
                 "nav": { "items": [{ "slug": "about", "title": "About us" }],
                          "includeBlog": true } }"##,
        )
        .unwrap();
        assert_eq!(settings.theme_name(), "midnight");
        assert_eq!(settings.primary_color.as_deref(), Some("#00e5ff"));
        assert!(settings.nav.include_blog);
        assert_eq!(settings.nav.items[0].slug, "about");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        // Upstream payloads carry extra keys (dns blocks, job metadata).
        let req: BuildRequest = serde_json::from_str(
            r#"{ "hostname": "x.example", "dns": { "hostname": "x.example" }, "job": 3 }"#,
        )
        .unwrap();
        assert_eq!(req.hostname().as_deref(), Some("x.example"));
    }
}
