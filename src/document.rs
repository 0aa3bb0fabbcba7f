//! Document normalization.
//!
//! Raw content records arrive as already-parsed JSON with every field
//! optional and untrusted. [`Document::normalize`] canonicalizes a record
//! into the internal form the rest of the pipeline relies on: a non-empty
//! URL-safe slug, a non-empty HTML body, bounded meta fields, and a
//! lowercase locale code (or `None` for locale-agnostic content).
//!
//! Normalization never fails — every field has a documented default:
//!
//! | Field | Default |
//! |-------|---------|
//! | `title` | `"Untitled"` |
//! | `slug` | sanitized input, or `"page"` when nothing survives |
//! | `html` | placeholder heading + "content coming soon" paragraph |
//! | `meta_title` | truncated to 60 chars |
//! | `meta_description` | truncated to 160 chars |
//! | `media_links` | explicit list, else singular legacy `media_link`, else empty |
//!
//! Slug collisions (two raw records reducing to the same slug) are not an
//! error; the locale index resolves them last-write-wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content record as supplied by the caller. All fields optional.
///
/// `media_link` is the legacy singular form of `media_links`; when both are
/// present the list wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub html: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub media_links: Option<Vec<String>>,
    pub media_link: Option<String>,
    pub locale: Option<String>,
}

/// A normalized content document. Immutable once built.
///
/// A document with `locale = None` declares no locale and can satisfy any
/// locale's lookup as a late fallback (see the resolver in [`crate::index`]).
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    /// Lowercase, matches `^[a-z0-9-]+$`, never empty.
    pub slug: String,
    /// Body markup. Never empty — blank input gets a placeholder.
    pub html: String,
    pub meta_title: String,
    pub meta_description: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub media_links: Vec<String>,
    /// Lowercase locale code, or `None` meaning "inherit contextually".
    pub locale: Option<String>,
}

/// Placeholder body for documents that arrive with no content.
const PLACEHOLDER_HTML: &str = "<h1>Untitled</h1><p>Content coming soon.</p>";

impl Document {
    /// Canonicalize a raw record. Never fails; side-effect-free.
    pub fn normalize(raw: RawDocument) -> Self {
        let media_links = match raw.media_links {
            Some(links) => links,
            None => raw.media_link.map(|l| vec![l]).unwrap_or_default(),
        };

        Document {
            title: raw
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            slug: sanitize_slug(raw.slug.as_deref().unwrap_or("page")),
            html: ensure_html(raw.html.as_deref().unwrap_or("")),
            meta_title: truncate_chars(raw.meta_title.as_deref().unwrap_or(""), 60),
            meta_description: truncate_chars(raw.meta_description.as_deref().unwrap_or(""), 160),
            author: raw.author,
            category: raw.category,
            published_at: raw.published_at,
            media_links,
            locale: raw
                .locale
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_lowercase()),
        }
    }

    /// The document's effective locale under a given default.
    pub fn locale_or<'a>(&'a self, default_locale: &'a str) -> &'a str {
        self.locale.as_deref().unwrap_or(default_locale)
    }
}

/// Reduce a raw slug to a lowercase `[a-z0-9-]+` token.
///
/// Leading/trailing slashes are stripped, whitespace and path separators
/// become hyphens, anything else unsafe is dropped, and hyphen runs
/// collapse. An empty result defaults to `"page"`.
pub fn sanitize_slug(raw: &str) -> String {
    let trimmed = raw.trim_matches('/').trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut last_hyphen = false;
    for c in trimmed.chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            c if c.is_whitespace() => Some('-'),
            '-' | '_' | '/' | '\\' | '.' => Some('-'),
            _ => None,
        };
        if let Some(m) = mapped {
            if m == '-' {
                if !last_hyphen && !out.is_empty() {
                    out.push('-');
                }
                last_hyphen = true;
            } else {
                out.push(m);
                last_hyphen = false;
            }
        }
    }
    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() { "page".to_string() } else { out }
}

/// Replace a blank body with the placeholder markup.
fn ensure_html(html: &str) -> String {
    if html.trim().is_empty() {
        PLACEHOLDER_HTML.to_string()
    } else {
        html.to_string()
    }
}

/// Truncate to at most `max` characters, boundary-safe.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Collect image URLs referenced by a document: `<img src>` attributes in
/// the body (first nine at most) followed by explicit media links, deduped
/// in order of first appearance.
///
/// The first entry, if any, is used as the route's Open Graph image.
pub fn extract_image_urls(html: &str, media_links: &[String]) -> Vec<String> {
    let mut found = Vec::new();
    // ASCII-lowercased copy keeps byte offsets valid against the original.
    let lower = html.to_ascii_lowercase();

    let mut at = 0;
    while let Some(rel) = lower[at..].find("<img") {
        let tag_start = at + rel;
        let tag_end = lower[tag_start..]
            .find('>')
            .map(|i| tag_start + i)
            .unwrap_or(lower.len());
        if let Some(src) = img_src(&html[tag_start..tag_end], &lower[tag_start..tag_end]) {
            found.push(src.to_string());
        }
        if found.len() > 8 {
            break;
        }
        at = tag_end;
    }

    for link in media_links {
        found.push(link.clone());
    }

    let mut seen = std::collections::HashSet::new();
    found.retain(|u| seen.insert(u.clone()));
    found
}

/// Extract the quoted `src` value from a single `<img ...` tag slice.
fn img_src<'a>(tag: &'a str, tag_lower: &str) -> Option<&'a str> {
    let attr = tag_lower.find("src")?;
    let rest = tag[attr + 3..].trim_start().strip_prefix('=')?;
    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = &rest[1..];
    let end = inner.find(quote)?;
    Some(&inner[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(slug: &str) -> RawDocument {
        RawDocument {
            slug: Some(slug.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(sanitize_slug("About Us"), "about-us");
        assert_eq!(sanitize_slug("Contact"), "contact");
    }

    #[test]
    fn slug_strips_surrounding_slashes() {
        assert_eq!(sanitize_slug("/pricing/"), "pricing");
        assert_eq!(sanitize_slug("//deep//"), "deep");
    }

    #[test]
    fn slug_collapses_hyphen_runs() {
        assert_eq!(sanitize_slug("a -- b"), "a-b");
        assert_eq!(sanitize_slug("one___two"), "one-two");
    }

    #[test]
    fn slug_drops_unsafe_characters() {
        assert_eq!(sanitize_slug("what?!#$"), "what");
        assert_eq!(sanitize_slug("café"), "caf");
    }

    #[test]
    fn slug_empty_defaults_to_page() {
        assert_eq!(sanitize_slug(""), "page");
        assert_eq!(sanitize_slug("///"), "page");
        assert_eq!(sanitize_slug("???"), "page");
    }

    #[test]
    fn normalized_slug_is_always_url_safe() {
        for input in ["", "Hello World", "/x/y/", "ümläut", "a  b", "UPPER"] {
            let doc = Document::normalize(raw(input));
            assert!(!doc.slug.is_empty());
            assert!(
                doc.slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "slug {:?} from {:?} has unsafe chars",
                doc.slug,
                input
            );
        }
    }

    #[test]
    fn empty_body_gets_placeholder() {
        let doc = Document::normalize(RawDocument {
            html: Some("   \n ".to_string()),
            ..Default::default()
        });
        assert!(doc.html.contains("Content coming soon"));
    }

    #[test]
    fn missing_title_defaults_to_untitled() {
        let doc = Document::normalize(RawDocument::default());
        assert_eq!(doc.title, "Untitled");
    }

    #[test]
    fn meta_fields_are_truncated() {
        let doc = Document::normalize(RawDocument {
            meta_title: Some("x".repeat(100)),
            meta_description: Some("y".repeat(300)),
            ..Default::default()
        });
        assert_eq!(doc.meta_title.chars().count(), 60);
        assert_eq!(doc.meta_description.chars().count(), 160);
    }

    #[test]
    fn legacy_media_link_becomes_single_element_list() {
        let doc = Document::normalize(RawDocument {
            media_link: Some("https://cdn.example/one.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.media_links, vec!["https://cdn.example/one.jpg"]);
    }

    #[test]
    fn media_links_list_wins_over_legacy_field() {
        let doc = Document::normalize(RawDocument {
            media_links: Some(vec!["a.jpg".to_string()]),
            media_link: Some("b.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.media_links, vec!["a.jpg"]);
    }

    #[test]
    fn locale_is_lowercased() {
        let doc = Document::normalize(RawDocument {
            locale: Some("FR".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.locale.as_deref(), Some("fr"));
    }

    #[test]
    fn blank_locale_means_unspecified() {
        let doc = Document::normalize(RawDocument {
            locale: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.locale, None);
        assert_eq!(doc.locale_or("en"), "en");
    }

    #[test]
    fn extracts_img_src_attributes_in_order() {
        let html = r#"<p><img src="/a.png"> text <IMG  SRC='/b.png'></p>"#;
        assert_eq!(extract_image_urls(html, &[]), vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn media_links_follow_body_images_and_dedupe() {
        let html = r#"<img src="/a.png">"#;
        let links = vec!["/a.png".to_string(), "/c.png".to_string()];
        assert_eq!(extract_image_urls(html, &links), vec!["/a.png", "/c.png"]);
    }

    #[test]
    fn img_without_src_is_ignored() {
        assert!(extract_image_urls("<img alt=\"x\">", &[]).is_empty());
    }
}
