//! Slug/locale indexing and document resolution.
//!
//! Pages and posts are indexed separately, each as a two-level map:
//! slug → locale → [`Document`]. The outer key is the document slug with any
//! surrounding `/` stripped (an empty result collapses to the literal
//! `"home"`); the inner key is a [`LocaleKey`] — either a specific lowercase
//! locale code or the unspecified bucket for documents that declare none.
//!
//! Both levels are `BTreeMap`s, so iteration order is lexicographic and
//! stable across builds. Later documents with the same (slug, locale)
//! overwrite earlier ones; this is the documented last-write-wins behavior
//! for slug collisions, not an error.
//!
//! ## Resolution fallback chain
//!
//! [`DocumentIndex::pick`] chooses which variant to render for a
//! (slug, requested locale) pair, first hit wins:
//!
//! 1. the exact requested locale
//! 2. the unspecified bucket — locale-agnostic content applies everywhere
//!    before any one locale's content does
//! 3. the site default locale
//! 4. the remaining variant with the lexicographically smallest locale code
//! 5. nothing — the route is simply not produced

use std::collections::BTreeMap;

use crate::document::Document;

/// Locale slot in the index: a concrete code or the bucket for documents
/// that declare no locale. A tagged key cannot collide with a real locale
/// code the way a sentinel string could.
///
/// The derived order sorts specific codes lexicographically and places the
/// unspecified bucket last, which makes resolver rule 4 deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocaleKey {
    Specific(String),
    Unspecified,
}

impl LocaleKey {
    fn for_document(doc: &Document) -> Self {
        match &doc.locale {
            Some(code) => LocaleKey::Specific(code.clone()),
            None => LocaleKey::Unspecified,
        }
    }
}

/// Immutable slug → locale → document mapping for one document collection.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    by_slug: BTreeMap<String, BTreeMap<LocaleKey, Document>>,
}

impl DocumentIndex {
    /// Index a collection of normalized documents.
    pub fn build(documents: &[Document]) -> Self {
        let mut by_slug: BTreeMap<String, BTreeMap<LocaleKey, Document>> = BTreeMap::new();
        for doc in documents {
            let slug = index_slug(&doc.slug);
            by_slug
                .entry(slug)
                .or_default()
                .insert(LocaleKey::for_document(doc), doc.clone());
        }
        DocumentIndex { by_slug }
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    /// Slugs in lexicographic order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.by_slug.keys().map(String::as_str)
    }

    /// Resolve the document to render for `slug` under `locale`, following
    /// the fallback chain documented on this module. Returns `None` when the
    /// slug has no entry at all (the caller skips the route).
    pub fn pick(&self, slug: &str, locale: &str, default_locale: &str) -> Option<&Document> {
        let variants = self.by_slug.get(slug)?;

        variants
            .get(&LocaleKey::Specific(locale.to_string()))
            .or_else(|| variants.get(&LocaleKey::Unspecified))
            .or_else(|| variants.get(&LocaleKey::Specific(default_locale.to_string())))
            .or_else(|| variants.values().next())
    }

    /// First resolvable document scanning slugs in index order. Used to find
    /// a home substitute when nothing is slugged `home`.
    pub fn first_available(&self, locale: &str, default_locale: &str) -> Option<&Document> {
        self.by_slug
            .keys()
            .find_map(|slug| self.pick(slug, locale, default_locale))
    }
}

/// Index-level slug key: surrounding slashes stripped, empty collapses to
/// `"home"`. Distinct from document-level sanitization — this only affects
/// how root-ish slugs group.
fn index_slug(slug: &str) -> String {
    let stripped = slug.trim_matches('/');
    if stripped.is_empty() {
        "home".to_string()
    } else {
        stripped.to_string()
    }
}
