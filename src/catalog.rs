//! The `Catalog`: an immutable, locale → `TranslationSet` mapping built
//! once and queried many times (spec.md §3, §4.5).

use crate::error::{EngineError, Result};
use crate::locale::{rank, LanguageRange, LanguageTag, LocaleMatcher};
use crate::model::TranslationSet;
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// The fully-built, immutable translation catalog. Cheap to wrap in an
/// `Arc` for hot-reload: build a new one and swap the reference: see
/// spec.md §5.
#[derive(Debug)]
pub struct Catalog {
    sets: HashMap<String, TranslationSet>,
    fallback_locale: String,
    tiebreakers: HashMap<String, Vec<String>>,
    /// The available tags, sorted once on first query and reused by every
    /// subsequent `resolve`/`resolve_ranges` call rather than rebuilt from
    /// `sets.keys()` each time. `Catalog` never mutates `sets` after
    /// `build`, so one lazily-computed list is valid for the catalog's
    /// whole lifetime.
    available_cache: OnceCell<Vec<String>>,
}

impl Catalog {
    /// Build a `Catalog` from a locale → `TranslationSet` map. Fails with
    /// `AmbiguousLocale` if any language code has two or more tags and no
    /// tiebreaker entry (spec.md §4.5 "Build-time ambiguity check").
    pub fn build(
        sets: HashMap<String, TranslationSet>,
        fallback_locale: impl Into<String>,
        tiebreakers: HashMap<String, Vec<String>>,
    ) -> Result<Self> {
        let fallback_locale = fallback_locale.into();

        let available: Vec<&str> = sets.keys().map(String::as_str).collect();
        let matcher = LocaleMatcher::new(&available, &tiebreakers);
        if let Some((language, tags)) = matcher.ambiguities().into_iter().next() {
            return Err(EngineError::AmbiguousLocale { language, tags });
        }

        if !sets.contains_key(&fallback_locale) {
            return Err(EngineError::MalformedStructure {
                path: fallback_locale.clone(),
                reason: "fallback locale has no translation set".to_string(),
            });
        }

        log::debug!(
            "catalog built with {} locale(s), fallback {:?}",
            sets.len(),
            fallback_locale
        );
        Ok(Catalog {
            sets,
            fallback_locale,
            tiebreakers,
            available_cache: OnceCell::new(),
        })
    }

    fn available_tags(&self) -> &[String] {
        self.available_cache
            .get_or_init(|| self.sets.keys().cloned().collect())
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn fallback_set(&self) -> &TranslationSet {
        self.sets
            .get(&self.fallback_locale)
            .expect("build() verifies the fallback locale has a set")
    }

    /// Resolve a single requested BCP-47 tag to the best-matching
    /// `TranslationSet`, falling back to the catalog's fallback locale if
    /// nothing matches (spec.md §4.5 step 3).
    pub fn resolve(&self, requested: &str) -> &TranslationSet {
        let available: Vec<&str> = self.available_tags().iter().map(String::as_str).collect();
        let matcher = LocaleMatcher::new(&available, &self.tiebreakers);
        let tag = matcher
            .resolve_one(&LanguageTag::parse(requested))
            .unwrap_or(&self.fallback_locale);
        self.sets.get(tag).unwrap_or_else(|| self.fallback_set())
    }

    /// Resolve an unordered weighted list of requested ranges, as
    /// `resolve` does for a single tag. Ranges are sorted by descending
    /// weight (ties preserve input order, spec.md §4.5 step 1) before any
    /// are matched.
    pub fn resolve_ranges(&self, ranges: &[LanguageRange]) -> &TranslationSet {
        let ranked = rank(ranges.to_vec());
        let available: Vec<&str> = self.available_tags().iter().map(String::as_str).collect();
        let matcher = LocaleMatcher::new(&available, &self.tiebreakers);
        match matcher.resolve_ranges(&ranked) {
            Some(tag) => self.sets.get(tag).unwrap_or_else(|| self.fallback_set()),
            None => self.fallback_set(),
        }
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}
