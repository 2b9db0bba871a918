//! A localization engine that renders natural-sounding messages by
//! applying per-locale CLDR plural, range and gender rules declared in
//! translation files, rather than embedded in application code.
//!
//! The engine itself only cares about four things: classifying numbers
//! into CLDR plural forms ([`plural`], [`range`]), evaluating the small
//! boolean expression language translation files use to pick among
//! alternatives ([`expr`]), selecting and interpolating a translation
//! once a form is known ([`select`], [`interpolate`]), and matching a
//! requested locale against the ones actually available ([`locale`],
//! [`catalog`]). Reading strings files off disk, logging, and wiring a
//! locale preference to a request are all treated as collaborators
//! outside the engine: see [`loader`] (behind the `fs` feature) for a
//! ready-made directory loader, or supply your own.
//!
//! ```rust
//! use lokalize::{Context, EngineConfig, TranslationSet, Value};
//! use std::collections::HashMap;
//!
//! fn build_demo_engine() -> lokalize::error::Result<lokalize::Engine> {
//!     let mut sets = HashMap::new();
//!     sets.insert(
//!         "en".to_string(),
//!         TranslationSet::parse("en", r#"{"greeting": "I read {{bookCount}} books."}"#)?,
//!     );
//!
//!     EngineConfig::builder()
//!         .fallback_locale("en")
//!         .strings_supplier(Box::new(move || Ok(sets.clone())))
//!         .build()
//!         .into_engine()
//! }
//!
//! # fn main() -> lokalize::error::Result<()> {
//! let engine = build_demo_engine()?;
//! let mut ctx = Context::new();
//! ctx.insert("bookCount", Value::integer(3));
//! assert_eq!(engine.get("greeting", &ctx, Some("en"))?, "I read 3 books.");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod expr;
pub mod form;
pub mod interpolate;
pub mod locale;
#[cfg(feature = "fs")]
pub mod loader;
pub mod model;
pub mod numeric;
pub mod operands;
pub mod plural;
pub mod range;
pub mod select;
pub mod value;

pub use catalog::Catalog;
pub use error::{EngineError, Result};
pub use form::{Cardinal, Gender, Ordinal};
pub use locale::{LanguageRange, LanguageTag};
pub use model::TranslationSet;
pub use value::{Context, Value};

use std::collections::HashMap;
use typed_builder::TypedBuilder;

impl TranslationSet {
    /// Parse a single strings file's JSON text. Thin convenience wrapper
    /// around [`model::parse_strings_file`] so callers assembling a small
    /// in-memory catalog (tests, examples) don't need to reach into the
    /// `model` module directly.
    pub fn parse(locale_tag: &str, contents: &str) -> Result<Self> {
        model::parse_strings_file(locale_tag, contents)
    }
}

/// Produces the locale → `TranslationSet` map a `Catalog` is built from.
/// Reading files off disk (see the `fs`-gated [`loader`] module),
/// querying a database, or embedding strings at compile time are all
/// valid implementations; the engine itself doesn't care which.
pub type StringsSupplier = Box<dyn Fn() -> Result<HashMap<String, model::TranslationSet>> + Send + Sync>;

/// Given the built `Catalog` (so it can inspect which locales are
/// actually available), returns the locale a request without an
/// explicit locale should use. Typically backed by a request's
/// `Accept-Language` header or a signed-in user's saved preference.
pub type LocaleSupplier = Box<dyn Fn(&Catalog) -> Option<String> + Send + Sync>;

/// Builder for an [`Engine`]. `fallback_locale` and `strings_supplier`
/// are required; `locale_supplier` and `tiebreakers` default to absent /
/// empty. `.build()` (generated by `typed_builder`) produces an
/// `EngineConfig`; call [`EngineConfig::into_engine`] to resolve the
/// strings supplier and assemble the immutable `Catalog`.
#[derive(TypedBuilder)]
pub struct EngineConfig {
    /// Locale used when a request's locale has no match at all, and when
    /// a chosen locale is missing a key.
    #[builder(setter(into))]
    fallback_locale: String,
    /// Loads every available locale's `TranslationSet`. Called exactly
    /// once, at `into_engine` time.
    strings_supplier: StringsSupplier,
    /// Resolves the locale for a `get` call that didn't specify one.
    #[builder(default, setter(strip_option))]
    locale_supplier: Option<LocaleSupplier>,
    /// Disambiguates locales that share a language subtag (spec.md
    /// §4.5). Required iff such an ambiguity exists; an unresolved
    /// ambiguity fails `into_engine` with `AmbiguousLocale`.
    #[builder(default)]
    tiebreakers: HashMap<String, Vec<String>>,
}

impl EngineConfig {
    /// Call the strings supplier, build the `Catalog`, and produce the
    /// ready-to-query `Engine`. Fails with whatever the strings supplier
    /// returned, or with `AmbiguousLocale` if the catalog can't
    /// disambiguate two locales sharing a language subtag.
    pub fn into_engine(self) -> Result<Engine> {
        let sets = (self.strings_supplier)()?;
        let catalog = Catalog::build(sets, self.fallback_locale, self.tiebreakers)?;
        Ok(Engine {
            catalog,
            locale_supplier: self.locale_supplier,
        })
    }
}

/// The stateless query entrypoint: the locale matcher and the
/// translation selector behind a single `get` call (spec.md §4.6). Built
/// once via [`EngineConfig`], then safe to query from any number of
/// threads without external synchronization (spec.md §5).
pub struct Engine {
    catalog: Catalog,
    locale_supplier: Option<LocaleSupplier>,
}

impl Engine {
    /// Render `key` against `ctx` for `locale` (or, if `None`, whatever
    /// the configured locale supplier picks, or the fallback locale if
    /// none is configured).
    ///
    /// A key absent from every locale the request could resolve to is
    /// *not* an error: the key itself is returned unchanged. Every other
    /// query-time failure (`NoTranslationAvailable`, `PlaceholderUnresolved`,
    /// and so on) is surfaced to the caller, since `get` is the boundary
    /// the caller invoked.
    pub fn get(&self, key: &str, ctx: &Context, locale: Option<&str>) -> Result<String> {
        let requested = self.resolve_requested_locale(locale);
        let set = self.catalog.resolve(&requested);

        if let Some(entry) = set.get(key) {
            log::debug!("get({key:?}, locale={requested:?}): found in {:?}", set.locale);
            return select::select(entry, ctx, &set.locale, self.catalog.fallback_locale());
        }

        let fallback = self.catalog.fallback_set();
        if fallback.locale != set.locale {
            if let Some(entry) = fallback.get(key) {
                log::debug!("get({key:?}): missing in {:?}, found in fallback", set.locale);
                return select::select(entry, ctx, &fallback.locale, self.catalog.fallback_locale());
            }
        }

        log::warn!("get({key:?}): key not found in any resolved locale, returning key unchanged");
        Ok(key.to_string())
    }

    fn resolve_requested_locale(&self, locale: Option<&str>) -> String {
        if let Some(locale) = locale {
            return locale.to_string();
        }
        match &self.locale_supplier {
            Some(supplier) => supplier(&self.catalog).unwrap_or_else(|| self.catalog.fallback_locale().to_string()),
            None => self.catalog.fallback_locale().to_string(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets_with(entries: &[(&str, &str)]) -> HashMap<String, TranslationSet> {
        entries
            .iter()
            .map(|(locale, json)| (locale.to_string(), TranslationSet::parse(locale, json).unwrap()))
            .collect()
    }

    #[test]
    fn missing_key_returns_key_unchanged() {
        let sets = sets_with(&[("en", r#"{"known": "hi"}"#)]);
        let engine = EngineConfig::builder()
            .fallback_locale("en")
            .strings_supplier(Box::new(move || Ok(sets.clone())))
            .build()
            .into_engine()
            .unwrap();
        assert_eq!(engine.get("unknown.key", &Context::new(), Some("en")).unwrap(), "unknown.key");
    }

    #[test]
    fn falls_back_when_key_absent_in_requested_locale() {
        let sets = sets_with(&[("en", r#"{"k": "english"}"#), ("fr", r#"{}"#)]);
        let engine = EngineConfig::builder()
            .fallback_locale("en")
            .strings_supplier(Box::new(move || Ok(sets.clone())))
            .build()
            .into_engine()
            .unwrap();
        assert_eq!(engine.get("k", &Context::new(), Some("fr")).unwrap(), "english");
    }

    #[test]
    fn locale_supplier_is_used_when_none_requested() {
        let sets = sets_with(&[("en", r#"{"k": "english"}"#), ("fr", r#"{"k": "français"}"#)]);
        let engine = EngineConfig::builder()
            .fallback_locale("en")
            .strings_supplier(Box::new(move || Ok(sets.clone())))
            .locale_supplier(Box::new(|_catalog: &Catalog| Some("fr".to_string())))
            .build()
            .into_engine()
            .unwrap();
        assert_eq!(engine.get("k", &Context::new(), None).unwrap(), "français");
    }

    #[test]
    fn ambiguous_catalog_fails_to_build() {
        let sets = sets_with(&[("zh-Hans", "{}"), ("zh-Hant", "{}")]);
        let result = EngineConfig::builder()
            .fallback_locale("zh-Hans")
            .strings_supplier(Box::new(move || Ok(sets.clone())))
            .build()
            .into_engine();
        assert!(matches!(result, Err(EngineError::AmbiguousLocale { .. })));
    }
}
