//! BCP-47 language tags and the locale-matching/fallback resolver.
//!
//! This module only manipulates tags as strings split on `-`; it does not
//! validate against the IANA subtag registry (that would be a different,
//! much larger crate). It recognizes the shape `language[-script][-region]`
//! which covers every form spec.md names (`en`, `en-GB`, `zh-Hant-TW`).

use std::collections::HashMap;
use std::fmt;

/// A parsed BCP-47 tag, retaining the language subtag plus an optional
/// script and region subtag. Case is normalized: language lowercase,
/// script title-case, region uppercase, matching common BCP-47 practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    pub language: String,
    pub script: Option<String>,
    pub region: Option<String>,
}

impl LanguageTag {
    /// Parse a tag like `en`, `en-GB`, or `zh-Hant-TW`.
    pub fn parse(tag: &str) -> Self {
        let mut subtags = tag.split(['-', '_']).filter(|s| !s.is_empty());
        let language = subtags.next().unwrap_or("").to_ascii_lowercase();
        let mut script = None;
        let mut region = None;
        for sub in subtags {
            if sub.len() == 4 && sub.bytes().all(|b| b.is_ascii_alphabetic()) {
                script = Some(title_case(sub));
            } else if sub.len() == 2 && sub.bytes().all(|b| b.is_ascii_alphabetic()) {
                region = Some(sub.to_ascii_uppercase());
            } else if sub.bytes().all(|b| b.is_ascii_digit()) {
                region = Some(sub.to_string());
            }
        }
        LanguageTag {
            language,
            script,
            region,
        }
    }

    /// Drop script and region, keeping only the language subtag.
    pub fn language_only(&self) -> LanguageTag {
        LanguageTag {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    pub fn to_tag_string(&self) -> String {
        self.to_string()
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

/// One entry of an `Accept-Language`-style weighted preference list.
#[derive(Debug, Clone)]
pub struct LanguageRange {
    pub tag: LanguageTag,
    pub weight: f32,
}

impl LanguageRange {
    pub fn new(tag: &str, weight: f32) -> Self {
        LanguageRange {
            tag: LanguageTag::parse(tag),
            weight,
        }
    }
}

/// Sorts a set of language ranges by descending weight, preserving input
/// order for ties (a stable sort does this for free).
pub fn rank(mut ranges: Vec<LanguageRange>) -> Vec<LanguageRange> {
    ranges.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    ranges
}

/// Resolves requested locales against a fixed set of available tags,
/// applying the tiebreaker map where more than one available tag shares a
/// language subtag.
///
/// Two lifetimes are kept distinct on purpose: `'data` is how long the
/// tag *text* lives (typically as long as a `Catalog`), while `'list` is
/// how long the slice collecting those references together needs to
/// live (often just a temporary `Vec<&str>` built at the call site).
pub struct LocaleMatcher<'data, 'list> {
    available: &'list [&'data str],
    tiebreakers: &'data HashMap<String, Vec<String>>,
}

impl<'data, 'list> LocaleMatcher<'data, 'list> {
    pub fn new(
        available: &'list [&'data str],
        tiebreakers: &'data HashMap<String, Vec<String>>,
    ) -> Self {
        LocaleMatcher {
            available,
            tiebreakers,
        }
    }

    /// Resolve a single requested tag to the best available tag, or
    /// `None` if nothing matches at all (callers fall back to the
    /// catalog's fallback locale in that case).
    pub fn resolve_one(&self, requested: &LanguageTag) -> Option<&'data str> {
        let requested_str = requested.to_tag_string();
        if let Some(exact) = self.available.iter().find(|a| **a == requested_str) {
            return Some(exact);
        }
        if requested.script.is_some() || requested.region.is_some() {
            let stripped = requested.language_only().to_tag_string();
            if let Some(exact) = self.available.iter().find(|a| **a == stripped) {
                return Some(exact);
            }
        }
        let same_language: Vec<&'data str> = self
            .available
            .iter()
            .filter(|a| LanguageTag::parse(a).language == requested.language)
            .copied()
            .collect();
        match same_language.len() {
            0 => None,
            1 => Some(same_language[0]),
            _ => self
                .tiebreakers
                .get(&requested.language)
                .and_then(|preferred| {
                    preferred
                        .iter()
                        .find(|tag| same_language.contains(&tag.as_str()))
                })
                .and_then(|preferred| same_language.iter().find(|a| *a == preferred).copied())
                .or(Some(same_language[0])),
        }
    }

    /// Resolve an ordered (already-ranked) list of requested ranges,
    /// returning the first one that matches anything.
    pub fn resolve_ranges(&self, ranges: &[LanguageRange]) -> Option<&'data str> {
        ranges.iter().find_map(|range| self.resolve_one(&range.tag))
    }

    /// For every language subtag with 2+ available tags, return the
    /// conflicting tag set that has no tiebreaker entry. Empty if the
    /// catalog is unambiguous. Used at `Catalog` build time.
    pub fn ambiguities(&self) -> Vec<(String, Vec<String>)> {
        let mut by_language: HashMap<String, Vec<String>> = HashMap::new();
        for tag in self.available {
            by_language
                .entry(LanguageTag::parse(tag).language)
                .or_default()
                .push(tag.to_string());
        }
        by_language
            .into_iter()
            .filter(|(language, tags)| tags.len() > 1 && !self.tiebreakers.contains_key(language))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        let available = ["en", "en-GB", "fr"];
        let empty = HashMap::new();
        let matcher = LocaleMatcher::new(&available, &empty);
        assert_eq!(
            matcher.resolve_one(&LanguageTag::parse("en-GB")),
            Some("en-GB")
        );
    }

    #[test]
    fn strips_region_when_no_exact_match() {
        let available = ["en", "fr"];
        let empty = HashMap::new();
        let matcher = LocaleMatcher::new(&available, &empty);
        assert_eq!(
            matcher.resolve_one(&LanguageTag::parse("en-US")),
            Some("en")
        );
    }

    #[test]
    fn ambiguity_detected_without_tiebreaker() {
        let available = ["zh-Hans", "zh-Hant"];
        let empty = HashMap::new();
        let matcher = LocaleMatcher::new(&available, &empty);
        assert_eq!(matcher.ambiguities().len(), 1);
    }

    #[test]
    fn tiebreaker_resolves_ambiguity() {
        let available = ["zh-Hans", "zh-Hant"];
        let mut tiebreakers = HashMap::new();
        tiebreakers.insert("zh".to_string(), vec!["zh-Hant".to_string()]);
        let matcher = LocaleMatcher::new(&available, &tiebreakers);
        assert!(matcher.ambiguities().is_empty());
        assert_eq!(
            matcher.resolve_one(&LanguageTag::parse("zh")),
            Some("zh-Hant")
        );
    }

    #[test]
    fn rank_sorts_by_descending_weight() {
        let ranges = vec![LanguageRange::new("fr", 0.5), LanguageRange::new("en", 0.9)];
        let ranked = rank(ranges);
        assert_eq!(ranked[0].tag.language, "en");
        assert_eq!(ranked[1].tag.language, "fr");
    }

    #[test]
    fn rank_preserves_input_order_on_ties() {
        let ranges = vec![
            LanguageRange::new("fr", 0.8),
            LanguageRange::new("en", 0.8),
            LanguageRange::new("de", 0.8),
        ];
        let ranked = rank(ranges);
        assert_eq!(
            ranked.iter().map(|r| r.tag.language.clone()).collect::<Vec<_>>(),
            vec!["fr", "en", "de"]
        );
    }

    #[test]
    fn resolve_ranges_tries_highest_weight_first() {
        let available = ["en", "fr"];
        let empty = HashMap::new();
        let matcher = LocaleMatcher::new(&available, &empty);
        let ranked = rank(vec![LanguageRange::new("fr", 0.5), LanguageRange::new("en", 0.9)]);
        assert_eq!(matcher.resolve_ranges(&ranked), Some("en"));
    }
}
