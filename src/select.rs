//! The translation selector: picks among a `LocalizedString`'s
//! alternatives and its own translation template, resolves placeholders,
//! and interpolates the final text. See spec.md §4.4.
//!
//! "Deepest recursion wins": the first matching alternative at each
//! level is chosen, and selection recurses into its body — so an inner
//! match further down the tree is what ultimately produces output.

use crate::error::{EngineError, Result};
use crate::expr;
use crate::form::{Cardinal, Ordinal};
use crate::interpolate::interpolate;
use crate::model::{FormMap, LocalizedString, PlaceholderSpec};
use crate::operands::Number;
use crate::range;
use crate::value::{Context, Value};
use std::collections::HashMap;

/// Render `entry` against `ctx` under `locale`, falling back to
/// `fallback_locale` for plural classification of locales this engine
/// has no rule table for.
pub fn select(entry: &LocalizedString, ctx: &Context, locale: &str, fallback_locale: &str) -> Result<String> {
    for alternative in &entry.alternatives {
        let matched = expr::eval(&alternative.expression, ctx, locale, fallback_locale).unwrap_or(false);
        if matched {
            log::debug!("key {:?}: alternative matched, recursing", entry.key);
            return select(&alternative.body, ctx, locale, fallback_locale);
        }
    }

    let Some(template) = &entry.translation else {
        return Err(EngineError::NoTranslationAvailable {
            key: entry.key.clone(),
        });
    };

    let resolved = resolve_placeholders(entry, ctx, locale, fallback_locale)?;
    Ok(interpolate(template, &resolved, ctx))
}

fn resolve_placeholders(
    entry: &LocalizedString,
    ctx: &Context,
    locale: &str,
    fallback_locale: &str,
) -> Result<HashMap<String, String>> {
    let mut resolved: HashMap<String, String> = HashMap::new();
    for (name, spec) in &entry.placeholders {
        let template = match spec {
            PlaceholderSpec::Value { source, translations } => {
                resolve_value_spec(&entry.key, name, source, translations, ctx, locale, fallback_locale)?
            }
            PlaceholderSpec::Range {
                start,
                end,
                translations,
            } => resolve_range_spec(&entry.key, name, start, end, translations, ctx, locale, fallback_locale)?,
        };
        let rendered = interpolate(&template, &resolved, ctx);
        resolved.insert(name.clone(), rendered);
    }
    Ok(resolved)
}

fn resolve_value_spec(
    key: &str,
    placeholder: &str,
    source: &str,
    translations: &FormMap,
    ctx: &Context,
    locale: &str,
    fallback_locale: &str,
) -> Result<String> {
    let unresolved = || EngineError::PlaceholderUnresolved {
        key: key.to_string(),
        placeholder: placeholder.to_string(),
    };
    let value = ctx.get(source).ok_or_else(unresolved)?;
    match (value, translations) {
        (Value::Number(n), FormMap::Cardinal(_)) => {
            let form = crate::plural::cardinal(&n.operands(), locale, fallback_locale);
            translations
                .get_cardinal(form)
                .or_else(|| translations.get_cardinal(Cardinal::Other))
                .map(str::to_string)
                .ok_or_else(unresolved)
        }
        (Value::Number(n), FormMap::Ordinal(_)) => {
            let form = crate::plural::ordinal(&n.operands(), locale, fallback_locale);
            translations
                .get_ordinal(form)
                .or_else(|| translations.get_ordinal(Ordinal::Other))
                .map(str::to_string)
                .ok_or_else(unresolved)
        }
        (Value::Gender(g), FormMap::Gender(_)) => {
            translations.get_gender(*g).map(str::to_string).ok_or_else(unresolved)
        }
        _ => Err(unresolved()),
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_range_spec(
    key: &str,
    placeholder: &str,
    start: &str,
    end: &str,
    translations: &FormMap,
    ctx: &Context,
    locale: &str,
    fallback_locale: &str,
) -> Result<String> {
    let unresolved = || EngineError::PlaceholderUnresolved {
        key: key.to_string(),
        placeholder: placeholder.to_string(),
    };
    let start_number = as_number(ctx, start).ok_or_else(unresolved)?;
    let end_number = as_number(ctx, end).ok_or_else(unresolved)?;
    let start_form = crate::plural::cardinal(&start_number.operands(), locale, fallback_locale);
    let end_form = crate::plural::cardinal(&end_number.operands(), locale, fallback_locale);
    let range_form = range::range_cardinal(start_form, end_form, locale);
    translations
        .get_cardinal(range_form)
        .or_else(|| translations.get_cardinal(Cardinal::Other))
        .map(str::to_string)
        .ok_or_else(unresolved)
}

fn as_number<'a>(ctx: &'a Context, name: &str) -> Option<&'a Number> {
    match ctx.get(name) {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_strings_file;

    fn ctx(pairs: &[(&str, Value)]) -> Context {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn plain_translation_with_no_placeholders() {
        let set = parse_strings_file("en", r#"{"hi": "Hello"}"#).unwrap();
        let entry = set.get("hi").unwrap();
        assert_eq!(select(entry, &Context::new(), "en", "en").unwrap(), "Hello");
    }

    #[test]
    fn value_placeholder_classifies_cardinal() {
        let contents = r#"{
            "books": {
                "translation": "I read {{bookCount}} books.",
                "placeholders": {
                    "bookCount": {
                        "value": "bookCount",
                        "translations": {
                            "CARDINALITY_ONE": "1 book",
                            "CARDINALITY_OTHER": "{{bookCount}} books"
                        }
                    }
                }
            }
        }"#;
        let set = parse_strings_file("en", contents).unwrap();
        let entry = set.get("books").unwrap();

        let c = ctx(&[("bookCount", Value::integer(1))]);
        assert_eq!(select(entry, &c, "en", "en").unwrap(), "I read 1 book.");

        let c = ctx(&[("bookCount", Value::integer(3))]);
        assert_eq!(select(entry, &c, "en", "en").unwrap(), "I read 3 books.");
    }

    #[test]
    fn alternative_takes_priority_over_translation() {
        let contents = r#"{
            "books": {
                "alternatives": [{"bookCount == 0": "I didn't read any books."}],
                "translation": "I read {{bookCount}} books.",
                "placeholders": {
                    "bookCount": {
                        "value": "bookCount",
                        "translations": {"CARDINALITY_OTHER": "{{bookCount}}"}
                    }
                }
            }
        }"#;
        let set = parse_strings_file("en", contents).unwrap();
        let entry = set.get("books").unwrap();
        let c = ctx(&[("bookCount", Value::integer(0))]);
        assert_eq!(select(entry, &c, "en", "en").unwrap(), "I didn't read any books.");
    }

    #[test]
    fn nested_recursion_deepest_wins() {
        let contents = r#"{
            "books": {
                "alternatives": [
                    {
                        "bookCount < 3": {
                            "alternatives": [{"bookCount == 0": "none at all"}],
                            "translation": "a few"
                        }
                    }
                ],
                "translation": "many"
            }
        }"#;
        let set = parse_strings_file("en", contents).unwrap();
        let entry = set.get("books").unwrap();
        let c = ctx(&[("bookCount", Value::integer(0))]);
        assert_eq!(select(entry, &c, "en", "en").unwrap(), "none at all");
    }

    #[test]
    fn missing_translation_and_no_match_signals_error() {
        let contents = r#"{"k": {"alternatives": [{"n == 1": "one"}]}}"#;
        let set = parse_strings_file("en", contents).unwrap();
        let entry = set.get("k").unwrap();
        let c = ctx(&[("n", Value::integer(2))]);
        assert!(matches!(
            select(entry, &c, "en", "en"),
            Err(EngineError::NoTranslationAvailable { .. })
        ));
    }

    #[test]
    fn range_placeholder() {
        let contents = r#"{
            "meeting": {
                "translation": "The meeting will be {{minHours}}-{{maxHours}} hours long.",
                "placeholders": {
                    "hours": {
                        "range": {"start": "minHours", "end": "maxHours"},
                        "translations": {
                            "CARDINALITY_ONE": "one hour",
                            "CARDINALITY_OTHER": "several hours"
                        }
                    }
                }
            }
        }"#;
        let set = parse_strings_file("fr", contents).unwrap();
        let entry = set.get("meeting").unwrap();
        let c = ctx(&[("minHours", Value::integer(0)), ("maxHours", Value::integer(1))]);
        let rendered = select(entry, &c, "fr", "fr").unwrap();
        assert_eq!(rendered, "The meeting will be 0-1 hours long.");
    }
}
