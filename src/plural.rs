//! The CLDR plural rule engine: classifies a decomposed number into a
//! [`Cardinal`] or [`Ordinal`] form for a given language.
//!
//! Each supported language owns an ordered list of `(form, predicate)`
//! pairs, evaluated in declaration order; the first predicate that
//! matches wins, and `OTHER` is the fallback when none do. Predicates are
//! plain function pointers over [`Operands`] rather than a parsed rule
//! grammar — the rule set is fixed and small enough that hand-written
//! tables following the CLDR specification text are clearer than a
//! general-purpose CLDR rule parser would be.

use crate::form::{Cardinal, Ordinal};
use crate::operands::Operands;
use std::collections::HashMap;

type Predicate = fn(&Operands) -> bool;
type Table<Form> = &'static [(Form, Predicate)];

/// Resolve a BCP-47 tag (or bare language code) to the language subtag
/// this engine keys its tables on. Region and script are ignored.
fn language_of(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

/// Classify `operands` as a cardinal form for `locale`, falling back to
/// the `fallback_locale`'s language if `locale`'s language has no table.
pub fn cardinal(operands: &Operands, locale: &str, fallback_locale: &str) -> Cardinal {
    let language = resolve_language(locale, fallback_locale, cardinal_table_for);
    match cardinal_table_for(&language) {
        Some(table) => first_match(table, operands).unwrap_or(Cardinal::Other),
        None => Cardinal::Other,
    }
}

/// Classify `operands` as an ordinal form for `locale`.
pub fn ordinal(operands: &Operands, locale: &str, fallback_locale: &str) -> Ordinal {
    let language = resolve_language(locale, fallback_locale, ordinal_table_for);
    match ordinal_table_for(&language) {
        Some(table) => first_match(table, operands).unwrap_or(Ordinal::Other),
        None => Ordinal::Other,
    }
}

fn resolve_language<T>(
    locale: &str,
    fallback_locale: &str,
    has_table: impl Fn(&str) -> Option<T>,
) -> String {
    let requested = language_of(locale);
    if has_table(&requested).is_some() {
        requested
    } else {
        language_of(fallback_locale)
    }
}

fn first_match<Form: Copy>(table: Table<Form>, operands: &Operands) -> Option<Form> {
    table
        .iter()
        .find(|(_, predicate)| predicate(operands))
        .map(|(form, _)| *form)
}

/// The language codes this engine has rule tables for.
pub fn supported_language_codes() -> Vec<&'static str> {
    vec!["en", "fr", "ru", "es", "it", "ja", "ar", "de", "pl", "lv"]
}

// --- Cardinal tables -------------------------------------------------

const EN_CARDINAL: Table<Cardinal> = &[(Cardinal::One, |o| o.i == 1 && o.v == 0)];

const FR_CARDINAL: Table<Cardinal> = &[
    (Cardinal::One, |o| o.i == 0 || o.i == 1),
    (Cardinal::Many, |o| {
        o.v == 0 && o.i != 0 && o.i % 1_000_000 == 0
    }),
];

const RU_CARDINAL: Table<Cardinal> = &[
    (Cardinal::One, |o| {
        o.v == 0 && o.i % 10 == 1 && o.i % 100 != 11
    }),
    (Cardinal::Few, |o| {
        o.v == 0 && (2..=4).contains(&(o.i % 10)) && !(12..=14).contains(&(o.i % 100))
    }),
    (Cardinal::Many, |o| {
        o.v == 0
            && (o.i % 10 == 0 || (5..=9).contains(&(o.i % 10)) || (11..=14).contains(&(o.i % 100)))
    }),
];

const ES_CARDINAL: Table<Cardinal> = &[(Cardinal::One, |o| o.n == 1.0)];

const IT_CARDINAL: Table<Cardinal> = &[(Cardinal::One, |o| o.i == 1 && o.v == 0)];

const JA_CARDINAL: Table<Cardinal> = &[];

const AR_CARDINAL: Table<Cardinal> = &[
    (Cardinal::Zero, |o| o.n == 0.0),
    (Cardinal::One, |o| o.n == 1.0),
    (Cardinal::Two, |o| o.n == 2.0),
    (Cardinal::Few, |o| (3..=10).contains(&(o.i % 100))),
    (Cardinal::Many, |o| (11..=99).contains(&(o.i % 100))),
];

const DE_CARDINAL: Table<Cardinal> = &[(Cardinal::One, |o| o.i == 1 && o.v == 0)];

const PL_CARDINAL: Table<Cardinal> = &[
    (Cardinal::One, |o| o.i == 1 && o.v == 0),
    (Cardinal::Few, |o| {
        o.v == 0 && (2..=4).contains(&(o.i % 10)) && !(12..=14).contains(&(o.i % 100))
    }),
    (Cardinal::Many, |o| {
        o.v == 0
            && o.i != 1
            && (0..=1).contains(&(o.i % 10))
            || o.v == 0 && (5..=9).contains(&(o.i % 10))
            || o.v == 0 && (12..=14).contains(&(o.i % 100))
    }),
];

const LV_CARDINAL: Table<Cardinal> = &[
    (Cardinal::Zero, |o| {
        o.i % 10 == 0 || (11..=19).contains(&(o.i % 100))
    }),
    (Cardinal::One, |o| {
        o.i % 10 == 1 && o.i % 100 != 11
    }),
];

fn cardinal_table_for(language: &str) -> Option<Table<Cardinal>> {
    Some(match language {
        "en" => EN_CARDINAL,
        "fr" => FR_CARDINAL,
        "ru" => RU_CARDINAL,
        "es" => ES_CARDINAL,
        "it" => IT_CARDINAL,
        "ja" => JA_CARDINAL,
        "ar" => AR_CARDINAL,
        "de" => DE_CARDINAL,
        "pl" => PL_CARDINAL,
        "lv" => LV_CARDINAL,
        _ => return None,
    })
}

// --- Ordinal tables ----------------------------------------------------

const EN_ORDINAL: Table<Ordinal> = &[
    (Ordinal::One, |o| {
        o.i % 10 == 1 && o.i % 100 != 11
    }),
    (Ordinal::Two, |o| {
        o.i % 10 == 2 && o.i % 100 != 12
    }),
    (Ordinal::Few, |o| {
        o.i % 10 == 3 && o.i % 100 != 13
    }),
];

const FR_ORDINAL: Table<Ordinal> = &[(Ordinal::One, |o| o.n == 1.0)];

const IT_ORDINAL: Table<Ordinal> = &[(Ordinal::Many, |o| {
    matches!(o.n as i64, 8 | 11 | 80 | 800) && o.n.fract() == 0.0
})];

const NO_ORDINAL: Table<Ordinal> = &[];

fn ordinal_table_for(language: &str) -> Option<Table<Ordinal>> {
    Some(match language {
        "en" => EN_ORDINAL,
        "fr" => FR_ORDINAL,
        "it" => IT_ORDINAL,
        "ru" | "es" | "ja" | "ar" | "de" | "pl" | "lv" => NO_ORDINAL,
        _ => return None,
    })
}

/// Representative integer samples for each cardinal form, used by
/// property tests (P1). Every value listed here MUST classify to the
/// form it's listed under.
pub fn example_integer_values_cardinal(language: &str) -> HashMap<Cardinal, Vec<i64>> {
    let mut map = HashMap::new();
    match language {
        "en" => {
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Other, vec![0, 2, 3, 100]);
        }
        "fr" => {
            map.insert(Cardinal::One, vec![0, 1]);
            map.insert(Cardinal::Other, vec![2, 3, 100]);
        }
        "ru" => {
            map.insert(Cardinal::One, vec![1, 21, 31]);
            map.insert(Cardinal::Few, vec![2, 3, 4, 22, 23, 24]);
            map.insert(Cardinal::Many, vec![0, 5, 6, 11, 12, 13, 14]);
            map.insert(Cardinal::Other, vec![]);
        }
        "es" => {
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Other, vec![0, 2, 3, 100]);
        }
        "it" => {
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Other, vec![0, 2, 3, 100]);
        }
        "ja" => {
            map.insert(Cardinal::Other, vec![0, 1, 2, 100]);
        }
        "ar" => {
            map.insert(Cardinal::Zero, vec![0]);
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Two, vec![2]);
            map.insert(Cardinal::Few, vec![3, 10, 103]);
            map.insert(Cardinal::Many, vec![11, 99, 111]);
            map.insert(Cardinal::Other, vec![100, 200]);
        }
        "de" => {
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Other, vec![0, 2, 3, 100]);
        }
        "pl" => {
            map.insert(Cardinal::One, vec![1]);
            map.insert(Cardinal::Few, vec![2, 3, 4, 22, 23, 24]);
            map.insert(Cardinal::Many, vec![0, 5, 12, 13, 14, 100]);
            map.insert(Cardinal::Other, vec![]);
        }
        "lv" => {
            map.insert(Cardinal::Zero, vec![0, 10, 11, 19]);
            map.insert(Cardinal::One, vec![1, 21, 31]);
            map.insert(Cardinal::Other, vec![2, 3, 9, 22]);
        }
        _ => {}
    }
    map
}

/// Representative decimal samples (as literal decimal strings, to
/// preserve visible-zero semantics) for each cardinal form.
pub fn example_decimal_values_cardinal(language: &str) -> HashMap<Cardinal, Vec<&'static str>> {
    let mut map = HashMap::new();
    match language {
        "en" => {
            map.insert(Cardinal::Other, vec!["1.0", "1.5", "0.0"]);
        }
        "ru" => {
            map.insert(Cardinal::Other, vec!["1.0", "1.5"]);
        }
        "es" => {
            map.insert(Cardinal::One, vec!["1.0"]);
            map.insert(Cardinal::Other, vec!["1.5", "0.0"]);
        }
        _ => {}
    }
    map
}

/// Representative integer samples for each ordinal form.
pub fn example_integer_values_ordinal(language: &str) -> HashMap<Ordinal, Vec<i64>> {
    let mut map = HashMap::new();
    match language {
        "en" => {
            map.insert(Ordinal::One, vec![1, 21, 31]);
            map.insert(Ordinal::Two, vec![2, 22, 32]);
            map.insert(Ordinal::Few, vec![3, 23, 33]);
            map.insert(Ordinal::Other, vec![4, 11, 12, 13, 27]);
        }
        "it" => {
            map.insert(Ordinal::Many, vec![8, 11, 80, 800]);
            map.insert(Ordinal::Other, vec![7, 1, 2]);
        }
        "es" => {
            map.insert(Ordinal::Other, vec![1, 2, 3, 21]);
        }
        "ja" => {
            map.insert(Ordinal::Other, vec![1, 2, 3]);
        }
        _ => {}
    }
    map
}
