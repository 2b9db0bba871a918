//! The range rule engine: maps a `(start cardinal form, end cardinal
//! form)` pair to the cardinal form of the interval as a whole, per
//! language. Absent mappings resolve to `OTHER`.

use crate::form::Cardinal;

type Table = &'static [((Cardinal, Cardinal), Cardinal)];

fn language_of(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

/// `rangeCardinal(startForm, endForm, locale)`, per spec.md §4.2.
pub fn range_cardinal(start: Cardinal, end: Cardinal, locale: &str) -> Cardinal {
    table_for(&language_of(locale))
        .and_then(|table| {
            table
                .iter()
                .find(|((s, e), _)| *s == start && *e == end)
                .map(|(_, form)| *form)
        })
        .unwrap_or(Cardinal::Other)
}

use Cardinal::*;

const FR_RANGE: Table = &[
    ((One, One), One),
    ((One, Other), Other),
    ((Other, Other), Other),
];

// English has no range-specific mappings: every pair falls through to
// OTHER, so its table is intentionally empty.
const EN_RANGE: Table = &[];

const LV_RANGE: Table = &[
    ((Zero, Zero), Other),
    ((Zero, One), One),
    ((Zero, Other), Other),
    ((One, Zero), Other),
    ((One, One), One),
    ((One, Other), Other),
    ((Other, Zero), Other),
    ((Other, One), One),
    ((Other, Other), Other),
];

fn table_for(language: &str) -> Option<Table> {
    Some(match language {
        "fr" => FR_RANGE,
        "en" => EN_RANGE,
        "lv" => LV_RANGE,
        _ => return None,
    })
}

/// Every `(Cardinal, Cardinal)` pair this engine has no table for still
/// returns a `Cardinal` (P2): used by property tests to assert totality
/// across the full 6x6 grid for every supported language.
pub fn supported_language_codes() -> Vec<&'static str> {
    vec!["fr", "en", "lv"]
}

pub fn all_pairs() -> Vec<(Cardinal, Cardinal)> {
    let mut pairs = Vec::with_capacity(36);
    for s in Cardinal::ALL {
        for e in Cardinal::ALL {
            pairs.push((s, e));
        }
    }
    pairs
}
