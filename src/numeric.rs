//! Optional locale-aware number formatting, kept separate from the core
//! interpolation engine (which renders numbers via `Number`'s own
//! grouping-free `Display`, per Open Question (b) in DESIGN.md).
//!
//! Callers who want a `{{count}}` placeholder rendered with digit
//! grouping and a locale-appropriate decimal separator can post-process
//! the resolved string (or supply an already-formatted `Value::Text`)
//! using these helpers, which generalize the teacher crate's own
//! `format_int`/`format_f64` from a closed `Locale` enum to any BCP-47
//! tag string.

use num_format::ToFormattedString;

fn num_format_locale(locale: &str) -> num_format::Locale {
    num_format::Locale::from_name(locale)
        .or_else(|_| num_format::Locale::from_name(locale.split(['-', '_']).next().unwrap_or(locale)))
        .unwrap_or(num_format::Locale::en)
}

/// Format an integer with `locale`'s digit grouping (e.g. `1,234` for
/// `en`, `1.234` for `de`).
pub fn format_grouped<N: num_format::ToFormattedStr>(n: N, locale: &str) -> String {
    n.to_formatted_string(&num_format_locale(locale))
}

/// Format `f` with `precision` digits after the decimal point, using
/// `locale`'s decimal separator and digit grouping. Rounds halves away
/// from zero.
pub fn format_decimal<N: Into<f64>>(f: N, precision: u8, locale: &str) -> String {
    let nf_locale = num_format_locale(locale);
    format_num::format_num!(&format!(",.{precision}f"), f)
        .replace(',', "!")
        .replace('.', nf_locale.decimal())
        .replace('!', nf_locale.separator())
}
