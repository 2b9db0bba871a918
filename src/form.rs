//! The three enumerations a translation may branch on, and the tagged
//! union used to compare across them at the expression evaluator's
//! boundary.
//!
//! Keeping `Cardinal`, `Ordinal` and `Gender` as distinct types (rather
//! than one flat enum) is deliberate: it is what makes `ORDINALITY_ONE ==
//! CARDINALITY_ONE` a type mismatch instead of a silent `false`.

use std::fmt;

/// A CLDR cardinal plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinal {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// A CLDR ordinal plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordinal {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// Grammatical gender, used by `{{name}}` placeholders whose form map is
/// keyed by gender rather than plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Cardinal {
    pub const ALL: [Cardinal; 6] = [
        Cardinal::Zero,
        Cardinal::One,
        Cardinal::Two,
        Cardinal::Few,
        Cardinal::Many,
        Cardinal::Other,
    ];
}

impl Ordinal {
    pub const ALL: [Ordinal; 6] = [
        Ordinal::Zero,
        Ordinal::One,
        Ordinal::Two,
        Ordinal::Few,
        Ordinal::Many,
        Ordinal::Other,
    ];
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cardinal::Zero => "CARDINALITY_ZERO",
            Cardinal::One => "CARDINALITY_ONE",
            Cardinal::Two => "CARDINALITY_TWO",
            Cardinal::Few => "CARDINALITY_FEW",
            Cardinal::Many => "CARDINALITY_MANY",
            Cardinal::Other => "CARDINALITY_OTHER",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ordinal::Zero => "ORDINALITY_ZERO",
            Ordinal::One => "ORDINALITY_ONE",
            Ordinal::Two => "ORDINALITY_TWO",
            Ordinal::Few => "ORDINALITY_FEW",
            Ordinal::Many => "ORDINALITY_MANY",
            Ordinal::Other => "ORDINALITY_OTHER",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Masculine => "MASCULINE",
            Gender::Feminine => "FEMININE",
            Gender::Neuter => "NEUTER",
        };
        f.write_str(s)
    }
}

/// A value belonging to one of the three form enumerations, used only at
/// comparison boundaries inside the expression evaluator. Never stored
/// long-term; never compared across variants of itself (that's exactly
/// the type mismatch the evaluator reports).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormValue {
    Cardinal(Cardinal),
    Ordinal(Ordinal),
    Gender(Gender),
}

impl FormValue {
    /// The name of the enumeration this value belongs to, for error
    /// messages.
    pub fn family(&self) -> &'static str {
        match self {
            FormValue::Cardinal(_) => "cardinal",
            FormValue::Ordinal(_) => "ordinal",
            FormValue::Gender(_) => "gender",
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Cardinal(c) => c.fmt(f),
            FormValue::Ordinal(o) => o.fmt(f),
            FormValue::Gender(g) => g.fmt(f),
        }
    }
}

/// The enumeration family a `FormMap` belongs to, decided once at load
/// time from its first key and checked against every subsequent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFamily {
    Cardinal,
    Ordinal,
    Gender,
}
