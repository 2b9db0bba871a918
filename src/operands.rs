//! CLDR operand decomposition.
//!
//! Per [UTS #35](https://unicode.org/reports/tr35/tr35-numbers.html#Operands),
//! every plural rule is stated in terms of six operands derived from a
//! number's *decimal* representation: `n`, `i`, `v`, `w`, `f`, `t`. Visible
//! trailing zeros matter — `1` and `1.0` decompose differently (`v` is 0
//! for the former, 1 for the latter) even though they are numerically
//! equal. A bare `f64`/`i64` cannot carry that distinction, so [`Number`]
//! keeps the original decimal text around.

use std::fmt;

/// A number as supplied by a caller, preserving enough of its original
/// textual form to recover visible trailing zeros.
///
/// Constructing from a primitive integer loses that information unless a
/// `visible_decimals` override is supplied (see [`Number::integer_with_visible_decimals`]);
/// this mirrors the documented behavior of the system this crate's rules
/// are modeled on.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    negative: bool,
    integer_digits: String,
    /// `None` for a bare integer with no visible decimals; `Some(digits)`
    /// for a value with `digits.len()` visible fraction digits (possibly
    /// all zero).
    fraction_digits: Option<String>,
}

impl Number {
    /// A plain integer with no visible decimal places (`v = 0`).
    pub fn integer(n: i64) -> Self {
        Number {
            negative: n < 0,
            integer_digits: n.unsigned_abs().to_string(),
            fraction_digits: None,
        }
    }

    /// An integer with `visible_decimals` visible (all-zero) fraction
    /// digits, e.g. `integer_with_visible_decimals(1, 1)` behaves like the
    /// literal `"1.0"`.
    pub fn integer_with_visible_decimals(n: i64, visible_decimals: u32) -> Self {
        if visible_decimals == 0 {
            return Self::integer(n);
        }
        Number {
            negative: n < 0,
            integer_digits: n.unsigned_abs().to_string(),
            fraction_digits: Some("0".repeat(visible_decimals as usize)),
        }
    }

    /// Parse a decimal literal such as `"1.50"` or `"-0.010"`, preserving
    /// its visible fraction digits exactly as written.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let mut parts = rest.splitn(2, '.');
        let integer_part = parts.next()?;
        if integer_part.is_empty() || !integer_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let fraction_digits = match parts.next() {
            Some(frac) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
                Some(frac.to_string())
            }
            Some(_) => return None,
            None => None,
        };
        Some(Number {
            negative,
            integer_digits: integer_part.to_string(),
            fraction_digits,
        })
    }

    /// The value as an `f64`, for arithmetic that doesn't care about
    /// visible-zero semantics.
    pub fn as_f64(&self) -> f64 {
        let magnitude: f64 = format!(
            "{}.{}",
            self.integer_digits,
            self.fraction_digits.as_deref().unwrap_or("0")
        )
        .parse()
        .unwrap_or(0.0);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    pub fn operands(&self) -> Operands {
        Operands::from_number(self)
    }
}

impl fmt::Display for Number {
    /// Render with the engine's own default (not locale-aware) digit
    /// representation: the original sign, integer digits, and visible
    /// fraction digits if any. No digit grouping — see Open Question (b).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative && (self.integer_digits != "0" || self.has_nonzero_fraction()) {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer_digits)?;
        if let Some(frac) = &self.fraction_digits {
            write!(f, ".{}", frac)?;
        }
        Ok(())
    }
}

impl Number {
    fn has_nonzero_fraction(&self) -> bool {
        self.fraction_digits
            .as_deref()
            .map(|f| f.bytes().any(|b| b != b'0'))
            .unwrap_or(false)
    }
}

/// The six CLDR operands derived from a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operands {
    /// Absolute value of the source number.
    pub n: f64,
    /// Integer digits, absolute value.
    pub i: u64,
    /// Number of visible fraction digits, including trailing zeros.
    pub v: u32,
    /// Number of visible fraction digits, excluding trailing zeros.
    pub w: u32,
    /// Visible fraction digits as an integer, including trailing zeros.
    pub f: u64,
    /// Visible fraction digits as an integer, excluding trailing zeros.
    pub t: u64,
}

impl Operands {
    pub fn from_number(number: &Number) -> Self {
        let i = number.integer_digits.parse::<u64>().unwrap_or(0);
        let n = number.as_f64().abs();
        match &number.fraction_digits {
            None => Operands {
                n,
                i,
                v: 0,
                w: 0,
                f: 0,
                t: 0,
            },
            Some(digits) => {
                let v = digits.len() as u32;
                let f = digits.parse::<u64>().unwrap_or(0);
                let trimmed = digits.trim_end_matches('0');
                let w = trimmed.len() as u32;
                let t = if trimmed.is_empty() {
                    0
                } else {
                    trimmed.parse::<u64>().unwrap_or(0)
                };
                Operands { n, i, v, w, f, t }
            }
        }
    }
}
