//! Evaluates an [`Expr`] AST against a [`Context`] and a locale.
//!
//! Comparisons are typed per spec.md §4.3: Number↔Number is a numeric
//! comparison under any operator; LangForm↔LangForm (same enumeration)
//! and LangForm↔Number (the number classified into the LangForm's
//! enumeration via the plural rule engine) only support `==`/`!=`;
//! anything else is a `TypeMismatch`.

use super::ast::{CmpOp, Expr, Operand};
use crate::error::{EngineError, Result};
use crate::form::FormValue;
use crate::operands::Number;
use crate::plural;
use crate::value::{Context, Value};

/// An operand resolved to a concrete runtime value, ready to compare.
enum Resolved {
    Number(Number),
    Form(FormValue),
    Text(String),
}

/// Evaluate `expr` against `ctx` under `locale`, falling back to
/// `fallback_locale`'s plural rules when classifying a number whose
/// locale has no table of its own.
pub fn eval(expr: &Expr, ctx: &Context, locale: &str, fallback_locale: &str) -> Result<bool> {
    match expr {
        Expr::Or(lhs, rhs) => {
            if eval(lhs, ctx, locale, fallback_locale)? {
                Ok(true)
            } else {
                eval(rhs, ctx, locale, fallback_locale)
            }
        }
        Expr::And(lhs, rhs) => {
            if !eval(lhs, ctx, locale, fallback_locale)? {
                Ok(false)
            } else {
                eval(rhs, ctx, locale, fallback_locale)
            }
        }
        Expr::Compare { op, lhs, rhs } => {
            let lhs = resolve(lhs, ctx)?;
            let rhs = resolve(rhs, ctx)?;
            compare(*op, lhs, rhs, locale, fallback_locale)
        }
        Expr::Bare(operand) => Err(EngineError::TypeMismatch {
            expression: format!("{operand:?} (no comparison operator)"),
        }),
    }
}

fn resolve(operand: &Operand, ctx: &Context) -> Result<Resolved> {
    match operand {
        Operand::Number(n) => Ok(Resolved::Number(n.clone())),
        Operand::LangForm(form) => Ok(Resolved::Form(*form)),
        Operand::Variable(name) => match ctx.get(name) {
            None => Err(EngineError::UnknownVariable {
                variable: name.clone(),
            }),
            Some(Value::Number(n)) => Ok(Resolved::Number(n.clone())),
            Some(Value::Gender(g)) => Ok(Resolved::Form(FormValue::Gender(*g))),
            Some(Value::Text(s)) => Ok(Resolved::Text(s.clone())),
        },
    }
}

fn compare(op: CmpOp, lhs: Resolved, rhs: Resolved, locale: &str, fallback_locale: &str) -> Result<bool> {
    match (lhs, rhs) {
        (Resolved::Number(a), Resolved::Number(b)) => Ok(numeric_compare(op, a.as_f64(), b.as_f64())),
        (Resolved::Form(a), Resolved::Form(b)) => compare_forms(op, a, b),
        (Resolved::Form(form), Resolved::Number(n)) | (Resolved::Number(n), Resolved::Form(form)) => {
            let classified = classify(&n, form, locale, fallback_locale)?;
            compare_forms(op, form, classified)
        }
        (Resolved::Text(a), Resolved::Text(b)) => match op {
            CmpOp::Eq => Ok(a == b),
            CmpOp::Ne => Ok(a != b),
            _ => Err(EngineError::TypeMismatch {
                expression: format!("{a:?} {op:?} {b:?}"),
            }),
        },
        (lhs, rhs) => Err(EngineError::TypeMismatch {
            expression: format!("{} {op:?} {}", describe(&lhs), describe(&rhs)),
        }),
    }
}

fn describe(r: &Resolved) -> String {
    match r {
        Resolved::Number(n) => format!("Number({n})"),
        Resolved::Form(f) => format!("Form({f})"),
        Resolved::Text(s) => format!("Text({s:?})"),
    }
}

fn numeric_compare(op: CmpOp, a: f64, b: f64) -> bool {
    match op {
        CmpOp::Lt => a < b,
        CmpOp::Gt => a > b,
        CmpOp::Le => a <= b,
        CmpOp::Ge => a >= b,
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
    }
}

fn same_family(a: FormValue, b: FormValue) -> bool {
    matches!(
        (a, b),
        (FormValue::Cardinal(_), FormValue::Cardinal(_))
            | (FormValue::Ordinal(_), FormValue::Ordinal(_))
            | (FormValue::Gender(_), FormValue::Gender(_))
    )
}

fn compare_forms(op: CmpOp, a: FormValue, b: FormValue) -> Result<bool> {
    if !same_family(a, b) {
        return Err(EngineError::TypeMismatch {
            expression: format!("{a} {op:?} {b}"),
        });
    }
    match op {
        CmpOp::Eq => Ok(a == b),
        CmpOp::Ne => Ok(a != b),
        _ => Err(EngineError::TypeMismatch {
            expression: format!("{a} {op:?} {b}"),
        }),
    }
}

/// Classify `n` into the same enumeration family as `like`, using the
/// plural rule engine. Classifying a number as a Gender is always a type
/// mismatch — genders aren't derived from numbers.
fn classify(n: &Number, like: FormValue, locale: &str, fallback_locale: &str) -> Result<FormValue> {
    match like {
        FormValue::Cardinal(_) => Ok(FormValue::Cardinal(plural::cardinal(
            &n.operands(),
            locale,
            fallback_locale,
        ))),
        FormValue::Ordinal(_) => Ok(FormValue::Ordinal(plural::ordinal(
            &n.operands(),
            locale,
            fallback_locale,
        ))),
        FormValue::Gender(_) => Err(EngineError::TypeMismatch {
            expression: format!("cannot classify number {n} as a gender"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parser::parse;
    use crate::form::{Cardinal, Gender};

    fn ctx_with(pairs: &[(&str, Value)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn number_comparison() {
        let ctx = ctx_with(&[("n", Value::integer(3))]);
        let ast = parse("n == 3").unwrap();
        assert!(eval(&ast, &ctx, "en", "en").unwrap());
    }

    #[test]
    fn langform_vs_number_classifies_via_plural_rules() {
        let ctx = ctx_with(&[("bookCount", Value::integer(1))]);
        let ast = parse("bookCount == CARDINALITY_ONE").unwrap();
        assert!(eval(&ast, &ctx, "en", "en").unwrap());

        let ctx_zero = ctx_with(&[("bookCount", Value::integer(0))]);
        assert!(!eval(&ast, &ctx_zero, "en", "en").unwrap());
    }

    #[test]
    fn mismatched_enumerations_are_a_type_mismatch() {
        let ctx = Context::new();
        let ast = parse("ORDINALITY_ONE == CARDINALITY_ONE").unwrap();
        assert!(eval(&ast, &ctx, "en", "en").is_err());
    }

    #[test]
    fn unordered_langform_comparison_is_a_type_mismatch() {
        let ctx = Context::new();
        let ast = parse("MASCULINE < FEMININE").unwrap();
        assert!(eval(&ast, &ctx, "en", "en").is_err());
    }

    #[test]
    fn unknown_variable_errors() {
        let ctx = Context::new();
        let ast = parse("missing == 1").unwrap();
        assert!(matches!(
            eval(&ast, &ctx, "en", "en"),
            Err(EngineError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn short_circuit_avoids_evaluating_unreachable_side() {
        let ctx = ctx_with(&[("gender", Value::Gender(Gender::Masculine))]);
        // left side true, so the right side (which references a missing
        // variable) must never be evaluated.
        let ast = parse("gender == MASCULINE || missing == 1").unwrap();
        assert!(eval(&ast, &ctx, "en", "en").unwrap());
    }

    #[test]
    fn and_short_circuits_on_false() {
        let ctx = ctx_with(&[("gender", Value::Gender(Gender::Feminine))]);
        let ast = parse("gender == MASCULINE && missing == 1").unwrap();
        assert!(!eval(&ast, &ctx, "en", "en").unwrap());
    }

    #[test]
    fn cardinal_classification_uses_locale() {
        let ctx = ctx_with(&[("n", Value::integer(2))]);
        let ast = parse("n == CARDINALITY_FEW").unwrap();
        assert!(eval(&ast, &ctx, "ru", "en").unwrap());
        assert!(!eval(&ast, &ctx, "en", "en").unwrap());
        let _ = Cardinal::Few;
    }
}
