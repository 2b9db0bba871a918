//! The expression AST. Compiled once at translation-model load time from
//! the token stream ([`super::lexer`]/[`super::parser`]) and evaluated
//! many times by [`super::eval`].

use crate::form::FormValue;
use crate::operands::Number;

/// A leaf value in a comparison: a literal number, a language-form
/// literal (`CARDINALITY_ONE`, `MASCULINE`, ...), or a named variable
/// resolved from the query context.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(Number),
    LangForm(FormValue),
    Variable(String),
}

/// A comparison operator. `&&`/`||` are modeled directly as [`Expr`]
/// variants rather than as operators here, since they combine booleans
/// rather than operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

/// The expression language's AST. Every node evaluates to a `bool`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Or(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Compare { op: CmpOp, lhs: Operand, rhs: Operand },
    /// A primary operand with no comparator applied to it. Syntactically
    /// legal (the grammar's `Cmp` rule makes the `CmpOp Primary` suffix
    /// optional) but never boolean on its own — evaluating one always
    /// yields `TypeMismatch`, which the selector treats as a non-match
    /// rather than aborting.
    Bare(Operand),
}
