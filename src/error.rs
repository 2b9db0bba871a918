//! Crate-wide error types.
//!
//! Load-time and build-time errors (`MalformedFile`, `MixedFormMap`,
//! `PlaceholderSpecConflict`, `UnknownExpressionSymbol`, `ExpressionParseError`,
//! `AmbiguousLocale`) are fatal: the engine refuses to serve queries from an
//! incomplete [`crate::catalog::Catalog`]. Query-time errors (`TypeMismatch`,
//! `UnknownVariable`, `PlaceholderUnresolved`, `NoTranslationAvailable`) are
//! surfaced only at the boundary the caller invoked; internally a failed
//! alternative expression is treated as `false`, not propagated.

use thiserror::Error;

/// Any error this crate can produce, from file loading through query
/// evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A strings file was not valid JSON or violated the strings-file
    /// structural contract (see the crate documentation's file format
    /// section).
    #[error("malformed strings file {path}: {source}")]
    MalformedFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A strings file's structure was valid JSON but violated a contract
    /// that JSON's type system can't express (e.g. an empty key).
    #[error("malformed strings file {path}: {reason}")]
    MalformedStructure { path: String, reason: String },

    /// A `translations` object mixed keys from more than one of
    /// Cardinal / Ordinal / Gender.
    #[error("form map for placeholder {placeholder:?} in key {key:?} mixes enumerations")]
    MixedFormMap { key: String, placeholder: String },

    /// A placeholder spec supplied both `value` and `range`.
    #[error("placeholder {placeholder:?} in key {key:?} specifies both `value` and `range`")]
    PlaceholderSpecConflict { key: String, placeholder: String },

    /// The expression tokenizer or parser encountered a symbol it could
    /// not classify as a number, variable, language form, operator, or
    /// grouping token in a position where none was tolerated.
    #[error("unknown symbol {symbol:?} in expression {expression:?}")]
    UnknownExpressionSymbol { expression: String, symbol: String },

    /// The expression parser could not build a complete AST from the
    /// token stream (unbalanced parentheses, missing operand, trailing
    /// tokens, ...).
    #[error("could not parse expression {expression:?}: {reason}")]
    ExpressionParseError { expression: String, reason: String },

    /// A `Catalog` was built with two or more translation sets whose
    /// locale tags share a language subtag and no tiebreaker was
    /// configured for that language.
    #[error("ambiguous locale for language {language:?}: conflicting tags {tags:?}")]
    AmbiguousLocale { language: String, tags: Vec<String> },

    /// An expression compared two `LangForm` values from different
    /// enumerations, or compared a `LangForm` of the gender enumeration
    /// against a non-gender variable, using an operator other than
    /// `==`/`!=` where only equality is legal.
    #[error("type mismatch evaluating expression {expression:?}")]
    TypeMismatch { expression: String },

    /// An expression referenced a variable absent from the query
    /// context.
    #[error("unknown variable {variable:?}")]
    UnknownVariable { variable: String },

    /// Placeholder resolution produced no matching template and no
    /// `OTHER` fallback applied (this only happens for Gender form
    /// maps, which have no catch-all form).
    #[error("no translation matches placeholder {placeholder:?} in key {key:?}")]
    PlaceholderUnresolved { key: String, placeholder: String },

    /// Selection reached a `LocalizedString` with no matching
    /// alternative and no `translation` template.
    #[error("no translation available for key {key:?}")]
    NoTranslationAvailable { key: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
