//! Recursive-descent parser: builds an [`Expr`] AST from a token stream,
//! honoring the precedence `||` < `&&` < comparison < grouping described
//! in spec.md §4.3.
//!
//! ```text
//! Expr    := Or
//! Or      := And ( "||" And )*
//! And     := Cmp ( "&&" Cmp )*
//! Cmp     := Primary ( CmpOp Primary )?
//! Primary := "(" Expr ")" | Operand
//! ```

use super::ast::{CmpOp, Expr, Operand};
use super::lexer::{tokenize, Token};
use crate::error::EngineError;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

/// Parse a full expression string into an AST.
pub fn parse(source: &str) -> Result<Expr, EngineError> {
    let tokens = tokenize(source);
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        source,
    };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(EngineError::ExpressionParseError {
            expression: source.to_string(),
            reason: format!("unexpected trailing tokens at position {}", parser.pos),
        });
    }
    Ok(expr)
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn parse_or(&mut self) -> Result<Expr, EngineError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, EngineError> {
        let mut lhs = self.parse_cmp()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let rhs = self.parse_cmp()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_cmp(&mut self) -> Result<Expr, EngineError> {
        let primary = self.parse_primary()?;
        let op = match self.peek() {
            Some(Token::Lt) => Some(CmpOp::Lt),
            Some(Token::Gt) => Some(CmpOp::Gt),
            Some(Token::Le) => Some(CmpOp::Le),
            Some(Token::Ge) => Some(CmpOp::Ge),
            Some(Token::Eq) => Some(CmpOp::Eq),
            Some(Token::Ne) => Some(CmpOp::Ne),
            _ => None,
        };
        match (primary, op) {
            (PrimaryResult::Group(expr), None) => Ok(expr),
            (PrimaryResult::Operand(operand), None) => Ok(Expr::Bare(operand)),
            (PrimaryResult::Operand(lhs), Some(op)) => {
                self.advance();
                let rhs = self.parse_operand()?;
                Ok(Expr::Compare { op, lhs, rhs })
            }
            (PrimaryResult::Group(_), Some(_)) => Err(EngineError::ExpressionParseError {
                expression: self.source.to_string(),
                reason: "a parenthesized sub-expression cannot be compared with an operator"
                    .to_string(),
            }),
        }
    }

    /// Parses a `Primary` that is about to be used as the left side of a
    /// `Cmp`: either a parenthesized sub-expression or a bare operand.
    fn parse_primary(&mut self) -> Result<PrimaryResult, EngineError> {
        if matches!(self.peek(), Some(Token::LParen)) {
            self.advance();
            let inner = self.parse_or()?;
            match self.advance() {
                Some(Token::RParen) => Ok(PrimaryResult::Group(inner)),
                _ => Err(EngineError::ExpressionParseError {
                    expression: self.source.to_string(),
                    reason: "unbalanced parentheses".to_string(),
                }),
            }
        } else {
            Ok(PrimaryResult::Operand(self.parse_operand()?))
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, EngineError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Operand::Number(n.clone())),
            Some(Token::LangForm(form)) => Ok(Operand::LangForm(*form)),
            Some(Token::Variable(name)) => Ok(Operand::Variable(name.clone())),
            Some(Token::LParen) => {
                self.pos -= 1;
                Err(EngineError::ExpressionParseError {
                    expression: self.source.to_string(),
                    reason: "a parenthesized group is not a valid comparison operand".to_string(),
                })
            }
            other => Err(EngineError::ExpressionParseError {
                expression: self.source.to_string(),
                reason: format!("expected an operand, found {other:?}"),
            }),
        }
    }
}

enum PrimaryResult {
    Group(Expr),
    Operand(Operand),
}
