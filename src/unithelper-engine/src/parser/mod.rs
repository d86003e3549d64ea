// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Hand-written recursive descent parser for unit expressions.
//!
//! The grammar is the UDUNITS-style product/quotient/exponent form:
//! `kg/ha`, `m.s-1`, `m^2`, `1/day`, `(kg/m2)/s`. Whitespace and comment
//! annotations are expected to have been stripped before parsing.

use crate::ast::{Loc, UnitExpr};
use crate::common::{ErrorCode, ExprError, ExprResult};
use crate::expr_err;
use crate::token::{Lexer, Spanned, Token};

#[cfg(test)]
mod tests;

/// TokenKind discriminant for efficient peek comparisons without payload
/// matching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Plus,
    Minus,
    Mul,
    Dot,
    Div,
    Exp,
    LParen,
    RParen,
    Ident,
    Num,
}

impl<'a> From<&Token<'a>> for TokenKind {
    fn from(token: &Token<'a>) -> Self {
        match token {
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Mul => TokenKind::Mul,
            Token::Dot => TokenKind::Dot,
            Token::Div => TokenKind::Div,
            Token::Exp => TokenKind::Exp,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Ident(_) => TokenKind::Ident,
            Token::Num(_) => TokenKind::Num,
        }
    }
}

/// Parse a unit expression. Returns `Ok(None)` for empty input.
pub fn parse(input: &str) -> ExprResult<Option<UnitExpr>> {
    let mut parser = Parser::new(Lexer::new(input))?;
    parser.parse_unit()
}

/// Parser state holding tokenized input
struct Parser<'input> {
    tokens: Vec<Spanned<Token<'input>>>,
    pos: usize,
}

impl<'input> Parser<'input> {
    /// Create a new parser from a lexer, collecting all tokens up front.
    /// Returns an error if the lexer produces any errors.
    fn new(lexer: Lexer<'input>) -> Result<Self, ExprError> {
        let mut tokens = Vec::new();
        for result in lexer {
            match result {
                Ok(tok) => tokens.push(tok),
                Err(e) => return Err(e),
            }
        }
        Ok(Parser { tokens, pos: 0 })
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.pos)
    }

    /// Peek at the kind of the current token
    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|(_, tok, _)| TokenKind::from(tok))
    }

    /// Advance to the next token and return the consumed token
    fn advance(&mut self) -> Option<&Spanned<Token<'input>>> {
        if self.pos < self.tokens.len() {
            let tok = &self.tokens[self.pos];
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    /// Get the position for EOF errors
    fn eof_position(&self) -> usize {
        if let Some((_, _, end)) = self.tokens.last() {
            *end
        } else {
            0
        }
    }

    /// Check if we've consumed all tokens
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn err<T>(&self, code: ErrorCode) -> Result<T, ExprError> {
        if let Some((start, _, end)) = self.peek() {
            Err(ExprError {
                start: *start as u16,
                end: *end as u16,
                code,
            })
        } else {
            let pos = self.eof_position();
            Err(ExprError {
                start: pos as u16,
                end: (pos + 1) as u16,
                code: ErrorCode::UnrecognizedEof,
            })
        }
    }

    /// Parse a unit expression from the token stream.
    /// Returns Ok(None) for empty input.
    fn parse_unit(&mut self) -> ExprResult<Option<UnitExpr>> {
        if self.is_at_end() {
            return Ok(None);
        }

        let expr = self.parse_product()?;

        // Check for extra tokens after the expression
        if let Some((start, _, end)) = self.peek() {
            return expr_err!(ExtraToken, *start, *end);
        }

        Ok(Some(expr))
    }

    /// Parse products and quotients (`*`, `.`, `/`) - left associative
    fn parse_product(&mut self) -> ExprResult<UnitExpr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Mul) | Some(TokenKind::Dot) => TokenKind::Mul,
                Some(TokenKind::Div) => TokenKind::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let loc = left.get_loc().union(&right.get_loc());
            left = match op {
                TokenKind::Mul => UnitExpr::Mul(Box::new(left), Box::new(right), loc),
                _ => UnitExpr::Div(Box::new(left), Box::new(right), loc),
            };
        }

        Ok(left)
    }

    /// Parse a factor with an optional exponent: `m^2`, `m2`, `s-1`
    fn parse_term(&mut self) -> ExprResult<UnitExpr> {
        let factor = self.parse_factor()?;

        let explicit = self.peek_kind() == Some(TokenKind::Exp);
        if explicit {
            self.advance();
        }

        // a signed integer directly after a factor is an exponent even
        // without '^' ("m2", "s-1")
        match self.peek_kind() {
            Some(TokenKind::Num) => {}
            Some(TokenKind::Minus) | Some(TokenKind::Plus) => {}
            _ if explicit => return self.err(ErrorCode::ExpectedInteger),
            _ => return Ok(factor),
        }

        let negative = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.advance();
                true
            }
            Some(TokenKind::Plus) => {
                self.advance();
                false
            }
            _ => false,
        };

        let (start, tok, end) = match self.peek() {
            Some((start, Token::Num(text), end)) => (*start, *text, *end),
            _ => return self.err(ErrorCode::ExpectedInteger),
        };
        self.advance();

        let exp: i32 = match tok.parse() {
            Ok(exp) => exp,
            Err(_) => return expr_err!(ExpectedInteger, start, end),
        };
        let exp = if negative { -exp } else { exp };

        let loc = factor.get_loc().union(&Loc::new(start, end));
        Ok(UnitExpr::Exp(Box::new(factor), exp, loc))
    }

    /// Parse an identifier, a numeric factor, or a parenthesized expression
    fn parse_factor(&mut self) -> ExprResult<UnitExpr> {
        match self.peek() {
            Some((start, Token::Ident(id), end)) => {
                let expr = UnitExpr::Ident(id.to_string(), Loc::new(*start, *end));
                self.advance();
                Ok(expr)
            }
            Some((start, Token::Num(text), end)) => {
                let (start, end) = (*start, *end);
                let num: f64 = match text.parse() {
                    Ok(num) => num,
                    Err(_) => return expr_err!(ExpectedNumber, start, end),
                };
                self.advance();
                Ok(UnitExpr::Const(num, Loc::new(start, end)))
            }
            Some((_, Token::LParen, _)) => {
                self.advance();
                let expr = self.parse_product()?;
                if self.peek_kind() != Some(TokenKind::RParen) {
                    return self.err(ErrorCode::UnrecognizedToken);
                }
                self.advance();
                Ok(expr)
            }
            _ => self.err(ErrorCode::UnrecognizedToken),
        }
    }
}
