// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

// derived from the LALRPOP whitespace tokenizer, and LALRPOP's
// internal tokenizer

use std::str::CharIndices;

use lazy_static::lazy_static;
use unicode_xid::UnicodeXID;

use self::Token::*;
use crate::common::ErrorCode::*;
use crate::common::{ErrorCode, ExprError};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'input> {
    Plus,
    Minus,
    Mul,
    Dot,
    Div,
    Exp,
    LParen,
    RParen,
    Ident(&'input str),
    Num(&'input str),
}

fn error<T>(code: ErrorCode, start: usize, end: usize) -> Result<T, ExprError> {
    Err(ExprError {
        start: start as u16,
        end: end as u16,
        code,
    })
}

pub type Spanned<T> = (usize, T, usize);

pub struct Lexer<'input> {
    text: &'input str,
    chars: CharIndices<'input>,
    lookahead: Option<(usize, char)>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut t = Lexer {
            text: input,
            chars: input.char_indices(),
            lookahead: None,
        };
        t.bump();
        t
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.bump_n(1)
    }

    fn bump_n(&mut self, n: usize) -> Option<(usize, char)> {
        assert!(n > 0);
        self.lookahead = self.chars.nth(n - 1);
        self.lookahead
    }

    fn word(&mut self, idx0: usize) -> Spanned<&'input str> {
        match self.take_while(is_identifier_continue) {
            Some(end) => (idx0, &self.text[idx0..end], end),
            None => (idx0, &self.text[idx0..], self.text.len()),
        }
    }

    fn take_while<F>(&mut self, mut keep_going: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        self.take_until(|c| !keep_going(c))
    }

    fn take_until<F>(&mut self, mut terminate: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        loop {
            match self.lookahead {
                None => {
                    return None;
                }
                Some((idx1, c)) => {
                    if terminate(c) {
                        return Some(idx1);
                    } else {
                        self.bump();
                    }
                }
            }
        }
    }

    fn identifierish(&mut self, idx0: usize) -> Spanned<Token<'input>> {
        let (start, word, end) = self.word(idx0);

        (start, Ident(word), end)
    }

    fn number(&mut self, idx0: usize) -> Spanned<Token<'input>> {
        use regex::{Match, Regex};

        lazy_static! {
            static ref NUMBER_RE: Regex =
                Regex::new(r"^(\d+(\.\d+)?|\.\d+)([eE][-+]?\d+)?").unwrap();
        }

        let m: Match = NUMBER_RE.find(&self.text[idx0..]).unwrap();

        self.bump_n(m.end());

        let end = idx0 + m.end();
        (idx0, Num(&self.text[idx0..end]), end)
    }

    #[allow(clippy::unnecessary_wraps)]
    fn consume(
        &mut self,
        i: usize,
        tok: Token<'input>,
        len: usize,
    ) -> Option<Result<Spanned<Token<'input>>, ExprError>> {
        self.bump();
        Some(Ok((i, tok, i + len)))
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<Spanned<Token<'input>>, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match self.lookahead {
                Some((i, '+')) => self.consume(i, Plus, 1),
                Some((i, '-')) => self.consume(i, Minus, 1),
                Some((i, '*')) => self.consume(i, Mul, 1),
                Some((i, '/')) => self.consume(i, Div, 1),
                Some((i, '^')) => self.consume(i, Exp, 1),
                Some((i, '(')) => self.consume(i, LParen, 1),
                Some((i, ')')) => self.consume(i, RParen, 1),
                Some((i, '.')) => {
                    // '.' is both the product operator and a leading
                    // decimal point: "m.s" multiplies, ".5" is a number
                    match self.text[i + 1..].chars().next() {
                        Some(c) if is_digit(c) => Some(Ok(self.number(i))),
                        _ => self.consume(i, Dot, 1),
                    }
                }
                Some((i, c)) if is_identifier_start(c) => Some(Ok(self.identifierish(i))),
                Some((i, c)) if is_digit(c) => Some(Ok(self.number(i))),
                Some((_, c)) if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                Some((i, _)) => {
                    self.bump(); // eat whatever is killing us
                    let end = match self.lookahead {
                        Some((end, _)) => end,
                        None => self.text.len(),
                    };
                    Some(error(UnrecognizedToken, i, end))
                }
                None => None,
            };
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    UnicodeXID::is_xid_start(c) || c == '_' || c == '%'
}

// digits terminate an identifier so that trailing integers read as
// exponents: "m2" is meter squared, not an identifier named m2
pub(crate) fn is_identifier_continue(c: char) -> bool {
    (UnicodeXID::is_xid_continue(c) && !c.is_ascii_digit()) || c == '%'
}
