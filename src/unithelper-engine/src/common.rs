// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    UnrecognizedToken,
    UnrecognizedEof,
    ExtraToken,
    EmptyExpression,
    ExpectedNumber,
    ExpectedInteger,
    UnknownUnit,
    BadAliasName,
    DuplicateAlias,
    DimensionMismatch,
    InvalidNumber,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            UnrecognizedToken => "unrecognized_token",
            UnrecognizedEof => "unrecognized_eof",
            ExtraToken => "extra_token",
            EmptyExpression => "empty_expression",
            ExpectedNumber => "expected_number",
            ExpectedInteger => "expected_integer",
            UnknownUnit => "unknown_unit",
            BadAliasName => "bad_alias_name",
            DuplicateAlias => "duplicate_alias",
            DimensionMismatch => "dimension_mismatch",
            InvalidNumber => "invalid_number",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

/// An error attributable to a span of a unit expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExprError {
    pub start: u16,
    pub end: u16,
    pub code: ErrorCode,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.end, self.code)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Database,
    Conversion,
    Number,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub(crate) details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl From<ExprError> for Error {
    fn from(err: ExprError) -> Self {
        Error {
            kind: ErrorKind::Parse,
            code: err.code,
            details: Some(format!("at {}:{}", err.start, err.end)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Parse => "ParseError",
            ErrorKind::Database => "DatabaseError",
            ErrorKind::Conversion => "ConversionError",
            ErrorKind::Number => "NumberError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
pub type ExprResult<T> = result::Result<T, ExprError>;

#[macro_export]
macro_rules! expr_err(
    ($code:tt, $start:expr, $end:expr) => {{
        use $crate::common::{ErrorCode, ExprError};
        Err(ExprError {
            start: $start as u16,
            end: $end as u16,
            code: ErrorCode::$code,
        })
    }}
);

#[macro_export]
macro_rules! db_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Database,
            ErrorCode::$code,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! conv_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Conversion,
            ErrorCode::$code,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! num_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Number, ErrorCode::$code, Some($str)))
    }}
);

/// Removes bracketed comment annotations (a `[...]` group, optionally
/// preceded by `.` or `/` and followed by an exponent) and all whitespace.
/// Unit expressions are normalized with this before every parse or lookup.
///
/// The two passes repeat until nothing changes: removing whitespace can
/// close up a bracket group that then reads as a comment, and stripping
/// must be idempotent.
pub fn strip_comments(expr: &str) -> String {
    lazy_static! {
        static ref COMMENT_RE: Regex = Regex::new(r"[./]?\[\S*\]\^?-?\d*").unwrap();
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s").unwrap();
    }
    let mut out = expr.to_string();
    loop {
        let stripped = COMMENT_RE.replace_all(&out, "");
        let stripped = WHITESPACE_RE.replace_all(&stripped, "").into_owned();
        if stripped == out {
            return stripped;
        }
        out = stripped;
    }
}

#[test]
fn test_strip_comments() {
    let cases: &[(&str, &str)] = &[
        ("kg/ha", "kg/ha"),
        ("kg [dm]/ha", "kg/ha"),
        ("kg[dm]/ha", "kg/ha"),
        ("kg.[dm]-1", "kg"),
        ("kg/[dm]", "kg"),
        ("m2 [leaf area]", "m2"),
        ("number [grain]/m2", "number/m2"),
        ("mm [H2O]^2", "mm"),
        (" m / s ", "m/s"),
        ("", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(*expected, strip_comments(input));
    }

    // stripping twice never changes the result
    for (input, _) in cases {
        let once = strip_comments(input);
        assert_eq!(once, strip_comments(&once));
    }
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Database,
        ErrorCode::UnknownUnit,
        Some("furlong".to_string()),
    );
    assert_eq!("DatabaseError{unknown_unit: furlong}", format!("{err}"));

    let err = Error::new(ErrorKind::Conversion, ErrorCode::DimensionMismatch, None);
    assert_eq!("ConversionError{dimension_mismatch}", format!("{err}"));
}
