// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use super::parse;
use crate::ast::{Loc, UnitExpr};
use crate::common::ErrorCode;

fn ident(id: &str, start: usize, end: usize) -> UnitExpr {
    UnitExpr::Ident(id.to_string(), Loc::new(start, end))
}

#[test]
fn test_empty_input() {
    assert_eq!(Ok(None), parse(""));
}

#[test]
fn test_single_ident() {
    assert_eq!(Ok(Some(ident("kg", 0, 2))), parse("kg"));
}

#[test]
fn test_quotient() {
    let expected = UnitExpr::Div(
        Box::new(ident("kg", 0, 2)),
        Box::new(ident("ha", 3, 5)),
        Loc::new(0, 5),
    );
    assert_eq!(Ok(Some(expected)), parse("kg/ha"));
}

#[test]
fn test_product_forms() {
    let expected = UnitExpr::Mul(
        Box::new(ident("m", 0, 1)),
        Box::new(ident("s", 2, 3)),
        Loc::new(0, 3),
    );
    assert_eq!(Ok(Some(expected.clone())), parse("m.s"));
    assert_eq!(Ok(Some(expected)), parse("m*s"));
}

#[test]
fn test_exponents() {
    let expected = UnitExpr::Exp(Box::new(ident("m", 0, 1)), 2, Loc::new(0, 2));
    assert_eq!(Ok(Some(expected)), parse("m2"));

    let expected = UnitExpr::Exp(Box::new(ident("m", 0, 1)), 2, Loc::new(0, 3));
    assert_eq!(Ok(Some(expected)), parse("m^2"));

    let expected = UnitExpr::Exp(Box::new(ident("s", 0, 1)), -1, Loc::new(0, 3));
    assert_eq!(Ok(Some(expected)), parse("s-1"));

    let expected = UnitExpr::Exp(Box::new(ident("s", 0, 1)), -1, Loc::new(0, 4));
    assert_eq!(Ok(Some(expected)), parse("s^-1"));
}

#[test]
fn test_compound() {
    // m.s-1 == (m * (s^-1))
    let expected = UnitExpr::Mul(
        Box::new(ident("m", 0, 1)),
        Box::new(UnitExpr::Exp(
            Box::new(ident("s", 2, 3)),
            -1,
            Loc::new(2, 5),
        )),
        Loc::new(0, 5),
    );
    assert_eq!(Ok(Some(expected)), parse("m.s-1"));
}

#[test]
fn test_reciprocal() {
    let expected = UnitExpr::Div(
        Box::new(UnitExpr::Const(1.0, Loc::new(0, 1))),
        Box::new(ident("day", 2, 5)),
        Loc::new(0, 5),
    );
    assert_eq!(Ok(Some(expected)), parse("1/day"));
}

#[test]
fn test_parens() {
    let expected = UnitExpr::Div(
        Box::new(UnitExpr::Div(
            Box::new(ident("kg", 1, 3)),
            Box::new(UnitExpr::Exp(
                Box::new(ident("m", 4, 5)),
                2,
                Loc::new(4, 6),
            )),
            Loc::new(1, 6),
        )),
        Box::new(ident("s", 8, 9)),
        Loc::new(1, 9),
    );
    assert_eq!(Ok(Some(expected)), parse("(kg/m2)/s"));
}

#[test]
fn test_errors() {
    let negative_cases: &[(&str, ErrorCode)] = &[
        ("m^", ErrorCode::UnrecognizedEof),
        ("m^x", ErrorCode::ExpectedInteger),
        ("m^2.5", ErrorCode::ExpectedInteger),
        ("kg ha", ErrorCode::ExtraToken),
        ("100m", ErrorCode::ExtraToken),
        ("/s", ErrorCode::UnrecognizedToken),
        ("(m", ErrorCode::UnrecognizedEof),
        ("kg@", ErrorCode::UnrecognizedToken),
    ];

    for (input, code) in negative_cases {
        let err = parse(input).unwrap_err();
        assert_eq!(*code, err.code, "input: {input}");
    }
}
