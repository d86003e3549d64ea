// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;

/// Loc describes a location in a unit expression by the starting point and
/// ending point. Expressions are short strings typed by humans -- u16 is
/// long enough.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
pub struct Loc {
    pub start: u16,
    pub end: u16,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl Loc {
    pub fn new(start: usize, end: usize) -> Self {
        Loc {
            start: start as u16,
            end: end as u16,
        }
    }

    /// union takes a second Loc and returns the inclusive range from the
    /// start of the earlier token to the end of the later token.
    pub fn union(&self, rhs: &Self) -> Self {
        Loc {
            start: self.start.min(rhs.start),
            end: self.end.max(rhs.end),
        }
    }
}

/// The syntax of a unit expression: identifiers and numeric factors
/// combined by product, quotient, and integer exponent.
#[derive(PartialEq, Clone, Debug)]
pub enum UnitExpr {
    Const(f64, Loc),
    Ident(String, Loc),
    Mul(Box<UnitExpr>, Box<UnitExpr>, Loc),
    Div(Box<UnitExpr>, Box<UnitExpr>, Loc),
    Exp(Box<UnitExpr>, i32, Loc),
}

impl UnitExpr {
    pub fn get_loc(&self) -> Loc {
        match self {
            UnitExpr::Const(_, loc) => *loc,
            UnitExpr::Ident(_, loc) => *loc,
            UnitExpr::Mul(_, _, loc) => *loc,
            UnitExpr::Div(_, _, loc) => *loc,
            UnitExpr::Exp(_, _, loc) => *loc,
        }
    }
}

#[test]
fn test_loc_union() {
    let a = Loc::new(2, 4);
    let b = Loc::new(8, 11);
    assert_eq!(Loc::new(2, 11), a.union(&b));
    assert_eq!(Loc::new(2, 11), b.union(&a));
}
