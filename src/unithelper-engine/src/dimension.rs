// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::ops;

/// The physical base dimensions: the seven SI base quantities plus plane
/// and solid angle, with `Unknown` as the catch-all for dimensionless or
/// unclassifiable units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    ElectricCurrent,
    LuminousIntensity,
    Temperature,
    Mass,
    Length,
    AmountOfSubstance,
    Time,
    PlaneAngle,
    SolidAngle,
    Unknown,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::ElectricCurrent,
        Dimension::LuminousIntensity,
        Dimension::Temperature,
        Dimension::Mass,
        Dimension::Length,
        Dimension::AmountOfSubstance,
        Dimension::Time,
        Dimension::PlaneAngle,
        Dimension::SolidAngle,
        Dimension::Unknown,
    ];

    /// The short code used in dimension-vector strings and listing queries.
    pub fn code(&self) -> &'static str {
        use Dimension::*;
        match self {
            ElectricCurrent => "I",
            LuminousIntensity => "J",
            Temperature => "T",
            Mass => "M",
            Length => "L",
            AmountOfSubstance => "N",
            Time => "t",
            PlaneAngle => "Plane Angle",
            SolidAngle => "Solid Angle",
            Unknown => "X",
        }
    }

    /// Maps a raw code string to the matching dimension; unrecognized
    /// input (including the empty string) is `Unknown`, never an error.
    pub fn code_of(code: &str) -> Dimension {
        Dimension::ALL
            .iter()
            .copied()
            .find(|dim| dim.code() == code)
            .unwrap_or(Dimension::Unknown)
    }

    /// Collapses a dimension vector to the matching base dimension: a
    /// single base exponent of 1 maps to that dimension, everything else
    /// (dimensionless included) to `Unknown`.
    pub fn classify(vector: &DimVector) -> Dimension {
        let mut found = Dimension::Unknown;
        for (i, exp) in vector.0.iter().enumerate() {
            match *exp {
                0 => continue,
                1 if found == Dimension::Unknown => found = Dimension::ALL[i],
                _ => return Dimension::Unknown,
            }
        }
        found
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Dimension::*;
        let name = match self {
            ElectricCurrent => "electric_current",
            LuminousIntensity => "luminous_intensity",
            Temperature => "temperature",
            Mass => "mass",
            Length => "length",
            AmountOfSubstance => "amount_of_substance",
            Time => "time",
            PlaneAngle => "plane_angle",
            SolidAngle => "solid_angle",
            Unknown => "unknown",
        };

        write!(f, "{name}")
    }
}

/// Exponents over the nine concrete base dimensions, indexed in
/// `Dimension::ALL` order (`Unknown` carries no exponent).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DimVector([i8; 9]);

impl DimVector {
    pub fn new() -> Self {
        DimVector::default()
    }

    pub fn of(components: &[(Dimension, i8)]) -> Self {
        let mut vector = DimVector::default();
        for (dim, exp) in components {
            let i = Dimension::ALL
                .iter()
                .position(|d| d == dim)
                .filter(|i| *i < 9)
                .expect("base dimension");
            vector.0[i] += exp;
        }
        vector
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|exp| *exp == 0)
    }

    // exponents saturate rather than wrap
    pub fn pow(mut self, exp: i32) -> Self {
        for e in self.0.iter_mut() {
            *e = clamp_exp((*e as i32).saturating_mul(exp));
        }
        self
    }

    pub(crate) fn exponents(&self) -> &[i8; 9] {
        &self.0
    }

    /// The dimension-vector string: `""` for dimensionless, the bare code
    /// for a single base dimension with exponent 1, and a `.`-joined
    /// compound form (`"L.t-1"`) otherwise.
    pub fn code(&self) -> String {
        if self.is_dimensionless() {
            return String::new();
        }
        let dim = Dimension::classify(self);
        if dim != Dimension::Unknown {
            return dim.code().to_string();
        }

        let mut parts = Vec::new();
        for (i, exp) in self.0.iter().enumerate() {
            match *exp {
                0 => continue,
                1 => parts.push(Dimension::ALL[i].code().to_string()),
                exp => parts.push(format!("{}{}", Dimension::ALL[i].code(), exp)),
            }
        }
        parts.join(".")
    }
}

fn clamp_exp(exp: i32) -> i8 {
    exp.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

impl ops::Mul for DimVector {
    type Output = DimVector;
    fn mul(mut self, rhs: Self) -> Self::Output {
        for (e, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *e = clamp_exp(*e as i32 + *r as i32);
        }
        self
    }
}

impl ops::Div for DimVector {
    type Output = DimVector;
    fn div(mut self, rhs: Self) -> Self::Output {
        for (e, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *e = clamp_exp(*e as i32 - *r as i32);
        }
        self
    }
}
