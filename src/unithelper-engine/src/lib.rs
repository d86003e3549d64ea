// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;

mod ast;
mod catalog;
pub mod common;
mod convert;
mod dimension;
pub mod json;
mod parser;
mod token;

pub use self::catalog::{Unit, UnitDb};
pub use self::common::{Error, ErrorCode, ErrorKind, Result, strip_comments};
pub use self::dimension::{DimVector, Dimension};
pub use self::json::{ConversionRecord, UnitRecord};

// informal vocabulary registered into the unit database at engine
// construction; the target "1" marks a dimensionless informal name
const ALIASES: &[(&str, &str)] = &[
    ("number", "count"),
    ("dap", "day"),
    ("doy", "day"),
    ("decimal_degree", "degree"),
    ("fraction", "1"),
    ("unitless", "1"),
    ("ratio", "1"),
];

/// The conversion engine: a unit database with the informal vocabulary
/// registered, plus the dimension code table. Construct once, then share
/// freely -- every operation is a pure function of its arguments and the
/// post-construction database state.
pub struct Engine {
    db: UnitDb,
    dimension_names: HashMap<String, String>,
}

impl Engine {
    pub fn new() -> Engine {
        let mut db = UnitDb::new();
        for &(alias, canonical) in ALIASES {
            // a failed registration only narrows the vocabulary; it must
            // not keep the engine from coming up
            if let Err(err) = db.add_alias(alias, canonical) {
                eprintln!("unithelper: alias '{alias}' unavailable: {err}");
            }
        }

        let dimension_names = Dimension::ALL
            .iter()
            .map(|dim| (dim.code().to_string(), dim.to_string()))
            .collect();

        Engine {
            db,
            dimension_names,
        }
    }

    /// Resolves a unit expression (comments stripped first) against the
    /// database.
    pub fn resolve(&self, expr: &str) -> Result<Unit> {
        self.db.parse(&strip_comments(expr))
    }

    /// True iff `expr` resolves to a known unit. Never fails, for any
    /// input.
    pub fn is_valid(&self, expr: &str) -> bool {
        self.resolve(expr).is_ok()
    }

    /// Converts `value` from `from_unit` to `to_unit`, rounding to the
    /// smallest scale that preserves the input's significant digits.
    pub fn convert(&self, from_unit: &str, to_unit: &str, value: &str) -> Result<BigDecimal> {
        let value = parse_value(value)?;
        self.convert_decimal(from_unit, to_unit, &value)
    }

    /// Converts `value`, rounding half-up to exactly `scale` fractional
    /// digits.
    pub fn convert_scaled(
        &self,
        from_unit: &str,
        to_unit: &str,
        value: &str,
        scale: i64,
    ) -> Result<BigDecimal> {
        let value = parse_value(value)?;
        self.convert_decimal_scaled(from_unit, to_unit, &value, scale)
    }

    pub fn convert_decimal(
        &self,
        from_unit: &str,
        to_unit: &str,
        value: &BigDecimal,
    ) -> Result<BigDecimal> {
        let raw = self.raw_convert(from_unit, to_unit, value)?;
        convert::round_preserving(raw, value)
    }

    pub fn convert_decimal_scaled(
        &self,
        from_unit: &str,
        to_unit: &str,
        value: &BigDecimal,
        scale: i64,
    ) -> Result<BigDecimal> {
        let raw = self.raw_convert(from_unit, to_unit, value)?;
        convert::round_to_scale(raw, scale)
    }

    fn raw_convert(&self, from_unit: &str, to_unit: &str, value: &BigDecimal) -> Result<f64> {
        let from = self.resolve(from_unit)?;
        let to = self.resolve(to_unit)?;
        convert::apply(&from, &to, value.to_f64().unwrap_or(f64::NAN))
    }

    /// Converts and wraps the outcome in a [`ConversionRecord`], echoing
    /// the inputs verbatim. Never fails: any error becomes a status-"1"
    /// record.
    pub fn convert_to_record(
        &self,
        from_unit: &str,
        to_unit: &str,
        value: &str,
        scale: Option<i64>,
    ) -> ConversionRecord {
        let result = match scale {
            Some(scale) => self.convert_scaled(from_unit, to_unit, value, scale),
            None => self.convert(from_unit, to_unit, value),
        };
        match result {
            Ok(converted) => {
                ConversionRecord::success(from_unit, to_unit, value, converted.to_string())
            }
            Err(err) => ConversionRecord::failure(from_unit, to_unit, value, record_message(&err)),
        }
    }

    /// A human-readable description of a unit expression; the empty
    /// string when there is none. Never fails.
    pub fn describe(&self, expr: &str) -> String {
        let stripped = strip_comments(expr);

        // informal dimensionless names describe themselves, whether or
        // not their registration succeeded
        if let Some(&(alias, _)) = ALIASES
            .iter()
            .find(|&&(alias, canonical)| alias == stripped && canonical == "1")
        {
            return alias.to_string();
        }

        match self.db.parse(&stripped) {
            Ok(unit) => {
                if unit.is_base() {
                    unit.name.unwrap_or_default()
                } else {
                    unit.to_string()
                }
            }
            Err(_) => String::new(),
        }
    }

    /// Every catalog unit of the dimension named by `code`, in catalog
    /// order.
    pub fn list_units(&self, code: &str) -> Vec<Unit> {
        let dim = Dimension::code_of(code);
        self.db
            .iter_units()
            .filter(|unit| unit.vector.code() == dim.code())
            .collect()
    }

    /// [`list_units`](Engine::list_units), as presentation records.
    pub fn list_unit_records(&self, code: &str) -> Vec<UnitRecord> {
        let dim = Dimension::code_of(code);
        self.list_units(code)
            .iter()
            .map(|unit| UnitRecord::new(unit, dim))
            .collect()
    }

    /// The dimension code to dimension name table.
    pub fn dimension_code_table(&self) -> &HashMap<String, String> {
        &self.dimension_names
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn parse_value(value: &str) -> Result<BigDecimal> {
    match value.parse() {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::new(
            ErrorKind::Number,
            ErrorCode::InvalidNumber,
            Some(value.to_string()),
        )),
    }
}

// unanticipated failures must not leak raw internal error text to API
// consumers
fn record_message(err: &Error) -> String {
    match err.code {
        ErrorCode::NoError | ErrorCode::Generic => "undefined unit".to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let engine = Engine::new();

        assert_eq!("meter", engine.describe("m"));
        assert_eq!("second", engine.describe("s"));
        assert_eq!("1000 m", engine.describe("km"));
        assert_eq!("K @ 273.15", engine.describe("degC"));

        // informal dimensionless vocabulary describes itself
        assert_eq!("fraction", engine.describe("fraction"));
        assert_eq!("unitless", engine.describe("unitless"));
        assert_eq!("ratio", engine.describe("ratio [yield]"));

        // but informal names with a real canonical unit go through it
        assert_eq!("86400 s", engine.describe("dap"));

        assert_eq!("", engine.describe("no_such_unit"));
        assert_eq!("", engine.describe(""));
    }

    #[test]
    fn test_dimension_code_table() {
        let engine = Engine::new();
        let table = engine.dimension_code_table();

        assert_eq!(10, table.len());
        assert_eq!(Some(&"length".to_string()), table.get("L"));
        assert_eq!(Some(&"time".to_string()), table.get("t"));
        assert_eq!(Some(&"temperature".to_string()), table.get("T"));
        assert_eq!(Some(&"plane_angle".to_string()), table.get("Plane Angle"));
        assert_eq!(Some(&"unknown".to_string()), table.get("X"));
    }

    #[test]
    fn test_vocabulary_is_registered() {
        let engine = Engine::new();

        for &(alias, _) in ALIASES {
            assert!(engine.is_valid(alias), "alias: {alias}");
        }
        assert!(engine.is_valid("kg/dap"));
    }
}
