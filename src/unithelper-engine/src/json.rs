// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! JSON-facing record types for conversion results and unit listings.
//!
//! These are thin presentation mirrors of the engine's typed results:
//! build them through [`crate::Engine`] and serialize with `serde_json`.
//!
//! ```
//! let engine = unithelper_engine::Engine::new();
//! let record = engine.convert_to_record("km", "m", "1.5", None);
//! let json = serde_json::to_string(&record).unwrap();
//! assert!(json.contains("\"status\":\"0\""));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Unit;
use crate::dimension::Dimension;

/// The outcome of one conversion request, with the request fields echoed
/// verbatim. `status` is `"0"` on success and `"1"` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub unit_from: String,
    pub unit_to: String,
    pub value_from: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value_to: Option<String>,
    pub status: String,
    pub message: String,
}

impl ConversionRecord {
    pub(crate) fn success(
        unit_from: &str,
        unit_to: &str,
        value_from: &str,
        value_to: String,
    ) -> Self {
        ConversionRecord {
            unit_from: unit_from.to_string(),
            unit_to: unit_to.to_string(),
            value_from: value_from.to_string(),
            value_to: Some(value_to),
            status: "0".to_string(),
            message: "successful".to_string(),
        }
    }

    pub(crate) fn failure(
        unit_from: &str,
        unit_to: &str,
        value_from: &str,
        message: String,
    ) -> Self {
        ConversionRecord {
            unit_from: unit_from.to_string(),
            unit_to: unit_to.to_string(),
            value_from: value_from.to_string(),
            value_to: None,
            status: "1".to_string(),
            message,
        }
    }
}

/// One catalog unit in a dimension listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    pub dimension_name: String,
    pub dimension_code: String,
    pub canonical_expression: String,
    pub symbol: String,
}

impl UnitRecord {
    pub(crate) fn new(unit: &Unit, dimension: Dimension) -> Self {
        UnitRecord {
            name: unit
                .name
                .clone()
                .unwrap_or_else(|| unit.canonical_expression()),
            dimension_name: dimension.to_string(),
            dimension_code: dimension.code().to_string(),
            canonical_expression: unit.canonical_expression(),
            symbol: unit.symbol_or_derived(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_record_serialization() {
        let record = ConversionRecord::success("km", "m", "1.5", "1500".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            r#"{"unit_from":"km","unit_to":"m","value_from":"1.5","value_to":"1500","status":"0","message":"successful"}"#,
            json
        );
    }

    #[test]
    fn test_failure_record_skips_value_to() {
        let record =
            ConversionRecord::failure("bogus", "m", "5", "undefined unit".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            r#"{"unit_from":"bogus","unit_to":"m","value_from":"5","status":"1","message":"undefined unit"}"#,
            json
        );
    }

    #[test]
    fn test_record_roundtrip() {
        let record = ConversionRecord::success("kg/ha", "mg/m2", "2.5", "250".to_string());
        let json = serde_json::to_string(&record).unwrap();
        let back: ConversionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
