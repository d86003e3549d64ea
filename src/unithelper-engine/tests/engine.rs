// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! End-to-end tests of the conversion engine: the public operations over
//! a fully constructed `Engine`, plus property tests for the total
//! (never-failing) entry points.

use proptest::prelude::*;

use unithelper_engine::{Engine, ErrorCode, strip_comments};

#[test]
fn identity_conversion() {
    let engine = Engine::new();

    for unit in ["m", "s", "kg/ha", "degC", "m.s-1", "1"] {
        let result = engine.convert(unit, unit, "2.5").unwrap();
        assert_eq!("2.5", result.to_string(), "unit: {unit}");
    }
}

#[test]
fn significant_figures_are_preserved() {
    let engine = Engine::new();

    assert_eq!("1500", engine.convert("km", "m", "1.5").unwrap().to_string());
    assert_eq!("1.5", engine.convert("m", "km", "1500").unwrap().to_string());
    assert_eq!("250", engine.convert("kg/ha", "mg/m2", "2.5").unwrap().to_string());
    assert_eq!("212", engine.convert("degC", "degF", "100").unwrap().to_string());
}

#[test]
fn explicit_scale_round_trip() {
    let engine = Engine::new();

    let there = engine.convert_scaled("degC", "degF", "100", 2).unwrap();
    assert_eq!("212.00", there.to_string());

    let back = engine
        .convert_scaled("degF", "degC", &there.to_string(), 2)
        .unwrap();
    assert_eq!("100.00", back.to_string());
}

#[test]
fn comments_are_ignored_in_conversion() {
    let engine = Engine::new();

    let plain = engine.convert("kg/ha", "g/m2", "42").unwrap();
    let commented = engine.convert("kg[dm]/ha", "g/m2 [leaf]", "42").unwrap();
    assert_eq!(plain, commented);
}

#[test]
fn mismatched_dimensions_never_convert() {
    let engine = Engine::new();

    for (from, to) in [("m", "s"), ("kg", "m"), ("kg/ha", "kg/m3"), ("degC", "m")] {
        let err = engine.convert(from, to, "1").unwrap_err();
        assert_eq!(ErrorCode::DimensionMismatch, err.code, "{from} -> {to}");
    }
}

#[test]
fn conversion_records() {
    let engine = Engine::new();

    let record = engine.convert_to_record("km", "m", "1.5", None);
    assert_eq!("0", record.status);
    assert_eq!("successful", record.message);
    assert_eq!(Some("1500".to_string()), record.value_to);
    assert_eq!("km", record.unit_from);

    // inputs are echoed verbatim, comments included
    let record = engine.convert_to_record("kg[dm]/ha", "g/m2", "42", None);
    assert_eq!("0", record.status);
    assert_eq!("kg[dm]/ha", record.unit_from);
    assert_eq!("g/m2", record.unit_to);
    assert_eq!("42", record.value_from);

    let record = engine.convert_to_record("bogus_unit_xyz", "m", "5", None);
    assert_eq!("1", record.status);
    assert!(!record.message.is_empty());
    assert_eq!(None, record.value_to);

    let record = engine.convert_to_record("m", "s", "5", None);
    assert_eq!("1", record.status);
    assert!(record.message.contains("dimension_mismatch"));

    let record = engine.convert_to_record("m", "km", "not_a_number", None);
    assert_eq!("1", record.status);
    assert!(record.message.contains("invalid_number"));
}

#[test]
fn list_units_by_dimension() {
    let engine = Engine::new();

    let lengths = engine.list_units("L");
    let names: Vec<&str> = lengths
        .iter()
        .filter_map(|u| u.name.as_deref())
        .collect();
    assert!(names.contains(&"meter"));
    assert!(names.contains(&"mile"));
    // only pure length, and nothing twice
    assert!(lengths.iter().all(|u| u.vector.code() == "L"));
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), names.len());

    let masses = engine.list_units("M");
    let names: Vec<&str> = masses.iter().filter_map(|u| u.name.as_deref()).collect();
    assert_eq!(vec!["kilogram", "gram", "tonne", "pound", "ounce"], names);

    assert!(engine.list_units("no such code").is_empty());
    assert!(engine.list_units("").is_empty());
}

#[test]
fn unit_records() {
    let engine = Engine::new();

    let records = engine.list_unit_records("T");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        vec!["kelvin", "degree Celsius", "degree Fahrenheit"],
        names
    );

    let celsius = &records[1];
    assert_eq!("temperature", celsius.dimension_name);
    assert_eq!("T", celsius.dimension_code);
    assert_eq!("K @ 273.15", celsius.canonical_expression);
    // no catalog symbol: derived from the name
    assert_eq!("degree_Celsius", celsius.symbol);

    let kelvin = &records[0];
    assert_eq!("K", kelvin.symbol);
    assert_eq!("K", kelvin.canonical_expression);
}

#[test]
fn validity_checks() {
    let engine = Engine::new();

    for expr in ["m", "kg/ha", "m.s-1", "degC", "fraction", "kg/ha [dry]"] {
        assert!(engine.is_valid(expr), "expr: {expr}");
    }
    for expr in ["", "bogus", "kg@", "100m", "m^", "kg//ha"] {
        assert!(!engine.is_valid(expr), "expr: {expr}");
    }
}

#[test]
fn describe_informal_vocabulary() {
    let engine = Engine::new();

    // dimensionless vocabulary describes itself
    assert_eq!("fraction", engine.describe("fraction"));
    // everything else resolves through the catalog
    assert_eq!("meter", engine.describe("m"));
    assert_eq!("", engine.describe("gibberish"));
}

#[test]
fn engine_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}

proptest! {
    #[test]
    fn strip_comments_is_idempotent(s in "\\PC*") {
        let once = strip_comments(&s);
        prop_assert_eq!(once.clone(), strip_comments(&once));
    }

    #[test]
    fn is_valid_is_total(s in "\\PC*") {
        let engine = Engine::new();
        // any answer is fine; failing to answer is not
        let _ = engine.is_valid(&s);
    }

    #[test]
    fn describe_is_total(s in "\\PC*") {
        let engine = Engine::new();
        let described = engine.describe(&s);
        prop_assert!(described.is_empty() || !described.is_empty());
    }

    #[test]
    fn record_conversion_is_total(from in "\\PC*", to in "\\PC*", value in "\\PC*") {
        let engine = Engine::new();
        let record = engine.convert_to_record(&from, &to, &value, None);
        prop_assert!(record.status == "0" || record.status == "1");
    }
}
