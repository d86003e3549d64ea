// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Affine conversion between dimension-compatible units, and the
//! precision-preserving rounding policy applied to results.

use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;
use bigdecimal::rounding::RoundingMode;
use float_cmp::approx_eq;

use crate::catalog::Unit;
use crate::common::Result;
use crate::{conv_err, num_err};

/// Converts `value` from `from` to `to` through the shared coherent base
/// unit. Units of different dimensions never produce a numeric result.
pub(crate) fn apply(from: &Unit, to: &Unit, value: f64) -> Result<f64> {
    if from.vector != to.vector {
        return conv_err!(
            DimensionMismatch,
            format!("cannot convert {from} to {to}")
        );
    }
    Ok((value * from.scale + from.offset - to.offset) / to.scale)
}

// the exact binary expansion of the intermediate double, so rounding
// decisions see everything the float arithmetic produced
fn exact(value: f64) -> Result<BigDecimal> {
    match BigDecimal::try_from(value) {
        Ok(d) => Ok(d),
        Err(_) => num_err!(InvalidNumber, value.to_string()),
    }
}

/// Rounds a raw conversion result to exactly `scale` fractional digits,
/// half-up.
pub(crate) fn round_to_scale(raw: f64, scale: i64) -> Result<BigDecimal> {
    Ok(exact(raw)?.with_scale_round(scale, RoundingMode::HalfUp))
}

/// Rounds a raw conversion result to the smallest number of fractional
/// digits that preserves the significant digits of `input`.
///
/// The starting scale carries the input's digit count over to the result;
/// the result is then rounded once more than that as a high-precision
/// anchor, and the scale is walked downward for as long as the coarser
/// rounding is indistinguishable from the anchor as an f64. This converges
/// to a value free of the spurious trailing digits that floating-point
/// intermediates introduce, without manufacturing precision the input
/// never had.
pub(crate) fn round_preserving(raw: f64, input: &BigDecimal) -> Result<BigDecimal> {
    let exact = exact(raw)?;
    let mut scale = exact.fractional_digit_count() + input.digits() as i64 - exact.digits() as i64;

    let mut ret = exact.with_scale_round(scale + 1, RoundingMode::HalfUp);
    let mut alt = ret.with_scale_round(scale, RoundingMode::HalfUp);
    while approx_eq!(
        f64,
        ret.to_f64().unwrap_or(f64::NAN),
        alt.to_f64().unwrap_or(f64::NAN),
        ulps = 0
    ) {
        ret = alt.clone();
        if scale > 0 {
            scale -= 1;
            alt = alt.with_scale_round(scale, RoundingMode::HalfUp);
        } else {
            break;
        }
    }

    Ok(ret)
}
