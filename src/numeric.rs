// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decimal rounding to a power of ten.
//!
//! `exp` is the base-10 exponent of the rounding step: `-2` rounds to
//! hundredths, `1` to tens.  The shift is done on the decimal exponent of the
//! value's shortest representation, so `round_to(1.005, -2)` is `1.01` and not
//! the `1.0` that multiplying by 100 in binary would give.
//!
//! Negative values are adjusted on their magnitude: `floor_to(-55.51, -1)`
//! is `-55.5`.

fn shift(value: f64, exp: i32) -> f64 {
    let repr = format!("{value:e}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return value;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f64::NAN;
    };
    format!("{mantissa}e{}", exponent + exp)
        .parse()
        .unwrap_or(f64::NAN)
}

fn decimal_adjust(value: f64, exp: i32, op: fn(f64) -> f64) -> f64 {
    if exp == 0 {
        return op(value);
    }
    if !value.is_finite() {
        return value;
    }
    if value < 0.0 {
        return -decimal_adjust(-value, exp, op);
    }
    shift(op(shift(value, -exp)), exp)
}

/// Rounds half away from zero to a multiple of `10^exp`.
pub fn round_to(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::round)
}

pub fn floor_to(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::floor)
}

pub fn ceil_to(value: f64, exp: i32) -> f64 {
    decimal_adjust(value, exp, f64::ceil)
}
