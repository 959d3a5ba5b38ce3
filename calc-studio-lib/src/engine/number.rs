use std::fmt;
use std::fmt::Formatter;

/// A normalized evaluation result.
///
/// Evaluation happens entirely in `f64`, but results are presented the way a
/// calculator user expects them: rounded to eight decimal places, and shown
/// as a plain integer whenever the rounded value has no fractional part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(value) => *value as f64,
            Number::Float(value) => *value,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

const DECIMAL_PLACES: i32 = 8;

/// Rounds the given value to eight decimal places and collapses it to an
/// integer when the rounded value is whole.
///
/// Non-finite values pass through untouched so that expressions built from
/// the `inf` and `nan` constants still produce a result.
pub(crate) fn normalize(value: f64) -> Number {
    if !value.is_finite() {
        return Number::Float(value);
    }

    let rounded = round_to_places(value, DECIMAL_PLACES);
    // i64::MAX as f64 rounds up to 2^63, so the upper bound must be strict.
    if rounded.fract() == 0.0 && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Number::Integer(rounded as i64)
    } else {
        Number::Float(rounded)
    }
}

fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    // Magnitudes large enough to overflow the scaling are already whole.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
