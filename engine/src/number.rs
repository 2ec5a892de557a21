//! Numeric node values
//!
//! Node values start as either integers or floats. Integer arithmetic stays
//! exact while it fits in an `i128`; an operation that would overflow is
//! carried out in `f64` instead, so the default branch functions (which grow
//! double-exponentially) degrade to floating point rather than wrapping.
//!
//! With the default rule and root 11, values stay exact up to height 6
//! (`11^32` fits in an `i128`, `11^64` does not).

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// A node value
///
/// Equality is by representation: an `Int` never equals a `Float`, and floats
/// compare bit for bit, so a NaN value equals itself.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    /// Interpret an untyped argument as a node value.
    ///
    /// Only JSON numbers are accepted; strings, booleans, arrays, objects and
    /// null are rejected with [`Error::InvalidArgument`].
    pub fn from_json(argument: &'static str, value: &Value) -> Result<Number> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Number::Int(i as i128))
                } else if let Some(u) = n.as_u64() {
                    Ok(Number::Int(u as i128))
                } else {
                    n.as_f64().map(Number::Float).ok_or_else(|| {
                        Error::invalid_argument(argument, format!("unrepresentable number {}", n))
                    })
                }
            }
            other => Err(Error::invalid_argument(
                argument,
                format!("must be numeric, got {}", json_kind(other)),
            )),
        }
    }

    /// Square of the value
    pub fn squared(self) -> Number {
        self * self
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply an integer operation, falling back to floats on overflow or when
/// either side is already a float.
fn combine(
    lhs: Number,
    rhs: Number,
    exact: fn(i128, i128) -> Option<i128>,
    approx: fn(f64, f64) -> f64,
) -> Number {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => match exact(a, b) {
            Some(v) => Number::Int(v),
            None => Number::Float(approx(a as f64, b as f64)),
        },
        (a, b) => Number::Float(approx(a.as_f64(), b.as_f64())),
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        combine(self, rhs, i128::checked_add, |a, b| a + b)
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        combine(self, rhs, i128::checked_sub, |a, b| a - b)
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        combine(self, rhs, i128::checked_mul, |a, b| a * b)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Int(i) => match i.checked_neg() {
                Some(v) => Number::Int(v),
                None => Number::Float(-(i as f64)),
            },
            Number::Float(f) => Number::Float(-f),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::Int(value as i128)
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write_float(f, *x),
        }
    }
}

/// Floats print as `121.0`, `0.25`, `1e+16`, `1.5e-05`, `inf`, `nan`.
///
/// Debug formatting already keeps the trailing `.0` and switches to an
/// exponent at the same magnitudes; the exponent gets an explicit sign and at
/// least two digits.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    let repr = format!("{:?}", x);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&repr),
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(i) => serializer.serialize_i128(i),
            Number::Float(x) => serializer.serialize_f64(x),
        }
    }
}
