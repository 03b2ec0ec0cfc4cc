//! Canonical numeric representation shared by every numeric accessor.
//!
//! A [`Number`] keeps the representation the codec decoded (unsigned
//! integer, negative integer or float), so `u64::MAX` and `0.1` both survive
//! a round trip untouched. Narrowing to a specific width happens only on
//! read, through the lossy `to_*` methods.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON number.
///
/// Integers that fit are stored exactly; everything else is an `f64`.
/// Non-negative integers are always stored unsigned so that equal values
/// share one representation.
#[derive(Debug, Clone, Copy)]
pub struct Number(N);

#[derive(Debug, Clone, Copy)]
enum N {
    PosInt(u64),
    /// Always less than zero.
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// The zero value coercing accessors fall back to.
    pub const ZERO: Self = Self(N::PosInt(0));

    /// Parse a decimal literal (`"42"`, `"-7"`, `"1.5e3"`).
    ///
    /// Surrounding whitespace is ignored. Text that is not a finite number,
    /// including `"NaN"` and `"inf"`, yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(u) = text.parse::<u64>() {
            return Some(Self::from(u));
        }
        if let Ok(i) = text.parse::<i64>() {
            return Some(Self::from(i));
        }
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Self(N::Float(f))),
            _ => None,
        }
    }

    // ==================== Type queries ====================

    /// Stored as an integer that fits in `i64`
    pub fn is_i64(&self) -> bool {
        match self.0 {
            N::PosInt(u) => i64::try_from(u).is_ok(),
            N::NegInt(_) => true,
            N::Float(_) => false,
        }
    }

    /// Stored as a non-negative integer
    pub fn is_u64(&self) -> bool {
        matches!(self.0, N::PosInt(_))
    }

    /// Stored as a float
    pub fn is_f64(&self) -> bool {
        matches!(self.0, N::Float(_))
    }

    /// Finite, i.e. representable in a JSON document
    pub fn is_finite(&self) -> bool {
        match self.0 {
            N::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self.0 {
            N::PosInt(u) => u == 0,
            N::NegInt(_) => false,
            N::Float(f) => f == 0.0,
        }
    }

    // ==================== Exact views ====================

    /// The value as `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
            N::Float(_) => None,
        }
    }

    /// The value as `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            N::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// Arbitrary-precision view. `None` for non-finite or out-of-range floats.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self.0 {
            N::PosInt(u) => Some(Decimal::from(u)),
            N::NegInt(i) => Some(Decimal::from(i)),
            N::Float(f) => Decimal::from_f64(f),
        }
    }

    /// Codec representation. `None` for NaN and the infinities.
    pub fn to_json(&self) -> Option<serde_json::Number> {
        match self.0 {
            N::PosInt(u) => Some(u.into()),
            N::NegInt(i) => Some(i.into()),
            N::Float(f) => serde_json::Number::from_f64(f),
        }
    }
}

// ==================== Lossy narrowing ====================

macro_rules! narrowing {
    ($($method:ident => $ty:ty),* $(,)?) => {
        impl Number {
            $(
                #[doc = concat!("Narrow to `", stringify!($ty), "` with `as` semantics.")]
                #[allow(trivial_numeric_casts, clippy::unnecessary_cast)]
                pub fn $method(&self) -> $ty {
                    match self.0 {
                        N::PosInt(u) => u as $ty,
                        N::NegInt(i) => i as $ty,
                        N::Float(f) => f as $ty,
                    }
                }
            )*
        }
    };
}

narrowing! {
    to_i8 => i8,
    to_i16 => i16,
    to_i32 => i32,
    to_i64 => i64,
    to_isize => isize,
    to_u8 => u8,
    to_u16 => u16,
    to_u32 => u32,
    to_u64 => u64,
    to_usize => usize,
    to_f32 => f32,
    to_f64 => f64,
}

// ==================== Construction ====================

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                #[allow(trivial_numeric_casts, clippy::unnecessary_cast)]
                fn from(v: $ty) -> Self {
                    Self(N::PosInt(v as u64))
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                #[allow(trivial_numeric_casts, clippy::unnecessary_cast)]
                fn from(v: $ty) -> Self {
                    if v < 0 {
                        Self(N::NegInt(v as i64))
                    } else {
                        Self(N::PosInt(v as u64))
                    }
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self(N::Float(v))
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self(N::Float(f64::from(v)))
    }
}

impl From<bool> for Number {
    fn from(v: bool) -> Self {
        Self(N::PosInt(u64::from(v)))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::from(u)
        } else if let Some(i) = n.as_i64() {
            Self::from(i)
        } else {
            Self(N::Float(n.as_f64().unwrap_or(f64::NAN)))
        }
    }
}

// ==================== Comparison ====================

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    /// Integers compare exactly; as soon as a float is involved both sides
    /// compare as `f64`, and NaN is unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (N::PosInt(a), N::PosInt(b)) => Some(a.cmp(&b)),
            (N::NegInt(a), N::NegInt(b)) => Some(a.cmp(&b)),
            (N::PosInt(_), N::NegInt(_)) => Some(Ordering::Greater),
            (N::NegInt(_), N::PosInt(_)) => Some(Ordering::Less),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

// ==================== Formatting ====================

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            N::PosInt(u) => write!(f, "{u}"),
            N::NegInt(i) => write!(f, "{i}"),
            N::Float(v) => write!(f, "{v}"),
        }
    }
}

// ==================== Serde ====================

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            N::PosInt(u) => serializer.serialize_u64(u),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Number, E> {
                Ok(Number::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Number, E> {
                Ok(Number::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Number, E> {
                Ok(Number::from(v))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(Number::from(42u64)))]
    #[case("-7", Some(Number::from(-7i64)))]
    #[case(" 12 ", Some(Number::from(12u64)))]
    #[case("1.5", Some(Number::from(1.5)))]
    #[case("1e3", Some(Number::from(1000.0)))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("1e400", None)]
    fn test_parse(#[case] text: &str, #[case] expected: Option<Number>) {
        assert_eq!(Number::parse(text), expected);
    }

    #[test]
    fn test_large_unsigned_survives() {
        let n = Number::from(u64::MAX);
        assert_eq!(n.as_u64(), Some(u64::MAX));
        assert_eq!(n.as_i64(), None);
        assert!(!n.is_i64());
        assert_eq!(n.to_string(), "18446744073709551615");
    }

    #[test]
    fn test_narrowing_truncates() {
        let n = Number::from(300u64);
        assert_eq!(n.to_u8(), 44);
        assert_eq!(n.to_i16(), 300);

        let f = Number::from(3.9);
        assert_eq!(f.to_i32(), 3);
        assert_eq!(Number::from(1e20).to_i32(), i32::MAX);
        assert_eq!(Number::from(f64::NAN).to_i64(), 0);
        assert_eq!(Number::from(-1i64).to_u32(), u32::MAX);
    }

    #[test]
    fn test_cross_representation_equality() {
        assert_eq!(Number::from(1u8), Number::from(1.0));
        assert_eq!(Number::from(0i64), Number::from(0u64));
        assert_ne!(Number::from(f64::NAN), Number::from(f64::NAN));
        assert!(Number::from(-1i64) < Number::from(0u64));
        assert!(Number::from(2.5) > Number::from(2u64));
        assert!(Number::from(u64::MAX) > Number::from(i64::MAX));
    }

    #[test]
    fn test_decimal_view() {
        assert_eq!(Number::from(42u64).to_decimal(), Some(Decimal::from(42)));
        assert_eq!(Number::from(f64::INFINITY).to_decimal(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from(1.5).to_string(), "1.5");
        assert_eq!(Number::from(-3i32).to_string(), "-3");
        assert_eq!(Number::from(2.0).to_string(), "2");
    }

    #[test]
    fn test_json_number_conversion() {
        let n = serde_json::Number::from(-12i64);
        assert_eq!(Number::from(&n), Number::from(-12i64));
        assert!(Number::from(f64::NAN).to_json().is_none());
        assert_eq!(Number::from(7u64).to_json(), Some(serde_json::Number::from(7u64)));
    }
}
