//! Typed accessors.
//!
//! Every domain comes in two flavours:
//!
//! - `as_x()` returns the content only when the variant matches (numbers
//!   also accept booleans as 0/1) and `None` otherwise;
//! - `x_value()` always returns something, coercing across variants and
//!   falling back to the zero value of the domain.
//!
//! The matching setters reclassify the value: `set_x(None)` turns it into
//! `Null`, `set_x_value(v)` always stores `v`.

use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::Decimal;
use url::Url;

use crate::number::Number;
use crate::value::{Inner, Map, Value};

/// Characters left untouched when escaping a string before URL parsing:
/// alphanumerics plus the sub-delimiters allowed in a query component.
const URL_QUERY_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'_')
    .remove(b'~');

/// Strings `bool_value` treats as true, compared ignoring ASCII case.
const TRUTHY_STRINGS: [&str; 5] = ["true", "t", "yes", "y", "1"];

impl Value {
    // ==================== String ====================

    pub fn as_str(&self) -> Option<&str> {
        match &self.inner {
            Inner::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strings as-is, numbers and booleans in their canonical text form,
    /// anything else empty.
    pub fn string_value(&self) -> String {
        match &self.inner {
            Inner::String(s) => s.clone(),
            Inner::Number(n) => n.to_string(),
            Inner::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn set_string(&mut self, v: Option<String>) {
        match v {
            Some(s) => self.set_string_value(s),
            None => self.set_null(),
        }
    }

    pub fn set_string_value(&mut self, v: impl Into<String>) {
        self.replace(Inner::String(v.into()));
    }

    // ==================== Bool ====================

    pub fn as_bool(&self) -> Option<bool> {
        match self.inner {
            Inner::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Truthiness:
    ///
    /// - numbers are true unless zero;
    /// - strings are true when they equal, ignoring ASCII case, one of
    ///   `true`, `t`, `yes`, `y` or `1`;
    /// - everything but `Bool(true)` otherwise is false.
    pub fn bool_value(&self) -> bool {
        match &self.inner {
            Inner::Bool(b) => *b,
            Inner::Number(n) => !n.is_zero(),
            Inner::String(s) => TRUTHY_STRINGS
                .iter()
                .any(|truthy| s.eq_ignore_ascii_case(truthy)),
            _ => false,
        }
    }

    pub fn set_bool(&mut self, v: Option<bool>) {
        match v {
            Some(b) => self.set_bool_value(b),
            None => self.set_null(),
        }
    }

    pub fn set_bool_value(&mut self, v: bool) {
        self.replace(Inner::Bool(v));
    }

    // ==================== Number ====================

    /// The number, or a boolean as 0/1.
    pub fn as_number(&self) -> Option<Number> {
        match self.inner {
            Inner::Number(n) => Some(n),
            Inner::Bool(b) => Some(Number::from(b)),
            _ => None,
        }
    }

    /// Like [`as_number`](Self::as_number), additionally parsing strings as
    /// decimal literals. Unparsable strings and other variants give zero.
    pub fn number_value(&self) -> Number {
        match &self.inner {
            Inner::String(s) => Number::parse(s).unwrap_or(Number::ZERO),
            _ => self.as_number().unwrap_or(Number::ZERO),
        }
    }

    pub fn set_number(&mut self, v: Option<Number>) {
        match v {
            Some(n) => self.set_number_value(n),
            None => self.set_null(),
        }
    }

    pub fn set_number_value(&mut self, v: impl Into<Number>) {
        self.replace(Inner::Number(v.into()));
    }

    /// Arbitrary-precision view of a number.
    pub fn as_decimal(&self) -> Option<Decimal> {
        self.as_number().and_then(|n| n.to_decimal())
    }

    /// Decimal view with string parsing; anything unrepresentable is zero.
    ///
    /// Strings are parsed directly as decimals, so `"0.1"` stays exact
    /// instead of passing through `f64`.
    pub fn decimal_value(&self) -> Decimal {
        match &self.inner {
            Inner::String(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .unwrap_or(Decimal::ZERO)
            }
            _ => self.as_decimal().unwrap_or(Decimal::ZERO),
        }
    }

    // ==================== Null ====================

    /// `Some(())` for `Null`, including the result of a failed lookup.
    pub fn as_null(&self) -> Option<()> {
        self.is_null().then_some(())
    }

    pub fn set_null(&mut self) {
        self.replace(Inner::Null);
    }

    // ==================== URL ====================

    /// Parse a string as an absolute URL.
    ///
    /// Strings that already contain a percent escape are parsed as they are;
    /// anything else is percent-encoded first, so `"http://x.org/a b"`
    /// becomes `http://x.org/a%20b`.
    pub fn as_url(&self) -> Option<Url> {
        let s = self.as_str()?;
        if has_percent_escape(s) {
            Url::parse(s).ok()
        } else {
            Url::parse(&utf8_percent_encode(s, URL_QUERY_ALLOWED).to_string()).ok()
        }
    }

    pub fn set_url(&mut self, v: Option<&Url>) {
        match v {
            Some(url) => self.set_string_value(url.as_str()),
            None => self.set_null(),
        }
    }

    // ==================== Array ====================

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.inner {
            Inner::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Copies of the elements; empty for non-arrays.
    pub fn array_value(&self) -> Vec<Value> {
        self.as_array().map(<[Value]>::to_vec).unwrap_or_default()
    }

    /// The elements as codec data, bypassing per-element wrapping.
    pub fn raw_array(&self) -> Option<Vec<serde_json::Value>> {
        self.as_array()
            .map(|items| items.iter().map(Value::raw).collect())
    }

    pub fn set_raw_array(&mut self, v: Option<Vec<serde_json::Value>>) {
        match v {
            Some(items) => self.set_raw(serde_json::Value::Array(items)),
            None => self.set_null(),
        }
    }

    // ==================== Object ====================

    pub fn as_object(&self) -> Option<&Map> {
        match &self.inner {
            Inner::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Copy of the entries; empty for non-objects.
    pub fn object_value(&self) -> Map {
        self.as_object().cloned().unwrap_or_default()
    }

    /// The entries as codec data, bypassing per-entry wrapping.
    pub fn raw_object(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.raw())).collect())
    }

    pub fn set_raw_object(&mut self, v: Option<serde_json::Map<String, serde_json::Value>>) {
        match v {
            Some(map) => self.set_raw(serde_json::Value::Object(map)),
            None => self.set_null(),
        }
    }
}

fn has_percent_escape(s: &str) -> bool {
    s.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
}

// ==================== Numeric widths ====================

macro_rules! numeric_accessors {
    ($($ty:ty => $as:ident, $value:ident, $set:ident, $set_value:ident, $to:ident;)*) => {
        impl Value {
            $(
                #[doc = concat!("The number narrowed to `", stringify!($ty), "`; booleans count as 0/1.")]
                pub fn $as(&self) -> Option<$ty> {
                    self.as_number().map(|n| n.$to())
                }

                #[doc = concat!("Coerced to `", stringify!($ty), "`; strings are parsed, failures give 0.")]
                pub fn $value(&self) -> $ty {
                    self.number_value().$to()
                }

                pub fn $set(&mut self, v: Option<$ty>) {
                    self.set_number(v.map(Number::from));
                }

                pub fn $set_value(&mut self, v: $ty) {
                    self.set_number_value(v);
                }
            )*
        }
    };
}

numeric_accessors! {
    i8 => as_i8, i8_value, set_i8, set_i8_value, to_i8;
    i16 => as_i16, i16_value, set_i16, set_i16_value, to_i16;
    i32 => as_i32, i32_value, set_i32, set_i32_value, to_i32;
    i64 => as_i64, i64_value, set_i64, set_i64_value, to_i64;
    isize => as_isize, isize_value, set_isize, set_isize_value, to_isize;
    u8 => as_u8, u8_value, set_u8, set_u8_value, to_u8;
    u16 => as_u16, u16_value, set_u16, set_u16_value, to_u16;
    u32 => as_u32, u32_value, set_u32, set_u32_value, to_u32;
    u64 => as_u64, u64_value, set_u64, set_u64_value, to_u64;
    usize => as_usize, usize_value, set_usize, set_usize_value, to_usize;
    f32 => as_f32, f32_value, set_f32, set_f32_value, to_f32;
    f64 => as_f64, f64_value, set_f64, set_f64_value, to_f64;
}
