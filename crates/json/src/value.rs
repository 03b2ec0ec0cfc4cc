//! The central [`Value`] type: one node of a JSON-like tree.
//!
//! A value holds exactly one variant plus an optional attached
//! [`ValueError`] describing why the lookup or classification that produced
//! it failed. The variant and the error are independent: a failed lookup is
//! a `Null` carrying an error, a document `null` is a `Null` without one.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorKind, ValueError};
use crate::kind::ValueKind;
use crate::number::Number;

/// Ordered string-keyed mapping backing the `Object` variant.
pub type Map = IndexMap<String, Value>;

/// A dynamically typed JSON value.
///
/// Cloning is a deep copy; a child fetched from a container never aliases
/// the parent's storage.
#[derive(Debug, Clone, Default)]
pub struct Value {
    pub(crate) inner: Inner,
    pub(crate) error: Option<ValueError>,
}

/// Variant storage. `Unsupported` only ever appears together with an error.
#[derive(Debug, Clone, Default)]
pub(crate) enum Inner {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    Unsupported,
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self {
            inner: Inner::Null,
            error: None,
        }
    }

    /// Create an empty array value
    pub const fn array_empty() -> Self {
        Self {
            inner: Inner::Array(Vec::new()),
            error: None,
        }
    }

    /// Create an empty object value
    pub fn object_empty() -> Self {
        Self {
            inner: Inner::Object(Map::new()),
            error: None,
        }
    }

    /// Classify an already-decoded primitive tree.
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        Self {
            inner: classify(raw),
            error: None,
        }
    }

    /// Classify any serializable value.
    ///
    /// Shapes the codec cannot represent, such as maps with non-string keys,
    /// produce an `Unsupported` value carrying an
    /// [`UnsupportedType`](ErrorKind::UnsupportedType) error.
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(raw) => Self::from_raw(&raw),
            Err(err) => {
                debug!(error = %err, "raw input could not be classified");
                Self {
                    inner: Inner::Unsupported,
                    error: Some(ValueError::unsupported_type(err.to_string())),
                }
            }
        }
    }

    /// A `Null` carrying `error`, the result of every failed lookup.
    pub(crate) fn failed(error: ValueError) -> Self {
        Self {
            inner: Inner::Null,
            error: Some(error),
        }
    }

    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self.inner {
            Inner::Null => ValueKind::Null,
            Inner::Bool(_) => ValueKind::Bool,
            Inner::Number(_) => ValueKind::Number,
            Inner::String(_) => ValueKind::String,
            Inner::Array(_) => ValueKind::Array,
            Inner::Object(_) => ValueKind::Object,
            Inner::Unsupported => ValueKind::Unsupported,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.inner, Inner::Null)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self.inner, Inner::Bool(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.inner, Inner::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self.inner, Inner::String(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.inner, Inner::Array(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self.inner, Inner::Object(_))
    }

    // ==================== Error queries ====================

    /// The error attached by the operation that produced this value.
    pub fn error(&self) -> Option<&ValueError> {
        self.error.as_ref()
    }

    /// `false` exactly when this value is the result of looking up an
    /// absent object key.
    ///
    /// Other failures (wrong type, index out of bounds) still report `true`;
    /// inspect [`error`](Self::error) to tell those apart from a real value.
    pub fn exists(&self) -> bool {
        !matches!(&self.error, Some(err) if err.kind() == ErrorKind::NotExist)
    }

    // ==================== Size queries ====================

    /// Number of elements or entries; 0 for scalars.
    pub fn len(&self) -> usize {
        match &self.inner {
            Inner::Array(items) => items.len(),
            Inner::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// `true` for empty containers and for every scalar.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is an object holding `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        match &self.inner {
            Inner::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    // ==================== Raw content ====================

    /// The content as a codec tree.
    ///
    /// Non-finite numbers and unsupported nodes have no codec form and come
    /// out as `null`; use [`to_raw_data`](Self::to_raw_data) when that must
    /// be an error instead.
    pub fn raw(&self) -> serde_json::Value {
        match &self.inner {
            Inner::Null | Inner::Unsupported => serde_json::Value::Null,
            Inner::Bool(b) => serde_json::Value::Bool(*b),
            Inner::Number(n) => n
                .to_json()
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Inner::String(s) => serde_json::Value::String(s.clone()),
            Inner::Array(items) => items.iter().map(Self::raw).collect(),
            Inner::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.raw())).collect(),
            ),
        }
    }

    /// Replace the content with a freshly classified primitive tree.
    ///
    /// Clears any attached error, so a failed lookup result can be turned
    /// back into a regular value.
    pub fn set_raw(&mut self, raw: impl Into<serde_json::Value>) {
        self.error = None;
        self.inner = classify(&raw.into());
    }

    /// Replace the content and clear the error.
    pub(crate) fn replace(&mut self, inner: Inner) {
        self.error = None;
        self.inner = inner;
    }

    /// Move the content out, leaving a plain `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

/// Map a decoded primitive onto exactly one variant.
fn classify(raw: &serde_json::Value) -> Inner {
    match raw {
        serde_json::Value::Null => Inner::Null,
        serde_json::Value::Bool(b) => Inner::Bool(*b),
        serde_json::Value::Number(n) => Inner::Number(Number::from(n)),
        serde_json::Value::String(s) => Inner::String(s.clone()),
        serde_json::Value::Array(items) => Inner::Array(items.iter().map(Value::from_raw).collect()),
        serde_json::Value::Object(map) => Inner::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), Value::from_raw(v)))
                .collect(),
        ),
    }
}

// ==================== Literal construction ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self {
            inner: Inner::Bool(v),
            error: None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self {
            inner: Inner::Number(n),
            error: None,
        }
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::from(Number::from(v))
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self {
            inner: Inner::String(s),
            error: None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<url::Url> for Value {
    fn from(url: url::Url) -> Self {
        Self::from(String::from(url))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::null()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Self::null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        Self::from_raw(&raw)
    }
}

/// Elements carrying an error are skipped; an error-bearing value is never
/// adopted into a container.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        map.into_iter().collect()
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items = iter
            .into_iter()
            .map(Into::into)
            .filter(|v: &Value| v.error.is_none())
            .collect();
        Self {
            inner: Inner::Array(items),
            error: None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v): &(String, Value)| v.error.is_none())
            .collect();
        Self {
            inner: Inner::Object(map),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_boolean_is_not_number() {
        let t = Value::from_raw(&json!(true));
        let one = Value::from_raw(&json!(1));

        assert_eq!(t.kind(), ValueKind::Bool);
        assert_eq!(one.kind(), ValueKind::Number);
        assert_ne!(t, one);
    }

    #[test]
    fn test_classify_nested() {
        let v = Value::from_raw(&json!({"a": [1, "two", null, {"b": false}]}));
        assert!(v.is_object());
        assert_eq!(v.len(), 1);
        assert_eq!(v.raw(), json!({"a": [1, "two", null, {"b": false}]}));
    }

    #[test]
    fn test_unsupported_from_serialize() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);

        let v = Value::from_serialize(&map);
        assert_eq!(v.kind(), ValueKind::Unsupported);
        assert_eq!(v.error().map(ValueError::kind), Some(ErrorKind::UnsupportedType));
        assert!(v.exists());
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let v = Value::from_serialize(&Point { x: 1, y: -2 });
        assert_eq!(v.raw(), json!({"x": 1, "y": -2}));
    }

    #[test]
    fn test_set_raw_clears_error_and_reclassifies() {
        let mut v = Value::failed(ValueError::not_exist("k"));
        assert!(!v.exists());

        v.set_raw(json!("now a string"));
        assert!(v.exists());
        assert!(v.error().is_none());
        assert_eq!(v.kind(), ValueKind::String);

        v.set_raw(json!([1, 2]));
        assert_eq!(v.kind(), ValueKind::Array);
    }

    #[test]
    fn test_len_of_scalars() {
        assert_eq!(Value::from(5).len(), 0);
        assert!(Value::from("abc").is_empty());
        assert!(Value::null().is_empty());
        assert!(Value::array_empty().is_empty());
    }

    #[test]
    fn test_containers_skip_error_bearing_values() {
        let v = Value::from(vec![
            Value::from(1),
            Value::failed(ValueError::not_exist("x")),
            Value::from(2),
        ]);
        assert_eq!(v.raw(), json!([1, 2]));

        let obj: Value = [
            ("a", Value::from(1)),
            ("b", Value::failed(ValueError::wrong_type("array", "null"))),
        ]
        .into_iter()
        .collect();
        assert_eq!(obj.raw(), json!({"a": 1}));
    }

    #[test]
    fn test_non_finite_numbers_have_no_raw_form() {
        assert_eq!(Value::from(f64::NAN).raw(), serde_json::Value::Null);
        assert_eq!(Value::from(f64::NAN).kind(), ValueKind::Number);
    }

    #[test]
    fn test_option_literal() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")).kind(), ValueKind::String);
    }
}
