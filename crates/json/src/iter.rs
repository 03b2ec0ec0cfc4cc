//! Iteration over the children of a container
//!
//! Arrays yield their stringified indices, objects their keys in map order,
//! and every other variant yields nothing. The iterator borrows the value, so
//! it can run alongside other reads, and each call to [`Value::iter`] starts
//! from the beginning.
//!
//! ```
//! use nebula_json::Value;
//!
//! let v: Value = r#"{"a": 1, "b": [true, false]}"#.parse().unwrap();
//!
//! let keys: Vec<String> = v.iter().map(|(k, _)| k).collect();
//! assert_eq!(keys, ["a", "b"]);
//!
//! for (index, item) in &v.get("b") {
//!     println!("{index}: {}", item.bool_value());
//! }
//! ```

use std::iter::{Enumerate, FusedIterator};

use crate::value::{Inner, Value};

/// Iterator over `(key, child)` pairs of a [`Value`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    state: State<'a>,
}

#[derive(Debug, Clone)]
enum State<'a> {
    Array(Enumerate<std::slice::Iter<'a, Value>>),
    Object(indexmap::map::Iter<'a, String, Value>),
    Empty,
}

impl<'a> Iter<'a> {
    fn new(value: &'a Value) -> Self {
        let state = match &value.inner {
            Inner::Array(items) => State::Array(items.iter().enumerate()),
            Inner::Object(map) => State::Object(map.iter()),
            _ => State::Empty,
        };
        Self { state }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            State::Array(items) => items.next().map(|(i, v)| (i.to_string(), v)),
            State::Object(entries) => entries.next().map(|(k, v)| (k.clone(), v)),
            State::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        match &self.state {
            State::Array(items) => items.len(),
            State::Object(entries) => entries.len(),
            State::Empty => 0,
        }
    }
}

impl FusedIterator for Iter<'_> {}

impl Value {
    /// Iterate over `(key, child)` pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Object keys in map order; empty for every other variant.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = (String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn collect(v: &Value) -> Vec<(String, serde_json::Value)> {
        v.iter().map(|(k, v)| (k, v.raw())).collect()
    }

    #[test]
    fn test_array_keys_are_indices() {
        let v = Value::from(json!(["a", "b", "c"]));
        assert_eq!(
            collect(&v),
            vec![
                ("0".to_string(), json!("a")),
                ("1".to_string(), json!("b")),
                ("2".to_string(), json!("c")),
            ]
        );
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let mut v = Value::object_empty();
        v.set("z", 1);
        v.set("a", 2);
        v.set("m", 3);
        let keys: Vec<_> = v.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(v.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }

    #[test]
    fn test_scalars_yield_nothing() {
        for v in [Value::null(), Value::from(1), Value::from("s"), Value::from(true)] {
            assert_eq!(v.iter().count(), 0);
            assert_eq!(v.keys().count(), 0);
        }
    }

    #[test]
    fn test_restartable() {
        let v = Value::from(json!({"a": 1, "b": 2}));
        assert_eq!(v.iter().count(), 2);
        assert_eq!(v.iter().count(), 2);
    }

    #[test]
    fn test_exact_size() {
        let v = Value::from(json!([1, 2, 3, 4]));
        let mut iter = v.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_for_loop_over_reference() {
        let v = Value::from(json!([10, 20]));
        let mut sum = 0;
        for (_, item) in &v {
            sum += item.i64_value();
        }
        assert_eq!(sum, 30);
    }
}
