//! Equality and ordering for Value
//!
//! Comparisons are only defined between values of the same kind; any other
//! pairing is unequal and unordered. The attached error never takes part.

use std::cmp::Ordering;

use crate::value::{Inner, Value};

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Inner::Null, Inner::Null) => true,
            (Inner::Bool(a), Inner::Bool(b)) => a == b,
            (Inner::Number(a), Inner::Number(b)) => a == b,
            (Inner::String(a), Inner::String(b)) => a == b,
            (Inner::Array(a), Inner::Array(b)) => a == b,
            // IndexMap equality ignores entry order
            (Inner::Object(a), Inner::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// Numbers and strings are totally ordered among themselves. Booleans,
    /// nulls and containers only know equality: they compare `Equal` when
    /// equal and are unordered otherwise, so `<` and `>` are always false
    /// for them while `<=` and `>=` reduce to `==`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.inner, &other.inner) {
            (Inner::Number(a), Inner::Number(b)) => a.partial_cmp(b),
            (Inner::String(a), Inner::String(b)) => Some(a.cmp(b)),
            (Inner::Null, Inner::Null) => Some(Ordering::Equal),
            (Inner::Bool(_), Inner::Bool(_))
            | (Inner::Array(_), Inner::Array(_))
            | (Inner::Object(_), Inner::Object(_)) => (self == other).then_some(Ordering::Equal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1), json!(1.0))]
    #[case(json!("abc"), json!("abc"))]
    #[case(json!(null), json!(null))]
    #[case(json!([1, [2]]), json!([1.0, [2]]))]
    #[case(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1}))]
    fn test_equal(#[case] a: serde_json::Value, #[case] b: serde_json::Value) {
        let (a, b) = (Value::from(a), Value::from(b));
        assert_eq!(a, b);
        assert!(a <= b);
        assert!(a >= b);
        assert!(!(a < b));
        assert!(!(a > b));
    }

    #[rstest]
    #[case(json!(true), json!(1))]
    #[case(json!(false), json!(0))]
    #[case(json!("1"), json!(1))]
    #[case(json!(null), json!(0))]
    #[case(json!([]), json!({}))]
    #[case(json!([1, 2]), json!([2, 1]))]
    fn test_not_equal_and_unordered(#[case] a: serde_json::Value, #[case] b: serde_json::Value) {
        let (a, b) = (Value::from(a), Value::from(b));
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    fn test_number_ordering() {
        assert!(Value::from(1) < Value::from(2.5));
        assert!(Value::from(-3) < Value::from(0u8));
        assert!(Value::from(10) >= Value::from(10.0));
    }

    #[test]
    fn test_string_ordering() {
        assert!(Value::from("apple") < Value::from("banana"));
        assert!(Value::from("B") < Value::from("a"));
    }

    #[test]
    fn test_containers_have_no_strict_order() {
        let small = Value::from(json!([1]));
        let big = Value::from(json!([1, 2, 3]));
        assert!(!(small < big));
        assert!(!(small > big));
        assert!(!(small <= big));
    }

    #[test]
    fn test_error_is_ignored() {
        let failed = Value::failed(ValueError::not_exist("k"));
        assert_eq!(failed, Value::null());
    }

    #[test]
    fn test_unsupported_never_equal() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "x");
        let v = Value::from_serialize(&map);
        assert_ne!(v, v.clone());
    }
}
