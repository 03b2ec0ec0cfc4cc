//! Deep merge of two values of the same kind.

use tracing::debug;

use crate::error::{ValueError, ValueResult};
use crate::value::{Inner, Value};

impl Value {
    /// Merge `other` into `self`.
    ///
    /// - objects merge key by key, recursing into children present on both
    ///   sides; a nested kind mismatch takes `other`'s child;
    /// - arrays append `other`'s elements;
    /// - any other pair of matching kinds takes `other`.
    ///
    /// Fails with [`WrongType`](crate::ErrorKind::WrongType) when the two
    /// top-level kinds differ, and with `other`'s own error when it carries
    /// one. Either way `self` is left untouched.
    ///
    /// ```
    /// use nebula_json::Value;
    ///
    /// let mut base: Value = r#"{"a": {"x": 1}, "list": [1]}"#.parse().unwrap();
    /// let patch: Value = r#"{"a": {"y": 2}, "list": [2]}"#.parse().unwrap();
    /// base.merge(&patch).unwrap();
    ///
    /// assert_eq!(base.pointer("a.y").i64_value(), 2);
    /// assert_eq!(base.get("list").len(), 2);
    /// ```
    pub fn merge(&mut self, other: &Value) -> ValueResult<()> {
        if let Some(err) = &other.error {
            debug!(error = %err, "merge rejected: patch carries an error");
            return Err(err.clone());
        }
        if self.kind() != other.kind() {
            return Err(ValueError::wrong_type(self.kind().name(), other.kind().name()));
        }
        self.merge_same_kind(other);
        Ok(())
    }

    /// Non-mutating [`merge`](Self::merge).
    pub fn merged(&self, other: &Value) -> ValueResult<Value> {
        let mut out = self.clone();
        out.merge(other)?;
        Ok(out)
    }

    fn merge_same_kind(&mut self, other: &Value) {
        match (&mut self.inner, &other.inner) {
            (Inner::Object(map), Inner::Object(patch)) => {
                for (key, incoming) in patch {
                    match map.get_mut(key) {
                        Some(existing) if existing.kind() == incoming.kind() => {
                            existing.merge_same_kind(incoming);
                        }
                        Some(existing) => *existing = incoming.clone(),
                        None => {
                            map.insert(key.clone(), incoming.clone());
                        }
                    }
                }
            }
            (Inner::Array(items), Inner::Array(extra)) => items.extend(extra.iter().cloned()),
            (inner, theirs) => *inner = theirs.clone(),
        }
        self.error = None;
    }
}
