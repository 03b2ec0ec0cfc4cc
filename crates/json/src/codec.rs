//! Decoding from and rendering to JSON text
//!
//! Decoding goes through `serde_json` straight into [`Value`], then checks
//! the [`ReadOptions`] limits. Rendering has two shapes:
//!
//! - [`Value::to_raw_data`] produces the JSON bytes of any encodable value;
//! - [`Value::render`] and [`Value::to_raw_string`] produce text, where
//!   scalars print bare (`hello`, not `"hello"`) and containers print as
//!   JSON.
//!
//! ```
//! use nebula_json::{TextEncoding, Value, WriteOptions};
//!
//! let v: Value = r#"{"name": "ann", "tags": ["a"]}"#.parse().unwrap();
//! let opts = WriteOptions::default();
//!
//! assert_eq!(v.get("name").to_raw_string(TextEncoding::Utf8, &opts).as_deref(), Some("ann"));
//! assert_eq!(
//!     v.to_raw_string(TextEncoding::Utf8, &opts).as_deref(),
//!     Some(r#"{"name":"ann","tags":["a"]}"#)
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{ValueError, ValueResult};
use crate::options::{ReadOptions, TextEncoding, WriteOptions};
use crate::value::{Inner, Value};

// ==================== Decoding ====================

impl Value {
    /// Decode a complete JSON document.
    ///
    /// Trailing non-whitespace is an error. With
    /// [`allow_fragments`](ReadOptions::allow_fragments) off, the top-level
    /// element must be an array or object.
    pub fn from_slice(bytes: &[u8], options: &ReadOptions) -> ValueResult<Value> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        let value = <Value as serde::Deserialize>::deserialize(&mut de)
            .and_then(|v| de.end().map(|()| v))
            .map_err(|err| {
                debug!(error = %err, "decode failed");
                ValueError::from(err)
            })?;

        if !options.allow_fragments && !value.kind().is_container() {
            debug!(kind = %value.kind(), "decode rejected: top-level fragment");
            return Err(ValueError::invalid_json(format!(
                "top-level {} not allowed without fragments",
                value.kind()
            )));
        }

        if value.depth() > options.max_depth {
            debug!(max_depth = options.max_depth, "decode rejected: nesting too deep");
            return Err(ValueError::element_too_deep(options.max_depth));
        }

        Ok(value)
    }

    /// [`from_slice`](Self::from_slice) over text.
    pub fn from_str_with(text: &str, options: &ReadOptions) -> ValueResult<Value> {
        Self::from_slice(text.as_bytes(), options)
    }

    // ==================== Structure checks ====================

    /// Container nesting depth: 0 for scalars, 1 for a flat array or object.
    pub fn depth(&self) -> usize {
        match &self.inner {
            Inner::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Inner::Object(map) => 1 + map.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Whether the whole tree has a JSON form: no `Unsupported` node and no
    /// NaN or infinite number anywhere.
    pub fn is_encodable(&self) -> bool {
        match &self.inner {
            Inner::Unsupported => false,
            Inner::Number(n) => n.is_finite(),
            Inner::Array(items) => items.iter().all(Value::is_encodable),
            Inner::Object(map) => map.values().all(Value::is_encodable),
            Inner::Null | Inner::Bool(_) | Inner::String(_) => true,
        }
    }

    // ==================== Rendering ====================

    /// Encode as JSON bytes.
    pub fn to_raw_data(&self, options: &WriteOptions) -> ValueResult<Vec<u8>> {
        if !self.is_encodable() {
            debug!(kind = %self.kind(), "encode rejected: value has no JSON form");
            return Err(ValueError::invalid_json(
                "value contains an unsupported node or a non-finite number",
            ));
        }

        let encoded = match (options.pretty, options.sort_keys) {
            (false, false) => serde_json::to_vec(self),
            (true, false) => serde_json::to_vec_pretty(self),
            (false, true) => serde_json::to_vec(&SortedKeys(self)),
            (true, true) => serde_json::to_vec_pretty(&SortedKeys(self)),
        };
        encoded.map_err(|err| ValueError::invalid_json(err.to_string()))
    }

    /// Render as UTF-8 text.
    ///
    /// Scalars bypass the codec: strings come out bare, numbers as their
    /// literal, booleans as `true`/`false` and null as `null`. Containers
    /// deeper than [`WriteOptions::max_depth`] fail with
    /// [`ElementTooDeep`](crate::ErrorKind::ElementTooDeep).
    pub fn render(&self, options: &WriteOptions) -> ValueResult<String> {
        match &self.inner {
            Inner::String(s) => Ok(s.clone()),
            Inner::Number(n) if n.is_finite() => Ok(n.to_string()),
            Inner::Number(n) => Err(ValueError::invalid_json(format!("non-finite number {n}"))),
            Inner::Bool(b) => Ok(b.to_string()),
            Inner::Null => Ok("null".to_string()),
            Inner::Unsupported => Err(ValueError::invalid_json("unsupported value")),
            Inner::Array(_) | Inner::Object(_) => {
                if self.depth() > options.max_depth {
                    debug!(max_depth = options.max_depth, "render rejected: nesting too deep");
                    return Err(ValueError::element_too_deep(options.max_depth));
                }
                let bytes = self.to_raw_data(options)?;
                String::from_utf8(bytes).map_err(|err| ValueError::invalid_json(err.to_string()))
            }
        }
    }

    /// Render as text in `encoding`.
    ///
    /// Scalars come back as their text whatever the encoding. Container
    /// bytes are reinterpreted under the encoding as-is, so non-ASCII
    /// content under [`Latin1`](TextEncoding::Latin1) shows up byte by byte
    /// and under [`Ascii`](TextEncoding::Ascii) yields `None`, as does a
    /// failed render.
    pub fn to_raw_string(&self, encoding: TextEncoding, options: &WriteOptions) -> Option<String> {
        let rendered = match self.render(options) {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "render failed");
                return None;
            }
        };

        if self.kind().is_container() {
            encoding.decode(rendered.as_bytes())
        } else {
            Some(rendered)
        }
    }
}

/// Serializes a value with object keys in lexicographic order.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0.inner {
            Inner::Array(items) => serializer.collect_seq(items.iter().map(SortedKeys)),
            Inner::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &SortedKeys(value))?;
                }
                out.end()
            }
            _ => self.0.serialize(serializer),
        }
    }
}

impl FromStr for Value {
    type Err = ValueError;

    /// Decode with [`ReadOptions::default`].
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_str_with(text, &ReadOptions::default())
    }
}

impl fmt::Display for Value {
    /// Pretty-printed text, or `unknown` when the value cannot be rendered.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render(&WriteOptions::pretty()) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("unknown"),
        }
    }
}
