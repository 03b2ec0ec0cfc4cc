//! Path-based access for Value
//!
//! A path is a sequence of [`PathSegment`]s, each an array index or an object
//! key, resolved left to right. Reads never fail: a segment that cannot be
//! resolved produces a `Null` carrying the reason, and every later segment
//! passes that error through unchanged.
//!
//! Writes splice: the first segment's child is taken out of its slot, the
//! rest of the path is written into it, and the child is put back. A write
//! is dropped when the value carries an error or a slot along the way is
//! not addressable. Absent object keys followed by another key are created
//! as empty objects.
//!
//! Paths can also be written as text: `user.addresses[0].city`.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::ValueError;
use crate::value::{Inner, Value};

/// Maximum number of segments accepted in a textual path (DoS protection)
pub const MAX_PATH_SEGMENTS: usize = 100;

/// Path segment for navigating values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key access: .key
    Key(String),
    /// Array index access: [index]
    Index(usize),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<&PathSegment> for PathSegment {
    fn from(segment: &PathSegment) -> Self {
        segment.clone()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// An owned sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, which resolves to the value itself.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Extend with an object key
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Extend with an array index
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Keys that the plain dotted form cannot carry are written as `["..."]`
/// with `"` and `\` escaped, so the output parses back to the same path.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if needs_quoting(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if matches!(ch, '"' | '\\') {
                            f.write_str("\\")?;
                        }
                        write!(f, "{ch}")?;
                    }
                    f.write_str("\"]")?;
                }
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"', '\\'])
}

impl FromStr for Path {
    type Err = ValueError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        parse_path(path).map(|segments| Self { segments })
    }
}

/// Parse a path string into segments
///
/// Examples:
/// - "user.name" -> [Key("user"), Key("name")]
/// - "items[0]" -> [Key("items"), Index(0)]
/// - "data[0].value" -> [Key("data"), Index(0), Key("value")]
/// - `a["b.c"]` -> [Key("a"), Key("b.c")]
fn parse_path(path: &str) -> Result<Vec<PathSegment>, ValueError> {
    fn push(
        segments: &mut Vec<PathSegment>,
        segment: PathSegment,
        path: &str,
    ) -> Result<(), ValueError> {
        segments.push(segment);
        if segments.len() > MAX_PATH_SEGMENTS {
            return Err(ValueError::invalid_path(
                path,
                format!("more than {MAX_PATH_SEGMENTS} segments"),
            ));
        }
        Ok(())
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    push(&mut segments, PathSegment::Key(std::mem::take(&mut current)), path)?;
                }
            }
            '[' => {
                if !current.is_empty() {
                    push(&mut segments, PathSegment::Key(std::mem::take(&mut current)), path)?;
                }

                if chars.clone().next() == Some('"') {
                    chars.next();
                    let key = parse_quoted_key(&mut chars)
                        .ok_or_else(|| ValueError::invalid_path(path, "unterminated quoted key"))?;
                    push(&mut segments, PathSegment::Key(key), path)?;
                    continue;
                }

                let mut index_str = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == ']' {
                        closed = true;
                        break;
                    }
                    index_str.push(ch);
                }
                if !closed {
                    return Err(ValueError::invalid_path(path, "unterminated '['"));
                }

                let index = index_str.trim().parse::<usize>().map_err(|_| {
                    ValueError::invalid_path(path, format!("invalid index '{index_str}'"))
                })?;
                push(&mut segments, PathSegment::Index(index), path)?;
            }
            ']' => return Err(ValueError::invalid_path(path, "unmatched ']'")),
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        push(&mut segments, PathSegment::Key(current), path)?;
    }

    Ok(segments)
}

/// Read a key up to the closing `"]`, with the opening quote consumed.
fn parse_quoted_key(chars: &mut std::str::Chars<'_>) -> Option<String> {
    let mut key = String::new();
    loop {
        match chars.next()? {
            '\\' => key.push(chars.next()?),
            '"' => return (chars.next()? == ']').then_some(key),
            ch => key.push(ch),
        }
    }
}

impl Value {
    // ==================== Reads ====================

    /// Resolve one segment against this value, borrowing the child.
    fn resolve(&self, segment: &PathSegment) -> Result<&Value, ValueError> {
        match (segment, &self.inner) {
            (PathSegment::Index(index), Inner::Array(items)) => items
                .get(*index)
                .ok_or_else(|| ValueError::index_out_of_bounds(*index, items.len())),
            (PathSegment::Key(key), Inner::Object(map)) => {
                map.get(key).ok_or_else(|| ValueError::not_exist(key.as_str()))
            }
            (PathSegment::Index(_), _) => Err(self.propagated_error("array")),
            (PathSegment::Key(_), _) => Err(self.propagated_error("object")),
        }
    }

    /// The error a mismatched segment reports: the receiver's own error if
    /// it already failed, otherwise a fresh wrong-type error.
    fn propagated_error(&self, expected: &'static str) -> ValueError {
        self.error
            .clone()
            .unwrap_or_else(|| ValueError::wrong_type(expected, self.kind().name()))
    }

    /// Look up a single index or key.
    ///
    /// ```rust
    /// use nebula_json::{ErrorKind, Value};
    ///
    /// let v: Value = r#"{"a": [1, 2, 3]}"#.parse().unwrap();
    /// assert_eq!(v.get("a").get(1).i64_value(), 2);
    /// assert_eq!(v.get("b").error().map(|e| e.kind()), Some(ErrorKind::NotExist));
    /// ```
    pub fn get(&self, segment: impl Into<PathSegment>) -> Value {
        match self.resolve(&segment.into()) {
            Ok(child) => child.clone(),
            Err(err) => Value::failed(err),
        }
    }

    /// Look up a sequence of segments; equivalent to chaining [`get`](Self::get).
    ///
    /// The empty path returns a copy of `self`.
    pub fn get_path<I, S>(&self, path: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        let mut current = self;
        for segment in path {
            match current.resolve(&segment.into()) {
                Ok(child) => current = child,
                Err(err) => return Value::failed(err),
            }
        }
        current.clone()
    }

    /// Look up a textual path such as `items[0].name`.
    ///
    /// Malformed text yields a `Null` carrying an
    /// [`InvalidPath`](crate::ErrorKind::InvalidPath) error.
    pub fn pointer(&self, path: &str) -> Value {
        match path.parse::<Path>() {
            Ok(path) => self.get_path(&path),
            Err(err) => Value::failed(err),
        }
    }

    // ==================== Writes ====================

    /// Assign into a single array slot or object key.
    ///
    /// A no-op when `value` carries an error, when the index is out of
    /// bounds, or when `self` is not a container of the matching kind.
    pub fn set(&mut self, segment: impl Into<PathSegment>, value: impl Into<Value>) {
        self.assign(segment.into(), value.into());
    }

    /// Assign through a sequence of segments.
    ///
    /// Missing keys along the way become empty objects, but only when the
    /// write lands; a write dropped further down leaves `self` untouched.
    ///
    /// ```rust
    /// use nebula_json::Value;
    ///
    /// let mut v = Value::object_empty();
    /// v.set_path(["x", "y"], 5);
    /// assert_eq!(v.pointer("x.y").i64_value(), 5);
    /// ```
    pub fn set_path<I, S>(&mut self, path: I, value: impl Into<Value>)
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        let path: Vec<PathSegment> = path.into_iter().map(Into::into).collect();
        self.splice(&path, value.into());
    }

    /// Assign through a textual path. Malformed text is a no-op.
    pub fn set_pointer(&mut self, path: &str, value: impl Into<Value>) {
        match path.parse::<Path>() {
            Ok(path) => {
                self.splice(path.segments(), value.into());
            }
            Err(err) => trace!(error = %err, "write dropped: malformed path"),
        }
    }

    /// Returns whether the value landed.
    fn assign(&mut self, segment: PathSegment, value: Value) -> bool {
        if let Some(err) = &value.error {
            trace!(%segment, error = %err, "write dropped: value carries an error");
            return false;
        }

        let kind = self.kind();
        match (segment, &mut self.inner) {
            (PathSegment::Index(index), Inner::Array(items)) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => {
                    trace!(index, len = items.len(), "write dropped: index out of bounds");
                    false
                }
            },
            (PathSegment::Key(key), Inner::Object(map)) => {
                map.insert(key, value);
                true
            }
            (segment, _) => {
                trace!(%segment, %kind, "write dropped: not addressable");
                false
            }
        }
    }

    /// Returns whether the value landed. Children created on the way down
    /// are only kept when it did.
    fn splice(&mut self, path: &[PathSegment], value: Value) -> bool {
        match path {
            [] => false,
            [last] => self.assign(last.clone(), value),
            [first, rest @ ..] => {
                if value.error.is_some() {
                    trace!(segment = %first, "write dropped: value carries an error");
                    return false;
                }

                let vivify = matches!(rest.first(), Some(PathSegment::Key(_)));
                let (mut child, created) = match self.take_child(first, vivify) {
                    Ok(taken) => taken,
                    Err(err) => {
                        trace!(segment = %first, error = %err, "write dropped: path not addressable");
                        return false;
                    }
                };

                let landed = child.splice(rest, value);
                if landed || !created {
                    self.assign(first.clone(), child);
                }
                landed
            }
        }
    }

    /// Move the child at `segment` out of its slot, flagging whether it was
    /// created. A taken child must be put back with [`assign`](Self::assign);
    /// an absent key yields a fresh empty object when `vivify` is set.
    fn take_child(
        &mut self,
        segment: &PathSegment,
        vivify: bool,
    ) -> Result<(Value, bool), ValueError> {
        let expected = match (segment, &mut self.inner) {
            (PathSegment::Index(index), Inner::Array(items)) => {
                let len = items.len();
                return items
                    .get_mut(*index)
                    .map(|slot| (slot.take(), false))
                    .ok_or_else(|| ValueError::index_out_of_bounds(*index, len));
            }
            (PathSegment::Key(key), Inner::Object(map)) => {
                return match map.get_mut(key) {
                    Some(child) => Ok((child.take(), false)),
                    None if vivify => Ok((Value::object_empty(), true)),
                    None => Err(ValueError::not_exist(key.as_str())),
                };
            }
            (PathSegment::Index(_), _) => "array",
            (PathSegment::Key(_), _) => "object",
        };
        Err(self.propagated_error(expected))
    }
}
