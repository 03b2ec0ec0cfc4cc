//! Decode and render options
//!
//! # Example
//!
//! ```
//! use nebula_json::{ReadOptions, WriteOptions};
//!
//! let read = ReadOptions::default();
//! assert!(read.allow_fragments);
//! assert_eq!(read.max_depth, 128);
//!
//! let strict = ReadOptions::strict();
//! assert!(!strict.allow_fragments);
//!
//! let write = WriteOptions::pretty().with_sorted_keys();
//! assert!(write.pretty && write.sort_keys);
//! ```

use serde::{Deserialize, Serialize};

/// Options for decoding text or bytes into a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Accept a scalar (`42`, `"text"`, `null`) as the top-level element
    pub allow_fragments: bool,

    /// Maximum nesting depth of containers
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            allow_fragments: true,
            max_depth: 128,
        }
    }
}

impl ReadOptions {
    /// Only containers at the top level, shallow nesting. For untrusted input.
    pub const fn strict() -> Self {
        Self {
            allow_fragments: false,
            max_depth: 32,
        }
    }

    /// Fragments allowed, nesting up to the codec's own recursion limit.
    pub const fn permissive() -> Self {
        Self {
            allow_fragments: true,
            max_depth: 128,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for rendering a [`Value`](crate::Value) as bytes or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Indent nested containers
    pub pretty: bool,

    /// Emit object keys in lexicographic order instead of map order
    pub sort_keys: bool,

    /// Maximum container nesting accepted by string rendering
    pub max_depth: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            sort_keys: false,
            max_depth: 10,
        }
    }
}

impl WriteOptions {
    /// Indented output with the default depth limit
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    pub const fn with_sorted_keys(mut self) -> Self {
        self.sort_keys = true;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Text encoding used when turning rendered bytes into a `String`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// 7-bit only; any byte above `0x7F` fails the conversion
    Ascii,
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ReadOptions::permissive(), ReadOptions::default());
        assert_eq!(ReadOptions::strict().max_depth, 32);
        assert_eq!(WriteOptions::default().max_depth, 10);
        assert!(!WriteOptions::default().pretty);
        assert!(WriteOptions::pretty().pretty);
    }

    #[test]
    fn test_options_load_from_partial_config() {
        let read: ReadOptions = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(read, ReadOptions::default().with_max_depth(4));

        let write: WriteOptions = serde_json::from_str(r#"{"sort_keys": true}"#).unwrap();
        assert_eq!(write, WriteOptions::default().with_sorted_keys());

        let enc: TextEncoding = serde_json::from_str(r#""latin1""#).unwrap();
        assert_eq!(enc, TextEncoding::Latin1);
    }

    #[test]
    fn test_decode() {
        assert_eq!(TextEncoding::Utf8.decode("héllo".as_bytes()).as_deref(), Some("héllo"));
        assert_eq!(TextEncoding::Ascii.decode(b"plain").as_deref(), Some("plain"));
        assert_eq!(TextEncoding::Ascii.decode("é".as_bytes()), None);
        assert_eq!(TextEncoding::Latin1.decode(&[0x63, 0xE9]).as_deref(), Some("cé"));
        assert_eq!(TextEncoding::Utf8.decode(&[0xFF]), None);
    }
}
