//! Error types attached to values and returned by explicit conversions.
//!
//! Navigation and classification never fail loudly: the error is attached to
//! the [`Value`](crate::Value) they produce. Only the explicit conversions
//! (decoding, rendering, merging) hand a [`ValueError`] back as `Err`.

use thiserror::Error;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Closed set of error codes a [`ValueError`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raw input could not be classified into a variant.
    UnsupportedType,
    /// Array index outside `[0, len)`.
    IndexOutOfBounds,
    /// Segment or operation does not match the variant.
    WrongType,
    /// Object key is absent.
    NotExist,
    /// The value cannot be encoded as JSON.
    InvalidJson,
    /// Nesting exceeds the configured depth.
    ElementTooDeep,
    /// The codec rejected the input document.
    Decode,
    /// A textual path could not be parsed.
    InvalidPath,
}

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors produced while classifying, navigating or converting values.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Raw input has a shape no variant can hold
    #[error("unsupported type: {reason}")]
    UnsupportedType { reason: String },

    /// Array index out of bounds
    #[error("index {index} out of bounds (length: {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Variant mismatch
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    /// Object key not found
    #[error("key does not exist: '{key}'")]
    NotExist { key: String },

    /// Serialization precondition failed
    #[error("invalid JSON: {reason}")]
    InvalidJson { reason: String },

    /// Nesting limit exceeded
    #[error("element too deep: nesting exceeds {max_depth}")]
    ElementTooDeep { max_depth: usize },

    /// Codec failure, with the position it reported
    #[error("decode error at line {line}, column {column}: {message}")]
    Decode {
        message: String,
        line: usize,
        column: usize,
    },

    /// Malformed textual path
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create an unsupported type error
    pub fn unsupported_type(reason: impl Into<String>) -> Self {
        Self::UnsupportedType {
            reason: reason.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Create a wrong type error
    pub fn wrong_type(expected: &'static str, actual: &'static str) -> Self {
        Self::WrongType { expected, actual }
    }

    /// Create a key not found error
    pub fn not_exist(key: impl Into<String>) -> Self {
        Self::NotExist { key: key.into() }
    }

    /// Create an invalid JSON error
    pub fn invalid_json(reason: impl Into<String>) -> Self {
        Self::InvalidJson {
            reason: reason.into(),
        }
    }

    /// Create an element too deep error
    pub fn element_too_deep(max_depth: usize) -> Self {
        Self::ElementTooDeep { max_depth }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ValueError {
    /// The closed error code of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::WrongType { .. } => ErrorKind::WrongType,
            Self::NotExist { .. } => ErrorKind::NotExist,
            Self::InvalidJson { .. } => ErrorKind::InvalidJson,
            Self::ElementTooDeep { .. } => ErrorKind::ElementTooDeep,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
        }
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "JSON_UNSUPPORTED_TYPE",
            Self::IndexOutOfBounds { .. } => "JSON_INDEX_OUT_OF_BOUNDS",
            Self::WrongType { .. } => "JSON_WRONG_TYPE",
            Self::NotExist { .. } => "JSON_NOT_EXIST",
            Self::InvalidJson { .. } => "JSON_INVALID",
            Self::ElementTooDeep { .. } => "JSON_ELEMENT_TOO_DEEP",
            Self::Decode { .. } => "JSON_DECODE",
            Self::InvalidPath { .. } => "JSON_INVALID_PATH",
        }
    }

    /// Whether this error came out of a lookup rather than a conversion.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::WrongType { .. } | Self::NotExist { .. }
        )
    }
}

// ============================================================================
// EXTERNAL ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for ValueError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for value operations
pub type ValueResult<T> = Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_bounds() {
        let err = ValueError::index_out_of_bounds(5, 3);
        assert_eq!(err.code(), "JSON_INDEX_OUT_OF_BOUNDS");
        assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_lookup_errors() {
        assert!(ValueError::not_exist("a").is_lookup_error());
        assert!(ValueError::wrong_type("object", "number").is_lookup_error());
        assert!(!ValueError::invalid_json("nan").is_lookup_error());
        assert!(!ValueError::element_too_deep(10).is_lookup_error());
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err: ValueError = json_err.into();

        assert_eq!(err.kind(), ErrorKind::Decode);
        match err {
            ValueError::Decode { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ValueError::not_exist("name").to_string(),
            "key does not exist: 'name'"
        );
        assert_eq!(
            ValueError::wrong_type("array", "string").to_string(),
            "wrong type: expected array, got string"
        );
    }
}
