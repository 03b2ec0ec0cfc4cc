//! Variant tags for [`Value`](crate::Value).
//!
//! ```rust
//! use nebula_json::{Value, ValueKind};
//!
//! let v = Value::from(3.5);
//! assert_eq!(v.kind(), ValueKind::Number);
//! assert_eq!(ValueKind::Number.name(), "number");
//! assert!(ValueKind::Array.is_container());
//! ```

use core::fmt::{Display, Formatter};

/// The active variant of a value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Bool,
    Array,
    Object,
    Null,
    Unsupported,
}

impl ValueKind {
    /// Check if this kind is a container
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    /// Check if this kind is a scalar (anything but a container)
    pub const fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
            Self::Unsupported => "unsupported",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
