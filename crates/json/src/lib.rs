#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
//! # nebula-json
//!
//! A forgiving value model for JSON-shaped data of unknown structure.
//!
//! A [`Value`] holds exactly one of number, string, bool, array, object, null
//! or unsupported. Lookups never fail loudly: a missing key or a wrong type
//! yields a `Null` that carries a [`ValueError`], and every later lookup
//! passes that error along. Typed accessors come in a strict flavour
//! (`as_i64`, returning `Option`) and a coercing one (`i64_value`, always
//! returning something).
//!
//! ```
//! use nebula_json::prelude::*;
//!
//! let doc: Value = r#"{"user": {"name": "ann", "age": "41", "tags": ["a", "b"]}}"#
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(doc.pointer("user.name").as_str(), Some("ann"));
//! assert_eq!(doc.pointer("user.age").as_i64(), None);
//! assert_eq!(doc.pointer("user.age").i64_value(), 41);
//!
//! let missing = doc.get("user").get("email");
//! assert!(!missing.exists());
//! assert_eq!(missing.string_value(), "");
//!
//! let mut doc = doc;
//! doc.set_path(["user", "address", "city"], "Oslo");
//! assert_eq!(doc.pointer("user.address.city").string_value(), "Oslo");
//! ```

mod access;
mod codec;
pub mod error;
pub mod iter;
pub mod kind;
mod merge;
pub mod number;
mod ops;
pub mod options;
pub mod path;
mod serde;
pub mod value;

pub use error::{ErrorKind, ValueError, ValueResult};
pub use iter::Iter;
pub use kind::ValueKind;
pub use number::Number;
pub use options::{ReadOptions, TextEncoding, WriteOptions};
pub use path::{MAX_PATH_SEGMENTS, Path, PathSegment};
pub use value::{Map, Value};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorKind, Map, Number, Path, PathSegment, ReadOptions, TextEncoding, Value, ValueError,
        ValueKind, ValueResult, WriteOptions,
    };
}
