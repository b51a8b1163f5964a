//! A small, self-contained JSON value model.
//!
//! [`JsonValue`] is a plain tagged union with one case per JSON kind. Containers own their
//! children outright, so there is no sharing, no cycles, and cloning is a deep copy. On top of it
//! sit three groups of operations:
//!
//! - mutation: [`JsonValue::set_field`], [`JsonValue::with_field`], [`JsonValue::push`];
//! - serialization: [`to_string`], [`to_string_pretty`] and the configurable [`Serializer`];
//! - parsing: [`from_str`], [`from_str_with_limit`] and [`Parser`].
//!
//! Every failure is a distinct [`Error`] variant returned to the caller. Nothing is logged, retried
//! or silently dropped here; that is left to whoever calls in.
//!
//! ```
//! use tagjson::JsonValue;
//!
//! let payload = JsonValue::Null
//!     .with_field("slope", 1.5)?
//!     .with_field("intercept", 0.5)?;
//! let text = tagjson::to_string(&payload)?;
//! assert_eq!(text, r#"{"slope": 1.5, "intercept": 0.5}"#);
//! assert_eq!(tagjson::from_str(&text)?, payload);
//! # Ok::<(), tagjson::Error>(())
//! ```

mod de;
mod error;
mod interop;
mod ser;
mod span;
mod value;

pub use de::{from_str, from_str_with_limit, Parser};
pub use error::{Error, Result};
pub use indexmap::IndexMap;
pub use ser::{to_string, to_string_pretty, Serializer, DEFAULT_MAX_DEPTH};
pub use span::Span;
pub use value::{JsonValue, Kind, Map};
