//! Streaming JSON primitives for the lock file codec.
//!
//! The codec never builds a generic document tree. Reading goes through a
//! forward-only [`Cursor`] that converters drive token by token; writing goes
//! through a [`JsonWriter`] that converters drive call by call.
//!
//! - [`types`] - Token kinds
//! - [`limits`] - Resource limits applied while reading
//! - [`cursor`] - Pull parser over any `Read`
//! - [`writer`] - Indented emitter over any `Write`
//!
//! # Example
//!
//! ```
//! use lockfile_codec::json::{Cursor, Limits, TokenKind};
//!
//! let mut cursor = Cursor::from_slice(br#"{"type": "package", "extra": [1, 2]}"#, Limits::standard());
//! assert_eq!(cursor.advance().unwrap(), TokenKind::StartObject);
//! cursor.advance().unwrap();
//! assert!(cursor.property_name_equals(b"type"));
//! assert_eq!(cursor.read_string().unwrap(), "package");
//! cursor.advance().unwrap();
//! cursor.skip_subtree().unwrap();
//! assert_eq!(cursor.advance().unwrap(), TokenKind::EndObject);
//! cursor.finish().unwrap();
//! ```

pub mod cursor;
pub mod limits;
pub mod types;
pub mod writer;

pub use cursor::Cursor;
pub use limits::Limits;
pub use types::TokenKind;
pub use writer::JsonWriter;
