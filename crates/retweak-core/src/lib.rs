//! Typed values, type tags and the text codec for retweak bar files.
//!
//! This crate holds everything about a bar variable that does not depend on
//! a widget toolkit:
//!
//! - [`TypeTag`] / [`BuiltinType`] name a value's shape
//! - [`Value`] is the tagged value itself
//! - [`TypeRegistry`] resolves type names, including user-defined enums
//! - [`serialize`] / [`parse`] convert values to and from text
//! - [`split_line`] / [`format_line`] handle the `name: TYPE value` lines
//!
//! # Example
//!
//! ```rust
//! use retweak_core::{TypeRegistry, Value, parse, serialize, split_line};
//!
//! let types = TypeRegistry::new();
//! let tag = types.resolve("TW_TYPE_FLOAT").unwrap();
//!
//! assert_eq!(serialize(&Value::F32(2.5), tag, &types), "TW_TYPE_FLOAT 2.5");
//!
//! let line = split_line("speed: TW_TYPE_FLOAT 2.5").unwrap().unwrap();
//! let tag = types.resolve(line.type_name).unwrap();
//! assert_eq!(parse(tag, line.value, &types), Ok(Value::F32(2.5)));
//! ```

pub mod codec;
pub mod enums;
mod error;
pub mod format;
pub mod types;
pub mod value;

pub use codec::{ENUM_VALUE_NOT_DEFINED, TYPE_NOT_SUPPORTED, format_fields, parse, serialize};
pub use enums::{EnumDef, EnumValue, TypeRegistry};
pub use error::{CodecError, LineError};
pub use format::{
    COMMENT_MARKER, RawLine, decode_line, format_line, is_skippable, is_valid_name, split_line,
};
pub use types::{BUILTIN_TYPES, BuiltinType, EnumId, Layout, TypeTag};
pub use value::{MAX_VALUE_SIZE, Value};
