//! Value ↔ text conversion keyed by type tag.
//!
//! [`serialize`] turns a value into `TYPE_NAME field...` and never fails:
//! problems become sentinel markers so a best-effort save always produces a
//! line. [`parse`] is the strict inverse for the value part.
//!
//! # Grammar
//!
//! | Layout | Fields |
//! |--------|--------|
//! | bool, integers, floats | one number (`0`/`1` for booleans) |
//! | `Vec3f` / `Vec3d` | three numbers |
//! | `Vec4f` / `Vec4d` | four numbers |
//! | enum | one registered label, may contain spaces |
//! | text | rest of line, with `\\`, `\n`, `\r`, `\t` escapes; `\s` for an edge space, `\u{..}` for other edge whitespace |
//!
//! Floats use Rust's shortest round-trip formatting, so a parsed value is
//! bit-identical to the serialized one.

use core::fmt::Display;
use core::str::FromStr;

use crate::enums::TypeRegistry;
use crate::error::CodecError;
use crate::types::{Layout, TypeTag};
use crate::value::Value;

/// Written instead of a value when the type has no codec.
pub const TYPE_NOT_SUPPORTED: &str = "ERROR_TYPE_NOT_SUPPORTED";

/// Written instead of a label when an enum code has no registered label.
pub const ENUM_VALUE_NOT_DEFINED: &str = "ERROR_ENUM_VALUE_NOT_DEFINED";

/// Serialize a value as `TYPE_NAME field...`.
///
/// Returns [`TYPE_NOT_SUPPORTED`] when the tag is unknown to `types`, has
/// no codec, or does not fit the value. An enum code without a label is
/// written as `NAME ERROR_ENUM_VALUE_NOT_DEFINED`.
///
/// # Example
///
/// ```rust
/// use retweak_core::{BuiltinType, TypeRegistry, Value, serialize};
///
/// let types = TypeRegistry::new();
/// let text = serialize(&Value::Vec3f([1.0, 0.0, 0.5]), BuiltinType::Color3f.into(), &types);
/// assert_eq!(text, "TW_TYPE_COLOR3F 1 0 0.5");
/// ```
pub fn serialize(value: &Value, tag: TypeTag, types: &TypeRegistry) -> String {
    let Some(type_name) = types.type_name(tag) else {
        return TYPE_NOT_SUPPORTED.to_string();
    };
    if !value.fits(tag) {
        return TYPE_NOT_SUPPORTED.to_string();
    }

    let fields = match (tag, value) {
        (TypeTag::Enum(id), Value::Enum(code)) => types
            .enum_def(id)
            .and_then(|def| def.label_of(*code))
            .unwrap_or(ENUM_VALUE_NOT_DEFINED)
            .to_string(),
        _ => format_fields(value),
    };

    if fields.is_empty() {
        type_name.to_string()
    } else {
        format!("{type_name} {fields}")
    }
}

/// Format the field part of a built-in value.
///
/// Enum codes are written as plain integers; use [`serialize`] to get the
/// label instead.
pub fn format_fields(value: &Value) -> String {
    match value {
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::I8(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::Vec3f(v) => join(v),
        Value::Vec4f(v) => join(v),
        Value::Vec3d(v) => join(v),
        Value::Vec4d(v) => join(v),
        Value::Text(s) => escape_text(s),
        Value::Enum(code) => code.to_string(),
    }
}

/// Parse the value part of a persisted line.
///
/// `text` is everything after the type name. Numeric layouts require the
/// exact field count; extra fields are an error.
pub fn parse(tag: TypeTag, text: &str, types: &TypeRegistry) -> Result<Value, CodecError> {
    let type_name = match tag {
        TypeTag::Builtin(ty) => ty.name(),
        TypeTag::Enum(id) => types
            .type_name(tag)
            .ok_or(CodecError::UnknownEnum(id))?,
    };
    let layout = tag
        .layout()
        .ok_or_else(|| CodecError::UnsupportedType(type_name.to_string()))?;

    let value = match layout {
        Layout::Bool => {
            let [v] = fields::<i64, 1>(type_name, text)?;
            Value::Bool(v != 0)
        }
        Layout::I8 => Value::I8(fields::<i8, 1>(type_name, text)?[0]),
        Layout::U8 => Value::U8(fields::<u8, 1>(type_name, text)?[0]),
        Layout::I16 => Value::I16(fields::<i16, 1>(type_name, text)?[0]),
        Layout::U16 => Value::U16(fields::<u16, 1>(type_name, text)?[0]),
        Layout::I32 => Value::I32(fields::<i32, 1>(type_name, text)?[0]),
        Layout::U32 => Value::U32(fields::<u32, 1>(type_name, text)?[0]),
        Layout::F32 => Value::F32(fields::<f32, 1>(type_name, text)?[0]),
        Layout::F64 => Value::F64(fields::<f64, 1>(type_name, text)?[0]),
        Layout::Vec3f => Value::Vec3f(fields(type_name, text)?),
        Layout::Vec4f => Value::Vec4f(fields(type_name, text)?),
        Layout::Vec3d => Value::Vec3d(fields(type_name, text)?),
        Layout::Vec4d => Value::Vec4d(fields(type_name, text)?),
        Layout::Text => Value::Text(unescape_text(text)),
        Layout::Enum => {
            let TypeTag::Enum(id) = tag else {
                return Err(CodecError::UnsupportedType(type_name.to_string()));
            };
            let def = types.enum_def(id).ok_or(CodecError::UnknownEnum(id))?;
            let label = text.trim();
            let code = def
                .code_of(label)
                .ok_or_else(|| CodecError::UnknownEnumLabel {
                    enum_name: def.name.clone(),
                    label: label.to_string(),
                })?;
            Value::Enum(code)
        }
    };
    Ok(value)
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn fields<T, const N: usize>(type_name: &str, text: &str) -> Result<[T; N], CodecError>
where
    T: FromStr + Copy + Default,
    T::Err: Display,
{
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != N {
        let reason = if N == 1 {
            format!("expected 1 field, found {}", parts.len())
        } else {
            format!("expected {N} fields, found {}", parts.len())
        };
        return Err(CodecError::malformed(type_name, text, reason));
    }

    let mut out = [T::default(); N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e: T::Err| CodecError::malformed(type_name, text, format!("'{part}': {e}")))?;
    }
    Ok(out)
}

/// Escape text so it fits on one line and survives trimming.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let last = s.chars().count().saturating_sub(1);
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // leading/trailing whitespace would be eaten by the line parser
            ' ' if i == 0 || i == last => out.push_str("\\s"),
            c if (i == 0 || i == last) && c.is_whitespace() => {
                out.push_str(&format!("\\u{{{:x}}}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.trim().chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some('u') => {
                let rest = chars.as_str();
                match unicode_escape(rest) {
                    Some((c, used)) => {
                        out.push(c);
                        chars = rest[used..].chars();
                    }
                    None => out.push_str("\\u"),
                }
            }
            // unknown escapes are kept verbatim
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Decode the `{hex}` part of a `\u{hex}` escape, returning the character
/// and the number of bytes consumed.
fn unicode_escape(rest: &str) -> Option<(char, usize)> {
    let inner = rest.strip_prefix('{')?;
    let end = inner.find('}')?;
    let code = u32::from_str_radix(&inner[..end], 16).ok()?;
    Some((char::from_u32(code)?, end + 2))
}
