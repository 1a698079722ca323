//! Tagged variable values.
//!
//! A [`Value`] carries its own layout, so copying a parsed value into a
//! variable never depends on width assumptions. The largest variant is a
//! four-component `f64` vector; the size bound is checked at compile time,
//! which lets getters return a `Value` without a caller-provided buffer.

use crate::types::{Layout, TypeTag};

/// Current value of a bar variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean of any width.
    Bool(bool),
    /// Signed 8-bit integer.
    I8(i8),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
    /// Three `f32` components (colors, directions).
    Vec3f([f32; 3]),
    /// Four `f32` components (colors, quaternions).
    Vec4f([f32; 4]),
    /// Three `f64` components.
    Vec3d([f64; 3]),
    /// Four `f64` components.
    Vec4d([f64; 4]),
    /// Owned text.
    Text(String),
    /// Enum code.
    Enum(i32),
}

/// Upper bound on `size_of::<Value>()`.
pub const MAX_VALUE_SIZE: usize = 40;

const _: () = assert!(core::mem::size_of::<Value>() <= MAX_VALUE_SIZE);

impl Value {
    /// Layout of this value.
    pub const fn layout(&self) -> Layout {
        match self {
            Value::Bool(_) => Layout::Bool,
            Value::I8(_) => Layout::I8,
            Value::U8(_) => Layout::U8,
            Value::I16(_) => Layout::I16,
            Value::U16(_) => Layout::U16,
            Value::I32(_) => Layout::I32,
            Value::U32(_) => Layout::U32,
            Value::F32(_) => Layout::F32,
            Value::F64(_) => Layout::F64,
            Value::Vec3f(_) => Layout::Vec3f,
            Value::Vec4f(_) => Layout::Vec4f,
            Value::Vec3d(_) => Layout::Vec3d,
            Value::Vec4d(_) => Layout::Vec4d,
            Value::Text(_) => Layout::Text,
            Value::Enum(_) => Layout::Enum,
        }
    }

    /// Whether this value can be stored in a variable of type `tag`.
    ///
    /// Always `false` for tags without a codec.
    pub fn fits(&self, tag: TypeTag) -> bool {
        tag.layout() == Some(self.layout())
    }

    /// Zero value for a layout.
    pub fn zero(layout: Layout) -> Self {
        match layout {
            Layout::Bool => Value::Bool(false),
            Layout::I8 => Value::I8(0),
            Layout::U8 => Value::U8(0),
            Layout::I16 => Value::I16(0),
            Layout::U16 => Value::U16(0),
            Layout::I32 => Value::I32(0),
            Layout::U32 => Value::U32(0),
            Layout::F32 => Value::F32(0.0),
            Layout::F64 => Value::F64(0.0),
            Layout::Vec3f => Value::Vec3f([0.0; 3]),
            Layout::Vec4f => Value::Vec4f([0.0; 4]),
            Layout::Vec3d => Value::Vec3d([0.0; 3]),
            Layout::Vec4d => Value::Vec4d([0.0; 4]),
            Layout::Text => Value::Text(String::new()),
            Layout::Enum => Value::Enum(0),
        }
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the float, if this is a [`Value::F32`].
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the float, if this is a [`Value::F64`].
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::I32`].
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::I32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the components, if this is a [`Value::Vec3f`].
    pub fn as_vec3f(&self) -> Option<[f32; 3]> {
        match *self {
            Value::Vec3f(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the components, if this is a [`Value::Vec4f`].
    pub fn as_vec4f(&self) -> Option<[f32; 4]> {
        match *self {
            Value::Vec4f(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the enum code, if this is a [`Value::Enum`].
    pub fn as_enum(&self) -> Option<i32> {
        match *self {
            Value::Enum(code) => Some(code),
            _ => None,
        }
    }

    /// Returns the text, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<[f32; 3]> for Value {
    fn from(v: [f32; 3]) -> Self {
        Value::Vec3f(v)
    }
}

impl From<[f32; 4]> for Value {
    fn from(v: [f32; 4]) -> Self {
        Value::Vec4f(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
