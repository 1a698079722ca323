//! Type tags naming the shape of a bar variable.
//!
//! Every registered variable carries a [`TypeTag`]. Built-in tags cover the
//! toolkit's fixed primitive and vector layouts; enum tags point into a
//! [`TypeRegistry`](crate::TypeRegistry) owned by the application.
//!
//! # Built-in Names
//!
//! Built-in types are persisted by their toolkit name (`TW_TYPE_FLOAT`,
//! `TW_TYPE_COLOR3F`, ...). The full name table is resolvable, but only a
//! subset has a codec; see [`BuiltinType::is_persistable`].

use core::fmt;

/// Built-in variable types known to the toolkit.
///
/// Variants map one-to-one onto the toolkit's type names, returned by
/// [`name`](Self::name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// Undefined type.
    Undef,
    /// Native `bool`.
    BoolCpp,
    /// Boolean stored in 8 bits.
    Bool8,
    /// Boolean stored in 16 bits.
    Bool16,
    /// Boolean stored in 32 bits.
    Bool32,
    /// Single character.
    Char,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Packed 32-bit color.
    Color32,
    /// RGB color, three `f32` components.
    Color3f,
    /// RGBA color, four `f32` components.
    Color4f,
    /// C string with toolkit-managed storage.
    CdString,
    /// Owned string.
    StdString,
    /// Rotation quaternion, four `f32` components.
    Quat4f,
    /// Rotation quaternion, four `f64` components.
    Quat4d,
    /// Direction vector, three `f32` components.
    Dir3f,
    /// Direction vector, three `f64` components.
    Dir3d,
}

/// Value layout shared by one or more built-in types.
///
/// The codec and [`Value`](crate::Value) shape checks work on layouts rather
/// than on individual types: `TW_TYPE_COLOR3F` and `TW_TYPE_DIR3F` are both
/// [`Layout::Vec3f`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Boolean, persisted as `0` or `1`.
    Bool,
    /// `i8`.
    I8,
    /// `u8`.
    U8,
    /// `i16`.
    I16,
    /// `u16`.
    U16,
    /// `i32`.
    I32,
    /// `u32`.
    U32,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// Three `f32` components.
    Vec3f,
    /// Four `f32` components.
    Vec4f,
    /// Three `f64` components.
    Vec3d,
    /// Four `f64` components.
    Vec4d,
    /// Free text, rest of line.
    Text,
    /// Enum code, persisted as its label.
    Enum,
}

impl Layout {
    /// Number of whitespace-separated fields in the persisted form.
    ///
    /// Text and enum layouts take the rest of the line and report `1`.
    pub const fn arity(self) -> usize {
        match self {
            Layout::Vec3f | Layout::Vec3d => 3,
            Layout::Vec4f | Layout::Vec4d => 4,
            _ => 1,
        }
    }
}

/// Every built-in type, in toolkit declaration order.
pub const BUILTIN_TYPES: [BuiltinType; 23] = [
    BuiltinType::Undef,
    BuiltinType::BoolCpp,
    BuiltinType::Bool8,
    BuiltinType::Bool16,
    BuiltinType::Bool32,
    BuiltinType::Char,
    BuiltinType::Int8,
    BuiltinType::Uint8,
    BuiltinType::Int16,
    BuiltinType::Uint16,
    BuiltinType::Int32,
    BuiltinType::Uint32,
    BuiltinType::Float,
    BuiltinType::Double,
    BuiltinType::Color32,
    BuiltinType::Color3f,
    BuiltinType::Color4f,
    BuiltinType::CdString,
    BuiltinType::StdString,
    BuiltinType::Quat4f,
    BuiltinType::Quat4d,
    BuiltinType::Dir3f,
    BuiltinType::Dir3d,
];

impl BuiltinType {
    /// Toolkit name used in persisted files.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Undef => "TW_TYPE_UNDEF",
            BuiltinType::BoolCpp => "TW_TYPE_BOOLCPP",
            BuiltinType::Bool8 => "TW_TYPE_BOOL8",
            BuiltinType::Bool16 => "TW_TYPE_BOOL16",
            BuiltinType::Bool32 => "TW_TYPE_BOOL32",
            BuiltinType::Char => "TW_TYPE_CHAR",
            BuiltinType::Int8 => "TW_TYPE_INT8",
            BuiltinType::Uint8 => "TW_TYPE_UINT8",
            BuiltinType::Int16 => "TW_TYPE_INT16",
            BuiltinType::Uint16 => "TW_TYPE_UINT16",
            BuiltinType::Int32 => "TW_TYPE_INT32",
            BuiltinType::Uint32 => "TW_TYPE_UINT32",
            BuiltinType::Float => "TW_TYPE_FLOAT",
            BuiltinType::Double => "TW_TYPE_DOUBLE",
            BuiltinType::Color32 => "TW_TYPE_COLOR32",
            BuiltinType::Color3f => "TW_TYPE_COLOR3F",
            BuiltinType::Color4f => "TW_TYPE_COLOR4F",
            BuiltinType::CdString => "TW_TYPE_CDSTRING",
            BuiltinType::StdString => "TW_TYPE_STDSTRING",
            BuiltinType::Quat4f => "TW_TYPE_QUAT4F",
            BuiltinType::Quat4d => "TW_TYPE_QUAT4D",
            BuiltinType::Dir3f => "TW_TYPE_DIR3F",
            BuiltinType::Dir3d => "TW_TYPE_DIR3D",
        }
    }

    /// Look up a built-in type by its toolkit name (exact, case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_TYPES.iter().copied().find(|ty| ty.name() == name)
    }

    /// Value layout, or `None` for types without a codec.
    pub const fn layout(self) -> Option<Layout> {
        match self {
            BuiltinType::BoolCpp
            | BuiltinType::Bool8
            | BuiltinType::Bool16
            | BuiltinType::Bool32 => Some(Layout::Bool),
            BuiltinType::Int8 => Some(Layout::I8),
            BuiltinType::Uint8 => Some(Layout::U8),
            BuiltinType::Int16 => Some(Layout::I16),
            BuiltinType::Uint16 => Some(Layout::U16),
            BuiltinType::Int32 => Some(Layout::I32),
            BuiltinType::Uint32 => Some(Layout::U32),
            BuiltinType::Float => Some(Layout::F32),
            BuiltinType::Double => Some(Layout::F64),
            BuiltinType::Color3f | BuiltinType::Dir3f => Some(Layout::Vec3f),
            BuiltinType::Color4f | BuiltinType::Quat4f => Some(Layout::Vec4f),
            BuiltinType::Dir3d => Some(Layout::Vec3d),
            BuiltinType::Quat4d => Some(Layout::Vec4d),
            BuiltinType::StdString => Some(Layout::Text),
            BuiltinType::Undef
            | BuiltinType::Char
            | BuiltinType::Color32
            | BuiltinType::CdString => None,
        }
    }

    /// Whether values of this type can be saved and loaded.
    pub const fn is_persistable(self) -> bool {
        self.layout().is_some()
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to an enum type defined in a [`TypeRegistry`](crate::TypeRegistry).
///
/// Only meaningful for the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(pub(crate) u32);

impl EnumId {
    /// Position of the enum in its registry, in definition order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum#{}", self.0)
    }
}

/// Opaque identifier naming a value's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// One of the toolkit's fixed types.
    Builtin(BuiltinType),
    /// A user-defined enumeration.
    Enum(EnumId),
}

impl TypeTag {
    /// Value layout, or `None` for built-in types without a codec.
    pub const fn layout(self) -> Option<Layout> {
        match self {
            TypeTag::Builtin(ty) => ty.layout(),
            TypeTag::Enum(_) => Some(Layout::Enum),
        }
    }
}

impl From<BuiltinType> for TypeTag {
    fn from(ty: BuiltinType) -> Self {
        TypeTag::Builtin(ty)
    }
}

impl From<EnumId> for TypeTag {
    fn from(id: EnumId) -> Self {
        TypeTag::Enum(id)
    }
}
