//! Custom enum types and the type-name lookup table.
//!
//! Applications define enums once and pass the [`TypeRegistry`] to every
//! codec operation. Nothing here is global: two registries can define the
//! same enum name independently.
//!
//! # Example
//!
//! ```rust
//! use retweak_core::{BuiltinType, EnumDef, TypeRegistry, TypeTag};
//!
//! let mut types = TypeRegistry::new();
//! let shading = types
//!     .define_enum(
//!         EnumDef::new("Shading")
//!             .with_value(0, "Flat")
//!             .with_value(1, "Smooth"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(types.resolve("Shading"), Some(TypeTag::Enum(shading)));
//! assert_eq!(
//!     types.resolve("TW_TYPE_FLOAT"),
//!     Some(TypeTag::Builtin(BuiltinType::Float))
//! );
//! assert_eq!(types.resolve("Phong"), None);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::types::{BUILTIN_TYPES, BuiltinType, EnumId, TypeTag};

/// One labelled value of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    /// Integer code stored in the variable.
    pub code: i32,
    /// Label shown by the toolkit and written to files.
    pub label: String,
}

/// A user-defined enumeration.
///
/// Codes and labels must each be unique; [`TypeRegistry::define_enum`]
/// enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDef {
    /// Display name, also the persisted type name.
    pub name: String,
    /// Values in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    /// Create an enum with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value.
    pub fn with_value(mut self, code: i32, label: impl Into<String>) -> Self {
        self.values.push(EnumValue {
            code,
            label: label.into(),
        });
        self
    }

    /// Label registered for `code`.
    pub fn label_of(&self, code: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.code == code)
            .map(|v| v.label.as_str())
    }

    /// Code registered for `label` (exact match).
    pub fn code_of(&self, label: &str) -> Option<i32> {
        self.values.iter().find(|v| v.label == label).map(|v| v.code)
    }

    /// Check name, code and label uniqueness.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.name.trim().is_empty() {
            return Err(CodecError::EmptyEnumName);
        }
        // the type name is read back as a single whitespace-delimited token
        if self.name.contains(char::is_whitespace) {
            return Err(CodecError::InvalidEnumName(self.name.clone()));
        }
        for (i, value) in self.values.iter().enumerate() {
            if value.label.is_empty()
                || value.label != value.label.trim()
                || value.label.contains(['\n', '\r'])
            {
                return Err(CodecError::InvalidEnumLabel {
                    enum_name: self.name.clone(),
                    label: value.label.clone(),
                });
            }
            for other in &self.values[i + 1..] {
                if other.code == value.code {
                    return Err(CodecError::DuplicateEnumCode {
                        enum_name: self.name.clone(),
                        code: value.code,
                    });
                }
                if other.label == value.label {
                    return Err(CodecError::DuplicateEnumLabel {
                        enum_name: self.name.clone(),
                        label: value.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Name ↔ type-tag table: built-in types plus defined enums.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enums: Vec<EnumDef>,
}

impl TypeRegistry {
    /// Create a registry holding only the built-in types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new enum type.
    ///
    /// Fails if the definition is invalid or its name is already taken by a
    /// built-in type or another enum.
    pub fn define_enum(&mut self, def: EnumDef) -> Result<EnumId, CodecError> {
        def.validate()?;
        if self.resolve(&def.name).is_some() {
            return Err(CodecError::TypeNameTaken(def.name));
        }
        let id = self.next_enum_id();
        #[cfg(feature = "tracing")]
        tracing::debug!(name = %def.name, values = def.values.len(), "define_enum: {id}");
        self.enums.push(def);
        Ok(id)
    }

    /// Resolve a persisted type name.
    ///
    /// Built-in names are checked first, then enum display names.
    pub fn resolve(&self, name: &str) -> Option<TypeTag> {
        if let Some(ty) = BuiltinType::from_name(name) {
            return Some(TypeTag::Builtin(ty));
        }
        self.find_enum(name).map(TypeTag::Enum)
    }

    /// Persisted name of a type tag.
    pub fn type_name(&self, tag: TypeTag) -> Option<&str> {
        match tag {
            TypeTag::Builtin(ty) => Some(ty.name()),
            TypeTag::Enum(id) => self.enum_def(id).map(|def| def.name.as_str()),
        }
    }

    /// Find an enum by display name.
    pub fn find_enum(&self, name: &str) -> Option<EnumId> {
        self.enums
            .iter()
            .position(|def| def.name == name)
            .map(|i| EnumId(i as u32))
    }

    /// Definition behind an enum handle.
    pub fn enum_def(&self, id: EnumId) -> Option<&EnumDef> {
        self.enums.get(id.index())
    }

    /// Iterate over defined enums in definition order.
    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &EnumDef)> {
        self.enums
            .iter()
            .enumerate()
            .map(|(i, def)| (EnumId(i as u32), def))
    }

    /// Handle the next successful [`define_enum`](Self::define_enum) will return.
    pub fn next_enum_id(&self) -> EnumId {
        EnumId(self.enums.len() as u32)
    }

    /// Number of defined enums.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Every resolvable type name: built-ins first, then enums.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        BUILTIN_TYPES
            .iter()
            .map(|ty| ty.name())
            .chain(self.enums.iter().map(|def| def.name.as_str()))
    }
}
