//! Error types for type definition and value parsing.

use thiserror::Error;

/// Errors produced by the codec and the type registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Enum defined without a display name
    #[error("enum type name must not be empty")]
    EmptyEnumName,

    /// Enum display name is not a single token
    #[error("enum type name must not contain whitespace: '{0}'")]
    InvalidEnumName(String),

    /// Enum display name collides with an existing type
    #[error("type name already in use: {0}")]
    TypeNameTaken(String),

    /// Two enum values share a code
    #[error("enum '{enum_name}' defines code {code} more than once")]
    DuplicateEnumCode {
        /// Display name of the enum.
        enum_name: String,
        /// Repeated code.
        code: i32,
    },

    /// Two enum values share a label
    #[error("enum '{enum_name}' defines label '{label}' more than once")]
    DuplicateEnumLabel {
        /// Display name of the enum.
        enum_name: String,
        /// Repeated label.
        label: String,
    },

    /// Enum label contains characters the line format cannot carry
    #[error("enum '{enum_name}' has invalid label '{label}'")]
    InvalidEnumLabel {
        /// Display name of the enum.
        enum_name: String,
        /// Offending label.
        label: String,
    },

    /// Value text does not match the type's grammar
    #[error("bad value for {type_name}: '{text}' ({reason})")]
    MalformedValue {
        /// Name of the type being parsed.
        type_name: String,
        /// Raw value text.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Label not registered for the enum
    #[error("enum '{enum_name}' has no value labelled '{label}'")]
    UnknownEnumLabel {
        /// Display name of the enum.
        enum_name: String,
        /// Label that was looked up.
        label: String,
    },

    /// Type has no codec
    #[error("type not supported: {0}")]
    UnsupportedType(String),

    /// Enum handle not issued by this registry
    #[error("unknown enum type {0}")]
    UnknownEnum(crate::EnumId),
}

/// Structural problems with a persisted line, before any type is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    /// No `:` separating the name from the type
    #[error("missing ':' after variable name")]
    MissingColon,

    /// Nothing before the `:`
    #[error("missing variable name")]
    MissingName,

    /// Nothing after the `:`
    #[error("missing type name")]
    MissingType,
}

impl CodecError {
    /// Create a malformed value error.
    pub fn malformed(
        type_name: impl Into<String>,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CodecError::MalformedValue {
            type_name: type_name.into(),
            text: text.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_factory_produces_correct_variant() {
        let err = CodecError::malformed("TW_TYPE_FLOAT", "abc", "not a number");
        assert!(matches!(
            err,
            CodecError::MalformedValue { ref type_name, .. } if type_name == "TW_TYPE_FLOAT"
        ));
    }

    #[test]
    fn malformed_display() {
        let err = CodecError::malformed("TW_TYPE_COLOR3F", "1 2", "expected 3 fields, found 2");
        assert_eq!(
            err.to_string(),
            "bad value for TW_TYPE_COLOR3F: '1 2' (expected 3 fields, found 2)"
        );
    }

    #[test]
    fn duplicate_code_display() {
        let err = CodecError::DuplicateEnumCode {
            enum_name: "Shading".to_string(),
            code: 2,
        };
        assert_eq!(err.to_string(), "enum 'Shading' defines code 2 more than once");
    }

    #[test]
    fn line_error_display() {
        assert_eq!(LineError::MissingColon.to_string(), "missing ':' after variable name");
        assert_eq!(LineError::MissingType.to_string(), "missing type name");
    }

    #[test]
    fn unknown_label_display() {
        let err = CodecError::UnknownEnumLabel {
            enum_name: "Shading".to_string(),
            label: "Phong".to_string(),
        };
        assert_eq!(err.to_string(), "enum 'Shading' has no value labelled 'Phong'");
    }
}
