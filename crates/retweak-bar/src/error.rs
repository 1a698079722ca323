//! Error types for bar operations.

use std::path::PathBuf;
use thiserror::Error;

use retweak_core::CodecError;

/// Errors reported by a toolkit backend.
///
/// Registration failures such as a duplicate name are owned by the toolkit;
/// [`TweakBar`](crate::TweakBar) passes them through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolkitError {
    /// A variable or button with this name already exists in the bar
    #[error("bar '{bar}' already has an item named '{name}'")]
    DuplicateName {
        /// Bar name.
        bar: String,
        /// Item name.
        name: String,
    },

    /// No item with this name exists in the bar
    #[error("bar '{bar}' has no item named '{name}'")]
    UnknownItem {
        /// Bar name.
        bar: String,
        /// Item name.
        name: String,
    },

    /// Parameter not set on the item
    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    /// Definition string could not be parsed
    #[error("invalid definition '{def}': {reason}")]
    InvalidDefinition {
        /// Raw definition string.
        def: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Variable cannot be edited through the bar
    #[error("'{0}' is read-only")]
    ReadOnly(String),

    /// Bar with this name already exists
    #[error("a bar named '{0}' already exists")]
    DuplicateBar(String),

    /// Enum type rejected by the toolkit
    #[error("enum type '{0}' already defined")]
    DuplicateEnum(String),
}

/// Errors that can occur during bar registration, save and load.
#[derive(Debug, Error)]
pub enum BarError {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Toolkit refused the call
    #[error("toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),

    /// Enum definition rejected
    #[error("type error: {0}")]
    Type(#[from] CodecError),

    /// Name already registered with this bar
    #[error("duplicate variable name: {0}")]
    DuplicateName(String),

    /// Name cannot be written to a bar file
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),

    /// Current value does not fit the declared type
    #[error("value of '{name}' does not fit type {type_name}")]
    ShapeMismatch {
        /// Variable name.
        name: String,
        /// Declared type.
        type_name: String,
    },
}

impl BarError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BarError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BarError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BarError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
