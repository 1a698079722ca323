//! Enum definitions stored as TOML.

use std::path::Path;

use retweak_core::{EnumDef, EnumId, TypeRegistry};
use serde::{Deserialize, Serialize};

use crate::bar::define_enum;
use crate::error::BarError;
use crate::toolkit::Toolkit;

/// A set of enum definitions.
///
/// # TOML Format
///
/// ```toml
/// [[enums]]
/// name = "Shading"
/// values = [
///     { code = 0, label = "Flat" },
///     { code = 1, label = "Smooth" },
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCatalog {
    /// Definitions, in registration order.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
}

impl EnumCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BarError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| BarError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, BarError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the catalog to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BarError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| BarError::write_file(path, e))
    }

    /// Serialize the catalog to a TOML string.
    pub fn to_toml(&self) -> Result<String, BarError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Record every definition in `types`, without a toolkit.
    ///
    /// Stops at the first rejected definition; earlier ones stay registered.
    pub fn register(&self, types: &mut TypeRegistry) -> Result<Vec<EnumId>, BarError> {
        self.enums
            .iter()
            .map(|def| Ok(types.define_enum(def.clone())?))
            .collect()
    }

    /// Define every enum with the toolkit and record it in `types`.
    pub fn define_all<T: Toolkit>(
        &self,
        toolkit: &mut T,
        types: &mut TypeRegistry,
    ) -> Result<Vec<EnumId>, BarError> {
        self.enums
            .iter()
            .map(|def| define_enum(toolkit, types, def.clone()))
            .collect()
    }
}
