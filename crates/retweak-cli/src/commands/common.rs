//! Helpers shared by commands.

use std::path::Path;

use anyhow::Context;
use retweak_bar::EnumCatalog;
use retweak_core::TypeRegistry;

/// Build a type registry, adding the enums of an optional catalog file.
pub fn load_types(enums: Option<&Path>) -> anyhow::Result<TypeRegistry> {
    let mut types = TypeRegistry::new();
    if let Some(path) = enums {
        let catalog = EnumCatalog::load(path)?;
        catalog
            .register(&mut types)
            .with_context(|| format!("invalid enum catalog {}", path.display()))?;
        tracing::debug!(enums = types.enum_count(), path = %path.display(), "loaded enum catalog");
    }
    Ok(types)
}
