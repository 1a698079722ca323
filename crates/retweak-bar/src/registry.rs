//! Ordered record of the variables a bar will persist.
//!
//! Direct entries and callback entries are kept in two lists, each in
//! registration order; iteration yields all direct entries first. Names are
//! unique, so lookup goes through a name index.

use std::collections::HashMap;

use retweak_core::TypeTag;

use crate::binding::Binding;

/// A persisted variable.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    tag: TypeTag,
    binding: Binding,
}

impl Entry {
    /// Create an entry.
    pub fn new(name: impl Into<String>, tag: TypeTag, binding: Binding) -> Self {
        Self {
            name: name.into(),
            tag,
            binding,
        }
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered type.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Storage.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Direct(usize),
    Callback(usize),
}

/// Persisted variables of one bar.
#[derive(Debug, Default)]
pub struct Registry {
    direct: Vec<Entry>,
    callback: Vec<Entry>,
    index: HashMap<String, Slot>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// Returns the entry back if its name is already recorded.
    pub fn insert(&mut self, entry: Entry) -> Result<(), Entry> {
        if self.index.contains_key(&entry.name) {
            return Err(entry);
        }
        let slot = if entry.binding.is_direct() {
            self.direct.push(entry);
            Slot::Direct(self.direct.len() - 1)
        } else {
            self.callback.push(entry);
            Slot::Callback(self.callback.len() - 1)
        };
        let name = self.entry_at(slot).name.clone();
        self.index.insert(name, slot);
        Ok(())
    }

    /// Entry with this exact name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&slot| self.entry_at(slot))
    }

    /// Whether an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All entries: direct ones in registration order, then callback ones.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.direct.iter().chain(self.callback.iter())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.direct.len() + self.callback.len()
    }

    /// Whether no entries are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_at(&self, slot: Slot) -> &Entry {
        match slot {
            Slot::Direct(i) => &self.direct[i],
            Slot::Callback(i) => &self.callback[i],
        }
    }
}
