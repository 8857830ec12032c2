//! Configuration data model

use std::collections::HashMap;

use keycombo::{ComboDefinition, ComboHandle, ComboRegistry};

/// Combos declared in a configuration file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ComboConfig {
    pub combos: Vec<ComboBinding>,
}

/// A named combo definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboBinding {
    pub name: String,
    pub definition: ComboDefinition,
}

impl ComboConfig {
    /// Look up a combo definition by name
    pub fn get(&self, name: &str) -> Option<&ComboDefinition> {
        self.combos
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| &binding.definition)
    }

    /// Register every combo with `registry`, in file order.
    pub fn register_all(&self, registry: &mut ComboRegistry) -> ComboBindings {
        let handles = self
            .combos
            .iter()
            .map(|binding| (binding.name.clone(), registry.register(binding.definition)))
            .collect();

        tracing::info!("Registered {} combo(s) from configuration", self.combos.len());

        ComboBindings { handles }
    }
}

/// Name -> handle lookup produced by [`ComboConfig::register_all`].
///
/// Handles belong to the registry they were registered with.
#[derive(Debug, Clone, Default)]
pub struct ComboBindings {
    handles: HashMap<String, ComboHandle>,
}

impl ComboBindings {
    pub fn get(&self, name: &str) -> Option<ComboHandle> {
        self.handles.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ComboHandle)> {
        self.handles
            .iter()
            .map(|(name, handle)| (name.as_str(), *handle))
    }
}
