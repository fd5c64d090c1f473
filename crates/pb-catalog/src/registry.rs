//! Ordered component registry.
//!
//! Components are stored in a flat `Vec` with a `HashMap` id index on the
//! side, so listings iterate in load order while lookups stay O(1). The
//! registry is filled single-threaded during the read phase and only read
//! afterwards.

use std::collections::HashMap;

use crate::component::Component;

/// Ordered collection of loaded components with id lookup.
///
/// Duplicate ids overwrite in place: the later definition replaces the
/// earlier one but keeps its position. That is what lets user components
/// shadow the built-in layout components.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component, replacing any existing one with the same id.
    pub fn set(&mut self, component: Component) {
        if let Some(&i) = self.index.get(&component.id) {
            self.components[i] = component;
        } else {
            self.index
                .insert(component.id.clone(), self.components.len());
            self.components.push(component);
        }
    }

    /// Look up a component by id.
    ///
    /// A miss is worth surfacing (it usually means a typo in a page
    /// declaration) but is never an error; the warning is logged here so
    /// every caller gets it.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Component> {
        let found = self.index.get(id).map(|&i| &self.components[i]);
        if found.is_none() {
            tracing::warn!(id, "component not found in registry");
        }
        found
    }

    /// Whether a component with this id is registered. Never logs.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All components in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Component] {
        &self.components
    }

    /// Look up several ids, keeping order and misses.
    ///
    /// Each miss yields `None` in place (and a warning via [`find`]);
    /// callers decide whether to drop or report the holes.
    ///
    /// [`find`]: Self::find
    #[must_use]
    pub fn select(&self, ids: &[String]) -> Vec<Option<&Component>> {
        ids.iter().map(|id| self.find(id)).collect()
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
