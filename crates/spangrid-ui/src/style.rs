//! Caller-supplied style overrides.
//!
//! Styling is opaque to the engine: declarations are carried through to the
//! views in insertion order. The engine only writes the few properties it
//! owns, and those win over caller values.

use indexmap::IndexMap;

/// Ordered CSS-like declarations (`property -> value`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    declarations: IndexMap<String, String>,
}

impl StyleOverrides {
    /// Create an empty declaration block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a declaration.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    /// Add or replace a declaration in place.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    /// Value of a declaration.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Copy of these declarations with `owned` applied on top.
    pub fn merged_with<I, K, V>(&self, owned: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.clone();
        for (property, value) in owned {
            merged.insert(property, value);
        }
        merged
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Style overrides for the three styled parts of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStyles {
    /// Applied to the container wrapper.
    pub container: StyleOverrides,
    /// Applied to the drag preview overlay.
    pub overlay: StyleOverrides,
    /// Applied to the percentage chip.
    pub percentage: StyleOverrides,
}

impl GridStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container overrides.
    pub fn container(mut self, style: StyleOverrides) -> Self {
        self.container = style;
        self
    }

    /// Set the overlay overrides.
    pub fn overlay(mut self, style: StyleOverrides) -> Self {
        self.overlay = style;
        self
    }

    /// Set the percentage chip overrides.
    pub fn percentage(mut self, style: StyleOverrides) -> Self {
        self.percentage = style;
        self
    }
}
