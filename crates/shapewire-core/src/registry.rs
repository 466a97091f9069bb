//! Shape registry keyed by shape name.

use std::collections::HashMap;

use crate::descriptor::ShapeDescriptor;

/// Descriptors by shape name, built once and passed to whoever needs to
/// resolve a shape at runtime (e.g. from an XML root element name).
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<&'static str, &'static ShapeDescriptor>,
}

impl ShapeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`ShapeRegistry::register`].
    #[must_use]
    pub fn with(mut self, descriptor: &'static ShapeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Register a shape and every shape reachable from its fields.
    pub fn register(&mut self, descriptor: &'static ShapeDescriptor) {
        let mut pending = vec![descriptor];
        while let Some(shape) = pending.pop() {
            if self.shapes.contains_key(shape.name) {
                continue;
            }
            self.shapes.insert(shape.name, shape);
            pending.extend(shape.nested_shapes());
        }
    }

    /// Register a shape under an additional name, such as an XML root element
    /// that differs from the shape name.
    pub fn register_alias(&mut self, name: &'static str, descriptor: &'static ShapeDescriptor) {
        self.register(descriptor);
        self.shapes.insert(name, descriptor);
    }

    /// Look up a shape.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static ShapeDescriptor> {
        self.shapes.get(name).copied()
    }

    /// Whether a shape is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.shapes.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
