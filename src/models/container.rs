//! Represents a container: a named collection of objects within an account.

use super::{
    metadata::Metadata,
    object::Object,
    ordered::{Named, ordered_by_name},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Container name, unique within the owning account.
    pub name: String,

    pub objects: HashMap<String, Object>,

    pub metadata: Metadata,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: HashMap::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Insert or overwrite an object, returning the replaced one if any.
    pub fn put_object(&mut self, object: Object) -> Option<Object> {
        self.objects.insert(object.name.clone(), object)
    }

    pub fn delete_object(&mut self, name: &str) -> Option<Object> {
        self.objects.remove(name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn bytes_used(&self) -> u64 {
        self.objects.values().map(Object::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects sorted by name.
    pub fn ordered_objects(&self) -> Vec<&Object> {
        ordered_by_name(self.objects.values())
    }
}

impl Named for Container {
    fn name(&self) -> &str {
        &self.name
    }
}
