//! Represents an account: the top-level namespace owning containers.

use super::{
    container::Container,
    metadata::Metadata,
    ordered::ordered_by_name,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Account {
    pub name: String,

    /// Opaque credential checked by the auth endpoint.
    pub password: String,

    pub containers: HashMap<String, Container>,

    pub metadata: Metadata,
}

impl Account {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            containers: HashMap::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.get(name)
    }

    pub fn container_mut(&mut self, name: &str) -> Option<&mut Container> {
        self.containers.get_mut(name)
    }

    /// Return the named container, creating it if needed. The flag is true
    /// when the container was created by this call.
    pub fn create_container(&mut self, name: &str) -> (&mut Container, bool) {
        let created = !self.containers.contains_key(name);
        let container = self
            .containers
            .entry(name.to_string())
            .or_insert_with(|| Container::new(name));
        (container, created)
    }

    pub fn delete_container(&mut self, name: &str) -> Option<Container> {
        self.containers.remove(name)
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn object_count(&self) -> usize {
        self.containers.values().map(Container::object_count).sum()
    }

    pub fn bytes_used(&self) -> u64 {
        self.containers.values().map(Container::bytes_used).sum()
    }

    /// Containers sorted by name.
    pub fn ordered_containers(&self) -> Vec<&Container> {
        ordered_by_name(self.containers.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::object::Object;
    use bytes::Bytes;

    #[test]
    fn containers_are_listed_in_name_order() {
        let mut account = Account::new("test", "secret");
        for name in ["b", "a", "c"] {
            account.create_container(name);
        }
        let names: Vec<_> = account
            .ordered_containers()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn create_container_reports_whether_it_was_new() {
        let mut account = Account::new("test", "secret");
        assert!(account.create_container("c").1);
        assert!(!account.create_container("c").1);
        assert_eq!(account.container_count(), 1);
        assert!(account.delete_container("c").is_some());
        assert!(account.container("c").is_none());
    }

    #[test]
    fn aggregates_usage_over_containers() {
        let mut account = Account::new("test", "secret");
        account
            .create_container("one")
            .0
            .put_object(Object::new("x", Bytes::from_static(b"ab")));
        account
            .create_container("two")
            .0
            .put_object(Object::new("y", Bytes::from_static(b"cde")));
        assert_eq!(account.object_count(), 2);
        assert_eq!(account.bytes_used(), 5);
    }
}
