//! Resolves a request path against the store into a typed resource handle.
//!
//! Missing containers and objects are not errors at this layer: the handle
//! records whether the entity exists and each verb decides whether absence
//! is fatal. The one exception is an object addressed inside a container that
//! does not exist.

use super::{path_parser::parse_path, storage_service::Storage};
use crate::{
    errors::SwiftError,
    models::{account::Account, container::Container, object::Object},
};
use std::collections::hash_map::Entry;
use tracing::debug;

/// The target of one request. Borrows the locked storage; never owns it.
#[derive(Debug)]
pub enum Resource<'a> {
    Root(RootResource<'a>),
    Container(ContainerResource<'a>),
    Object(ObjectResource<'a>),
}

/// Account-level target (`/v1/AUTH_<account>`).
#[derive(Debug)]
pub struct RootResource<'a> {
    pub account: &'a mut Account,
}

/// A container that may or may not exist yet.
#[derive(Debug)]
pub struct ContainerResource<'a> {
    pub name: String,
    entry: Entry<'a, String, Container>,
}

impl<'a> ContainerResource<'a> {
    pub fn exists(&self) -> bool {
        matches!(self.entry, Entry::Occupied(_))
    }

    pub fn container(&self) -> Option<&Container> {
        match &self.entry {
            Entry::Occupied(e) => Some(e.get()),
            Entry::Vacant(_) => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.entry {
            Entry::Occupied(e) => Some(e.get_mut()),
            Entry::Vacant(_) => None,
        }
    }

    /// Return the container, creating it when absent. The flag is true when
    /// this call created it.
    pub fn get_or_create(self) -> (&'a mut Container, bool) {
        match self.entry {
            Entry::Occupied(e) => (e.into_mut(), false),
            Entry::Vacant(e) => {
                let container = Container::new(e.key().as_str());
                (e.insert(container), true)
            }
        }
    }

    pub fn remove(self) -> Option<Container> {
        match self.entry {
            Entry::Occupied(e) => Some(e.remove()),
            Entry::Vacant(_) => None,
        }
    }
}

/// An object inside an existing container; the object itself may be absent.
#[derive(Debug)]
pub struct ObjectResource<'a> {
    pub container_name: String,
    pub name: String,
    /// Requested `versionId`, if any.
    pub version: Option<String>,
    entry: Entry<'a, String, Object>,
}

impl<'a> ObjectResource<'a> {
    pub fn exists(&self) -> bool {
        matches!(self.entry, Entry::Occupied(_))
    }

    pub fn object(&self) -> Option<&Object> {
        match &self.entry {
            Entry::Occupied(e) => Some(e.get()),
            Entry::Vacant(_) => None,
        }
    }

    pub fn object_mut(&mut self) -> Option<&mut Object> {
        match &mut self.entry {
            Entry::Occupied(e) => Some(e.get_mut()),
            Entry::Vacant(_) => None,
        }
    }

    /// Store `object` under this name, replacing any previous one.
    pub fn put(self, object: Object) -> &'a mut Object {
        match self.entry {
            Entry::Occupied(mut e) => {
                e.insert(object);
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(object),
        }
    }

    pub fn remove(self) -> Option<Object> {
        match self.entry {
            Entry::Occupied(e) => Some(e.remove()),
            Entry::Vacant(_) => None,
        }
    }
}

impl Storage {
    /// Map a request path (and optional `versionId`) to a resource.
    ///
    /// Fails with `InvalidURI` for malformed paths, `NoSuchAccount` for an
    /// unknown account and `NoSuchContainer` only when an object is addressed
    /// inside a missing container.
    pub fn resolve(
        &mut self,
        path: &str,
        version: Option<&str>,
    ) -> Result<Resource<'_>, SwiftError> {
        let parsed = parse_path(path).map_err(|err| {
            debug!("rejecting path {}: {}", path, err);
            SwiftError::invalid_uri(err.to_string())
        })?;

        let account = self
            .accounts
            .get_mut(&parsed.account)
            .ok_or_else(SwiftError::no_such_account)?;

        let Some(container_name) = parsed.container().map(str::to_string) else {
            return Ok(Resource::Root(RootResource { account }));
        };
        let object_name = parsed.object().map(str::to_string);

        let resource = ContainerResource {
            name: container_name.clone(),
            entry: account.containers.entry(container_name),
        };

        let Some(object_name) = object_name else {
            return Ok(Resource::Container(resource));
        };

        let container = match resource.entry {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(_) => return Err(SwiftError::no_such_container()),
        };

        Ok(Resource::Object(ObjectResource {
            container_name: resource.name,
            name: object_name.clone(),
            version: version.filter(|v| !v.is_empty()).map(str::to_string),
            entry: container.objects.entry(object_name),
        }))
    }
}
