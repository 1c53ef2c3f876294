use http::Method;
use indexmap::{IndexMap, IndexSet};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Opaque identity of a router resource, typically its path or route name.
///
/// Routers attach it to each request (see [`CorsService`](crate::CorsService))
/// and the engine maps it to the resource's policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Arc<str>);

impl ResourceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the engine needs to know about a host router.
///
/// Routes attached after the engine is built are reported through
/// [`Cors::methods_added`](crate::Cors::methods_added).
pub trait RouterAdapter {
    /// Every resource the router serves, with the methods routed to it.
    fn enumerate_resources(&self) -> Vec<(ResourceId, Vec<Method>)>;
}

impl<A: RouterAdapter + ?Sized> RouterAdapter for &A {
    fn enumerate_resources(&self) -> Vec<(ResourceId, Vec<Method>)> {
        (**self).enumerate_resources()
    }
}

/// In-memory route table, for routers that only know their routes as data.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: IndexMap<ResourceId, IndexSet<Method>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, resource: impl Into<ResourceId>, method: Method) -> Self {
        self.add_route(resource, method);
        self
    }

    pub fn add_route(&mut self, resource: impl Into<ResourceId>, method: Method) {
        self.routes.entry(resource.into()).or_default().insert(method);
    }

    pub fn methods(&self, resource: &str) -> Option<&IndexSet<Method>> {
        self.routes.get(resource)
    }
}

impl RouterAdapter for RouteTable {
    fn enumerate_resources(&self) -> Vec<(ResourceId, Vec<Method>)> {
        self.routes
            .iter()
            .map(|(id, methods)| (id.clone(), methods.iter().cloned().collect()))
            .collect()
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;
