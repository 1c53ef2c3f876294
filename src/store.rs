use crate::adapter::ResourceId;
use crate::policy::{DefaultPolicy, MatchedRule, OriginRules, ResourcePolicy};
use crate::result::{ConfigurationError, CorsError, PolicyScope};
use indexmap::IndexMap;
use std::sync::Arc;

/// Maps resource identifiers to their policies. Read-only once the engine is shared.
#[derive(Clone, Debug)]
pub struct PolicyStore {
    defaults: Arc<DefaultPolicy>,
    resources: IndexMap<ResourceId, ResourcePolicy>,
}

impl PolicyStore {
    pub(crate) fn new(defaults: DefaultPolicy) -> Self {
        Self {
            defaults: Arc::new(defaults),
            resources: IndexMap::new(),
        }
    }

    pub(crate) fn register(
        &mut self,
        id: ResourceId,
        rules: OriginRules,
        reflect_wildcards: bool,
    ) -> Result<&mut ResourcePolicy, ConfigurationError> {
        if self.resources.contains_key(&id) {
            return Err(ConfigurationError::DuplicateResource {
                resource: id.to_string(),
            });
        }

        let origins = rules.compile(&PolicyScope::Resource(id.to_string()), reflect_wildcards)?;
        let policy = ResourcePolicy::new(id.clone(), origins, Arc::clone(&self.defaults));
        let entry = self.resources.entry(id).or_insert(policy);
        Ok(entry)
    }

    /// Attaches rules that take precedence over the resource's own for `method`.
    pub(crate) fn register_method(
        &mut self,
        id: &ResourceId,
        method: &str,
        rules: OriginRules,
        reflect_wildcards: bool,
    ) -> Result<(), ConfigurationError> {
        let scope = PolicyScope::Method {
            resource: id.to_string(),
            method: method.to_string(),
        };
        let origins = rules.compile(&scope, reflect_wildcards)?;
        if !self.resources.contains_key(id) {
            self.register(id.clone(), OriginRules::new(), reflect_wildcards)?;
        }
        let inserted = self
            .resources
            .get_mut(id)
            .is_some_and(|policy| policy.set_method_origins(method, origins));
        if !inserted {
            return Err(ConfigurationError::DuplicateMethodRules {
                resource: id.to_string(),
                method: method.to_string(),
            });
        }
        Ok(())
    }

    pub fn defaults(&self) -> &DefaultPolicy {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourcePolicy> {
        self.resources.values()
    }

    pub fn get(&self, resource: &str) -> Result<&ResourcePolicy, CorsError> {
        self.resources
            .get(resource)
            .ok_or_else(|| CorsError::UnknownResource {
                resource: resource.to_string(),
            })
    }

    pub(crate) fn get_mut(&mut self, resource: &str) -> Result<&mut ResourcePolicy, CorsError> {
        self.resources
            .get_mut(resource)
            .ok_or_else(|| CorsError::UnknownResource {
                resource: resource.to_string(),
            })
    }

    /// Chooses the options record for `origin` calling `method` on `resource`.
    ///
    /// `Ok(None)` means no level configures the origin and the request is denied.
    pub fn resolve_options(
        &self,
        resource: &str,
        method: &str,
        origin: &str,
    ) -> Result<Option<MatchedRule<'_>>, CorsError> {
        Ok(self.get(resource)?.resolve_options(method, origin))
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
