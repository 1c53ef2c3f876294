use crate::adapter::ResourceId;
use crate::options::ResourceOptions;
use crate::origin::{OriginMap, OriginPattern};
use crate::result::{ConfigurationError, PolicyScope};
use crate::util::{join_header_list, normalize_upper};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Per-origin rules as supplied at setup, before validation.
#[derive(Clone, Debug, Default)]
pub struct OriginRules {
    entries: Vec<(OriginPattern, ResourceOptions)>,
}

impl OriginRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, pattern: impl Into<OriginPattern>, options: ResourceOptions) -> Self {
        self.push(pattern, options);
        self
    }

    pub fn push(&mut self, pattern: impl Into<OriginPattern>, options: ResourceOptions) {
        self.entries.push((pattern.into(), options));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OriginPattern, &ResourceOptions)> {
        self.entries.iter().map(|(pattern, options)| (pattern, options))
    }

    pub(crate) fn compile(
        self,
        scope: &PolicyScope,
        reflect_wildcards: bool,
    ) -> Result<OriginMap<ResourceOptions>, ConfigurationError> {
        let mut origins = OriginMap::new();
        for (pattern, options) in self.entries {
            options
                .validate(&pattern, reflect_wildcards)
                .map_err(|source| ConfigurationError::InvalidRule {
                    scope: scope.clone(),
                    origin: pattern.to_string(),
                    source,
                })?;

            let origin = pattern.to_string();
            if origins.insert(pattern, options).is_err() {
                return Err(ConfigurationError::DuplicateOriginPattern {
                    scope: scope.clone(),
                    origin,
                });
            }
        }
        Ok(origins)
    }
}

impl<P: Into<OriginPattern>> FromIterator<(P, ResourceOptions)> for OriginRules {
    fn from_iter<I: IntoIterator<Item = (P, ResourceOptions)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(pattern, options)| (pattern.into(), options))
                .collect(),
        }
    }
}

/// Which layer of configuration supplied a matched rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyLevel {
    Method,
    Resource,
    Default,
}

/// The options record chosen for a request, used whole.
#[derive(Clone, Copy, Debug)]
pub struct MatchedRule<'a> {
    pub options: &'a ResourceOptions,
    /// The rule was registered under the wildcard origin pattern.
    pub via_wildcard: bool,
    pub level: PolicyLevel,
}

/// Process-wide rules consulted for origins a resource does not configure.
#[derive(Clone, Debug, Default)]
pub struct DefaultPolicy {
    origins: OriginMap<ResourceOptions>,
}

impl DefaultPolicy {
    pub(crate) fn compile(
        rules: OriginRules,
        reflect_wildcards: bool,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            origins: rules.compile(&PolicyScope::Defaults, reflect_wildcards)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn origins(&self) -> &OriginMap<ResourceOptions> {
        &self.origins
    }
}

/// Rules and registered methods of one resource.
#[derive(Clone, Debug)]
pub struct ResourcePolicy {
    id: ResourceId,
    origins: OriginMap<ResourceOptions>,
    method_origins: IndexMap<String, OriginMap<ResourceOptions>>,
    methods: IndexSet<String>,
    methods_value: Option<String>,
    defaults: Arc<DefaultPolicy>,
}

impl ResourcePolicy {
    pub(crate) fn new(
        id: ResourceId,
        origins: OriginMap<ResourceOptions>,
        defaults: Arc<DefaultPolicy>,
    ) -> Self {
        Self {
            id,
            origins,
            method_origins: IndexMap::new(),
            methods: IndexSet::new(),
            methods_value: None,
            defaults,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn origins(&self) -> &OriginMap<ResourceOptions> {
        &self.origins
    }

    /// Rules that override the resource's own for a single method.
    pub fn method_origins(&self, method: &str) -> Option<&OriginMap<ResourceOptions>> {
        self.method_origins.get(method)
    }

    /// Returns `false` when `method` already carries its own rules.
    pub(crate) fn set_method_origins(
        &mut self,
        method: &str,
        origins: OriginMap<ResourceOptions>,
    ) -> bool {
        let method = normalize_upper(method.trim());
        if self.method_origins.contains_key(&method) {
            return false;
        }
        self.method_origins.insert(method, origins);
        true
    }

    /// Methods routed to this resource, upper-cased in registration order.
    pub fn methods(&self) -> &IndexSet<String> {
        &self.methods
    }

    pub fn allows_registered_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// `Access-Control-Allow-Methods` value for the registered methods.
    pub fn methods_header_value(&self) -> Option<&str> {
        self.methods_value.as_deref()
    }

    pub(crate) fn add_methods<I, S>(&mut self, methods: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.methods.len();
        self.methods.extend(
            methods
                .into_iter()
                .map(|method| normalize_upper(method.as_ref().trim()))
                .filter(|method| !method.is_empty()),
        );
        let added = self.methods.len() - before;
        if added > 0 {
            self.methods_value = Some(join_header_list(&self.methods));
        }
        added
    }

    /// Picks the rule for `origin` when the request targets `method`.
    ///
    /// For a preflight `method` is the requested method. The first level that
    /// configures the origin wins and its record is used whole: method-exact,
    /// method-wildcard, resource-exact, resource-wildcard, default-exact,
    /// default-wildcard.
    pub fn resolve_options(&self, method: &str, origin: &str) -> Option<MatchedRule<'_>> {
        let levels = [
            (self.method_origins.get(method), PolicyLevel::Method),
            (Some(&self.origins), PolicyLevel::Resource),
            (Some(&self.defaults.origins), PolicyLevel::Default),
        ];
        levels.into_iter().find_map(|(origins, level)| {
            origins?.find(origin).map(|found| MatchedRule {
                options: found.value,
                via_wildcard: found.via_wildcard,
                level,
            })
        })
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
