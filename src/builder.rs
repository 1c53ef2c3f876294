use crate::adapter::{ResourceId, RouterAdapter};
use crate::constants::method;
use crate::cors::{Cors, CorsSettings};
use crate::policy::{DefaultPolicy, OriginRules};
use crate::result::ConfigurationError;
use crate::store::PolicyStore;
use crate::util::{is_http_token, normalize_upper};
use indexmap::IndexMap;
use tracing::{info, warn};

/// Setup-time registration of default and per-resource origin rules.
///
/// Nothing is validated until [`CorsBuilder::build`], which either yields a
/// complete engine or the first [`ConfigurationError`].
#[derive(Clone, Debug, Default)]
pub struct CorsBuilder {
    defaults: OriginRules,
    resources: Vec<(ResourceId, OriginRules)>,
    method_rules: Vec<(ResourceId, String, OriginRules)>,
    settings: CorsSettings,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules consulted for every origin a resource does not configure itself.
    pub fn defaults(mut self, rules: OriginRules) -> Self {
        self.defaults = rules;
        self
    }

    pub fn resource(mut self, id: impl Into<ResourceId>, rules: OriginRules) -> Self {
        self.resources.push((id.into(), rules));
        self
    }

    /// Rules used instead of the resource's own when a request targets `method`.
    ///
    /// For a preflight the requested method selects them. Registers the
    /// resource with no rules of its own if it is not registered otherwise.
    pub fn method_rules(
        mut self,
        id: impl Into<ResourceId>,
        method: impl AsRef<str>,
        rules: OriginRules,
    ) -> Self {
        self.method_rules
            .push((id.into(), method.as_ref().to_string(), rules));
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.settings.strict = strict;
        self
    }

    pub fn reflect_wildcards(mut self, reflect: bool) -> Self {
        self.settings.reflect_wildcards = reflect;
        self
    }

    pub fn preflight_status(mut self, status: u16) -> Self {
        self.settings.preflight_status = status;
        self
    }

    /// Validates every rule and seeds each resource with the methods the
    /// router reports for it.
    ///
    /// Resources the router serves but that were never registered here still
    /// get a policy, so they fall back to the defaults. A resource routing
    /// `OPTIONS` itself cannot be CORS-enabled.
    pub fn build<A: RouterAdapter>(self, adapter: A) -> Result<Cors, ConfigurationError> {
        let status = self.settings.preflight_status;
        if !(200..300).contains(&status) {
            return Err(ConfigurationError::InvalidPreflightStatus { status });
        }

        let reflect = self.settings.reflect_wildcards;
        let defaults = DefaultPolicy::compile(self.defaults, reflect)?;
        let mut store = PolicyStore::new(defaults);

        for (id, rules) in self.resources {
            if rules.is_empty() && store.defaults().is_empty() {
                warn!(resource = %id, "resource has no origin rules and no defaults apply");
            }
            store.register(id, rules, reflect)?;
        }

        let mut routed: IndexMap<ResourceId, Vec<http::Method>> = IndexMap::new();
        for (id, methods) in adapter.enumerate_resources() {
            routed.entry(id).or_default().extend(methods);
        }
        for (id, methods) in routed {
            if methods.contains(&http::Method::OPTIONS) {
                return Err(ConfigurationError::OptionsRouteConflict {
                    resource: id.to_string(),
                });
            }
            let methods = methods.iter().map(http::Method::as_str);
            match store.get_mut(id.as_str()) {
                Ok(policy) => {
                    policy.add_methods(methods);
                }
                Err(_) => {
                    store.register(id, OriginRules::new(), reflect)?.add_methods(methods);
                }
            }
        }

        for (id, raw_method, rules) in self.method_rules {
            let verb = normalize_upper(raw_method.trim());
            if !is_http_token(&verb) {
                return Err(ConfigurationError::InvalidMethod {
                    resource: id.to_string(),
                    method: raw_method,
                });
            }
            if verb == method::OPTIONS {
                return Err(ConfigurationError::OptionsRouteConflict {
                    resource: id.to_string(),
                });
            }
            store.register_method(&id, &verb, rules, reflect)?;
        }

        info!(
            resources = store.len(),
            strict = self.settings.strict,
            reflect_wildcards = reflect,
            "cors engine built"
        );
        Ok(Cors::from_parts(store, self.settings))
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
