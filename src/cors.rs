use crate::allowed_methods::AllowedMethods;
use crate::builder::CorsBuilder;
use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::HeaderCollection;
use crate::policy::ResourcePolicy;
use crate::result::{CorsError, Outcome, RejectionReason};
use crate::store::PolicyStore;
use tracing::{debug, error};

/// Engine-wide switches that do not belong to any single origin rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorsSettings {
    /// Reject denied CORS requests with `403` instead of passing them through.
    pub strict: bool,
    /// Accept credentials together with wildcard options by rendering every
    /// wildcard concretely.
    pub reflect_wildcards: bool,
    /// Status of an allowed preflight response.
    pub preflight_status: u16,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            strict: false,
            reflect_wildcards: false,
            preflight_status: 200,
        }
    }
}

/// Core CORS policy engine resolving requests against per-resource rules.
///
/// Built once through [`CorsBuilder`] and read-only afterwards, so a single
/// instance can be shared across workers behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Cors {
    store: PolicyStore,
    settings: CorsSettings,
}

impl Cors {
    pub fn builder() -> CorsBuilder {
        CorsBuilder::new()
    }

    pub(crate) fn from_parts(store: PolicyStore, settings: CorsSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &CorsSettings {
        &self.settings
    }

    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Records methods routed to `resource` after it was registered.
    ///
    /// Takes `&mut self`: once the engine is shared the method sets are frozen.
    /// Adding `OPTIONS` is refused, as preflights are answered by the engine.
    pub fn methods_added<I>(&mut self, resource: &str, methods: I) -> Result<usize, CorsError>
    where
        I: IntoIterator<Item = http::Method>,
    {
        let methods: Vec<http::Method> = methods.into_iter().collect();
        if methods.contains(&http::Method::OPTIONS) {
            error!(resource, "OPTIONS routed to a CORS-enabled resource");
            return Err(CorsError::OptionsRouteConflict {
                resource: resource.to_string(),
            });
        }
        let policy = self.store.get_mut(resource)?;
        let added = policy.add_methods(methods.iter().map(http::Method::as_str));
        debug!(resource, added, "registered methods updated");
        Ok(added)
    }

    /// Decides the headers for a non-preflight request.
    ///
    /// `response_headers` are the names on the outgoing response; they are only
    /// read when a rule exposes every header.
    pub fn resolve_actual(
        &self,
        resource: &str,
        request: &RequestContext<'_>,
        response_headers: &[&str],
    ) -> Result<Outcome, CorsError> {
        let policy = self.store.get(resource)?;
        let Some(origin) = request.origin() else {
            return Ok(Outcome::NotCors);
        };
        let Some(rule) = policy.resolve_options(request.method, origin) else {
            return Ok(Self::denied(resource, origin, RejectionReason::OriginNotAllowed));
        };

        if let Some(allowed) = &rule.options.allow_methods
            && !allowed.allows_method(request.method)
        {
            return Ok(Self::denied(
                resource,
                origin,
                RejectionReason::MethodNotAllowed {
                    requested_method: request.method.to_string(),
                },
            ));
        }

        let builder = HeaderBuilder::new(rule, policy);
        let mut headers = HeaderCollection::with_estimate(4);
        headers.extend(builder.build_origin_headers(origin));
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_exposed_headers(response_headers));

        debug!(resource, origin, level = ?rule.level, "actual request allowed");
        Ok(Outcome::Allowed(headers.into_headers()))
    }

    /// Decides the answer to a preflight request.
    ///
    /// An `OPTIONS` request without `Access-Control-Request-Method` is not a
    /// preflight and resolves to [`Outcome::NotCors`].
    pub fn resolve_preflight(
        &self,
        resource: &str,
        request: &RequestContext<'_>,
    ) -> Result<Outcome, CorsError> {
        let policy = self.store.get(resource)?;
        if !request.is_preflight() {
            return Ok(Outcome::NotCors);
        }
        let (Some(origin), Some(requested_method)) = (request.origin(), request.requested_method())
        else {
            return Ok(Outcome::NotCors);
        };
        let Some(rule) = policy.resolve_options(requested_method, origin) else {
            return Ok(Self::denied(resource, origin, RejectionReason::OriginNotAllowed));
        };

        if !Self::allows_method(policy, rule.options.allow_methods.as_ref(), requested_method) {
            return Ok(Self::denied(
                resource,
                origin,
                RejectionReason::MethodNotAllowed {
                    requested_method: requested_method.to_string(),
                },
            ));
        }

        let requested_headers = request.requested_headers();
        let rejected = rule.options.allow_headers.disallowed(&requested_headers);
        if !rejected.is_empty() {
            return Ok(Self::denied(
                resource,
                origin,
                RejectionReason::HeadersNotAllowed {
                    requested_headers: rejected.into_iter().map(str::to_string).collect(),
                },
            ));
        }

        let builder = HeaderBuilder::new(rule, policy);
        let mut headers = HeaderCollection::with_estimate(6);
        headers.extend(builder.build_origin_headers(origin));
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_methods_header(requested_method));
        headers.extend(builder.build_allowed_headers(&requested_headers));
        headers.extend(builder.build_max_age_header());

        debug!(resource, origin, requested_method, level = ?rule.level, "preflight allowed");
        Ok(Outcome::Allowed(headers.into_headers()))
    }

    /// Dispatches on the shape of the request: preflights go through
    /// [`Cors::resolve_preflight`], everything else through [`Cors::resolve_actual`].
    pub fn resolve(
        &self,
        resource: &str,
        request: &RequestContext<'_>,
        response_headers: &[&str],
    ) -> Result<Outcome, CorsError> {
        if request.is_preflight() {
            self.resolve_preflight(resource, request)
        } else {
            self.resolve_actual(resource, request, response_headers)
        }
    }

    /// Without an explicit `allow_methods` the registered methods are the allow-list.
    fn allows_method(
        policy: &ResourcePolicy,
        allowed: Option<&AllowedMethods>,
        method: &str,
    ) -> bool {
        match allowed {
            Some(allowed) => allowed.allows_method(method),
            None => policy.allows_registered_method(method),
        }
    }

    fn denied(resource: &str, origin: &str, reason: RejectionReason) -> Outcome {
        debug!(resource, origin, %reason, "cors request denied");
        Outcome::Denied(reason)
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
