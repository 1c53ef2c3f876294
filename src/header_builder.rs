use crate::allowed_methods::AllowedMethods;
use crate::constants::{header, value};
use crate::header_list::HeaderList;
use crate::headers::HeaderCollection;
use crate::policy::{MatchedRule, ResourcePolicy};
use crate::util::join_header_list;

pub(crate) struct HeaderBuilder<'a> {
    rule: MatchedRule<'a>,
    resource: &'a ResourcePolicy,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(rule: MatchedRule<'a>, resource: &'a ResourcePolicy) -> Self {
        Self { rule, resource }
    }

    /// The literal `*` is only sent for a wildcard rule without credentials;
    /// otherwise the request origin is echoed and caches must vary on it.
    pub(crate) fn build_origin_headers(&self, origin: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(2);
        if self.rule.via_wildcard && !self.rule.options.allow_credentials {
            headers.push(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                value::WILDCARD.to_string(),
            );
        } else {
            headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
            headers.add_vary(header::ORIGIN);
        }
        headers
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if self.rule.options.allow_credentials {
            headers.push(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                value::TRUE.to_string(),
            );
        }
        headers
    }

    pub(crate) fn build_exposed_headers(&self, response_headers: &[&str]) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.rule.options.expose_headers.header_value(response_headers) {
            headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_methods_header(&self, requested_method: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        let value = match &self.rule.options.allow_methods {
            None => self.resource.methods_header_value().map(str::to_string),
            Some(AllowedMethods::Any) if !self.rule.options.allow_credentials => {
                Some(value::WILDCARD.to_string())
            }
            // `*` is a literal method name on credentialed requests.
            Some(AllowedMethods::Any) => {
                if self.resource.allows_registered_method(requested_method) {
                    self.resource.methods_header_value().map(str::to_string)
                } else {
                    Some(join_header_list(
                        self.resource
                            .methods()
                            .iter()
                            .map(String::as_str)
                            .chain(std::iter::once(requested_method)),
                    ))
                }
            }
            Some(list) => list.header_value(),
        };
        if let Some(value) = value {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        headers
    }

    /// Echoes the validated request headers rather than the configured set,
    /// keeping the first spelling of each name.
    pub(crate) fn build_allowed_headers(&self, requested_headers: &[&str]) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = HeaderList::new(requested_headers.iter().copied()).header_value() {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(max_age) = self.rule.options.max_age {
            headers.push(header::ACCESS_CONTROL_MAX_AGE, max_age.to_string());
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
