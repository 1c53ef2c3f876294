use crate::constants::method;
use crate::util::split_header_list;

/// The CORS-relevant parts of an incoming request.
///
/// Empty header values are treated the same as absent ones.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn origin(&self) -> Option<&'a str> {
        self.origin.filter(|origin| !origin.is_empty())
    }

    pub fn requested_method(&self) -> Option<&'a str> {
        self.access_control_request_method
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Header names listed in `Access-Control-Request-Headers`, in request order.
    pub fn requested_headers(&self) -> Vec<&'a str> {
        self.access_control_request_headers
            .map(|value| split_header_list(value).collect())
            .unwrap_or_default()
    }

    /// An `OPTIONS` request is a preflight only when it names the method it asks for.
    pub fn is_preflight(&self) -> bool {
        self.method == method::OPTIONS && self.requested_method().is_some()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
