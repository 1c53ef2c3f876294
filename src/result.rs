use crate::headers::Headers;
use crate::options::ValidationError;
use std::fmt;
use thiserror::Error;

/// Result of resolving one request against the policy store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request carries no `Origin`; it is left untouched.
    NotCors,
    /// The policy does not allow the request; no CORS headers are emitted.
    Denied(RejectionReason),
    /// The request is allowed; these headers must be added to the response.
    Allowed(Headers),
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    pub fn headers(&self) -> Option<&Headers> {
        match self {
            Self::Allowed(headers) => Some(headers),
            _ => None,
        }
    }
}

/// Why a CORS request was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Neither the resource nor the defaults configure this origin.
    OriginNotAllowed,
    MethodNotAllowed { requested_method: String },
    HeadersNotAllowed { requested_headers: Vec<String> },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OriginNotAllowed => f.write_str("origin not allowed"),
            Self::MethodNotAllowed { requested_method } => {
                write!(f, "method '{requested_method}' not allowed")
            }
            Self::HeadersNotAllowed { requested_headers } => {
                write!(f, "headers '{}' not allowed", requested_headers.join(", "))
            }
        }
    }
}

/// Runtime errors; each one is a contract violation by the router integration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorsError {
    #[error("resource '{resource}' was never registered with the CORS engine")]
    UnknownResource { resource: String },
    #[error("resource '{resource}' routes OPTIONS, which CORS preflight handling owns")]
    OptionsRouteConflict { resource: String },
}

/// Where a rule was registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyScope {
    Defaults,
    Resource(String),
    Method { resource: String, method: String },
}

impl fmt::Display for PolicyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("default policy"),
            Self::Resource(resource) => write!(f, "resource '{resource}'"),
            Self::Method { resource, method } => {
                write!(f, "resource '{resource}', method {method}")
            }
        }
    }
}

/// Setup-time errors. The engine refuses to build with an invalid policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{scope}, origin '{origin}': {source}")]
    InvalidRule {
        scope: PolicyScope,
        origin: String,
        #[source]
        source: ValidationError,
    },
    #[error("{scope}: origin '{origin}' is configured more than once")]
    DuplicateOriginPattern { scope: PolicyScope, origin: String },
    #[error("resource '{resource}' is registered more than once")]
    DuplicateResource { resource: String },
    #[error("preflight status {status} is not a 2xx status code")]
    InvalidPreflightStatus { status: u16 },
    #[error("resource '{resource}' routes OPTIONS, which CORS preflight handling owns")]
    OptionsRouteConflict { resource: String },
    #[error("resource '{resource}': '{method}' is not a valid HTTP method")]
    InvalidMethod { resource: String, method: String },
    #[error("resource '{resource}': method {method} has rules configured more than once")]
    DuplicateMethodRules { resource: String, method: String },
}
