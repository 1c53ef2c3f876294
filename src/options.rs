use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::OriginPattern;
use thiserror::Error;

/// CORS settings applied to one origin pattern of one resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    pub allow_credentials: bool,
    pub expose_headers: ExposedHeaders,
    pub allow_headers: AllowedHeaders,
    /// `None` inherits the methods registered for the resource.
    pub allow_methods: Option<AllowedMethods>,
    /// Preflight cache lifetime in seconds; `None` omits `Access-Control-Max-Age`.
    pub max_age: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "credentials cannot be allowed for the wildcard origin; list the origins explicitly"
    )]
    CredentialsWithWildcardOrigin,
    #[error("credentials cannot be allowed together with expose_headers = \"*\"")]
    CredentialsWithWildcardExposeHeaders,
    #[error("credentials cannot be allowed together with allow_headers = \"*\"")]
    CredentialsWithWildcardAllowHeaders,
    #[error("origin '{0}' is not a serialized origin of the form scheme://host[:port]")]
    InvalidOrigin(String),
    #[error("'{0}' is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("'{0}' is not a valid HTTP header name")]
    InvalidHeaderName(String),
}

impl ResourceOptions {
    /// Checks the options as registered under `pattern`.
    ///
    /// With `reflect_wildcards` enabled, wildcards combined with credentials are
    /// accepted because they are always rendered as concrete values.
    pub fn validate(
        &self,
        pattern: &OriginPattern,
        reflect_wildcards: bool,
    ) -> Result<(), ValidationError> {
        if !pattern.is_well_formed() {
            return Err(ValidationError::InvalidOrigin(pattern.to_string()));
        }

        if let AllowedHeaders::List(values) = &self.allow_headers
            && let Some(invalid) = values.first_invalid()
        {
            return Err(ValidationError::InvalidHeaderName(invalid.to_string()));
        }

        if let ExposedHeaders::List(values) = &self.expose_headers
            && let Some(invalid) = values.first_invalid()
        {
            return Err(ValidationError::InvalidHeaderName(invalid.to_string()));
        }

        if let Some(methods) = &self.allow_methods
            && let Some(invalid) = methods.first_invalid()
        {
            return Err(ValidationError::InvalidMethod(invalid.to_string()));
        }

        if self.allow_credentials && !reflect_wildcards {
            if pattern.is_any() {
                return Err(ValidationError::CredentialsWithWildcardOrigin);
            }
            if self.expose_headers.is_any() {
                return Err(ValidationError::CredentialsWithWildcardExposeHeaders);
            }
            if self.allow_headers.is_any() {
                return Err(ValidationError::CredentialsWithWildcardAllowHeaders);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
