pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";

    /// Prefix shared by every CORS response header.
    pub const ACCESS_CONTROL_PREFIX: &str = "access-control-";
}

pub mod method {
    pub const CONNECT: &str = "CONNECT";
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
    pub const TRACE: &str = "TRACE";
}

pub mod value {
    /// Wildcard token used both in configuration and on the wire.
    pub const WILDCARD: &str = "*";
    /// The only value ever emitted for `Access-Control-Allow-Credentials`.
    pub const TRUE: &str = "true";
    /// Separator used when joining list-valued headers.
    pub const LIST_SEPARATOR: &str = ", ";
}

/// Response headers a browser always exposes to scripts.
///
/// They are left out when an `expose_headers = "*"` rule is expanded against
/// a concrete response.
pub const SAFELISTED_RESPONSE_HEADERS: [&str; 7] = [
    "cache-control",
    "content-language",
    "content-length",
    "content-type",
    "expires",
    "last-modified",
    "pragma",
];
