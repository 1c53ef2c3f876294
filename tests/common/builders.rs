#![allow(dead_code)]

use cors_policy_rs::constants::method;
use cors_policy_rs::{
    AllowedHeaders, AllowedMethods, Cors, ExposedHeaders, OriginRules, Outcome, RequestContext,
    ResourceOptions, RouteTable,
};
use http::Method;

pub const HELLO: &str = "/hello";
pub const CLIENT: &str = "http://client.example.org";
pub const OTHER: &str = "http://other.example.org";

#[derive(Default)]
pub struct OptionsBuilder {
    options: ResourceOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.allow_credentials = enabled;
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.expose_headers = ExposedHeaders::list(headers);
        self
    }

    pub fn expose_all(mut self) -> Self {
        self.options.expose_headers = ExposedHeaders::any();
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.options.allow_headers = headers;
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allow_methods = Some(AllowedMethods::list(methods));
        self
    }

    pub fn any_method(mut self) -> Self {
        self.options.allow_methods = Some(AllowedMethods::any());
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.options.max_age = Some(seconds);
        self
    }

    pub fn build(self) -> ResourceOptions {
        self.options
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
    response_headers: Vec<String>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
            response_headers: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn response_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_headers = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn check(self, cors: &Cors, resource: &str) -> Outcome {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        let names: Vec<&str> = self.response_headers.iter().map(String::as_str).collect();
        cors.resolve_actual(resource, &ctx, &names)
            .expect("resource should be registered")
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn check(self, cors: &Cors, resource: &str) -> Outcome {
        let ctx = RequestContext {
            method: method::OPTIONS,
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
        };
        cors.resolve_preflight(resource, &ctx)
            .expect("resource should be registered")
    }
}

pub fn options() -> OptionsBuilder {
    OptionsBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}

/// The `/hello` resource with a single credentialed rule for [`CLIENT`], routed for `GET`.
pub fn hello_cors() -> Cors {
    Cors::builder()
        .resource(
            HELLO,
            OriginRules::new().allow(
                CLIENT,
                options()
                    .credentials(true)
                    .exposed_headers(["X-Custom-Server-Header"])
                    .allowed_headers(AllowedHeaders::list(["X-Requested-With", "Content-Type"]))
                    .max_age(3600)
                    .build(),
            ),
        )
        .build(hello_routes())
        .expect("valid CORS configuration")
}

pub fn hello_routes() -> RouteTable {
    RouteTable::new().route(HELLO, Method::GET)
}

/// Engine with `rules` on `/hello` and `defaults` everywhere.
pub fn cors_with(rules: OriginRules, defaults: OriginRules) -> Cors {
    Cors::builder()
        .defaults(defaults)
        .resource(HELLO, rules)
        .build(hello_routes())
        .expect("valid CORS configuration")
}
