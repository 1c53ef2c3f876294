pub mod adapter;
mod allowed_headers;
mod allowed_methods;
mod builder;
pub mod config;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod header_builder;
mod header_list;
mod headers;
mod handler;
mod options;
mod origin;
mod policy;
mod result;
mod service;
mod store;
mod util;

pub use adapter::{ResourceId, RouteTable, RouterAdapter};
pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use builder::CorsBuilder;
pub use config::{ConfigError, CorsConfig, ListSetting, OptionsConfig};
pub use context::RequestContext;
pub use cors::{Cors, CorsSettings};
pub use exposed_headers::ExposedHeaders;
pub use handler::{Forward, Intercept, request_context};
pub use header_list::HeaderList;
pub use headers::Headers;
pub use options::{ResourceOptions, ValidationError};
pub use origin::{NULL_ORIGIN, OriginMap, OriginMatch, OriginPattern};
pub use policy::{DefaultPolicy, MatchedRule, OriginRules, PolicyLevel, ResourcePolicy};
pub use result::{ConfigurationError, CorsError, Outcome, PolicyScope, RejectionReason};
pub use service::{CorsLayer, CorsService, ResponseFuture};
pub use store::PolicyStore;
