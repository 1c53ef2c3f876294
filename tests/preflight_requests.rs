mod common;

use cors_policy_rs::constants::{header, method};
use cors_policy_rs::{Cors, OriginRules, RejectionReason};
use common::asserts::{assert_allowed, assert_denied, assert_not_cors};
use common::builders::{
    CLIENT, HELLO, OTHER, cors_with, hello_cors, hello_routes, options, preflight_request,
};
use common::headers::{has_header, header_value};
use http::Method;

#[test]
fn allowed_preflight_emits_headers_in_wire_order() {
    let cors = hello_cors();

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::GET)
            .request_headers("Content-Type")
            .check(&cors, HELLO),
    );

    let names: Vec<&str> = headers.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::VARY,
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            header::ACCESS_CONTROL_ALLOW_METHODS,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_MAX_AGE,
        ]
    );
}

#[test]
fn allow_methods_lists_every_registered_method() {
    let cors = Cors::builder()
        .resource(HELLO, OriginRules::new().allow(CLIENT, options().build()))
        .build(
            hello_routes()
                .route(HELLO, Method::POST)
                .route(HELLO, Method::DELETE),
        )
        .expect("valid CORS configuration");

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::POST)
            .check(&cors, HELLO),
    );

    assert_eq!(
        header_value(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("GET, POST, DELETE")
    );
}

#[test]
fn explicit_method_list_overrides_registered_methods() {
    let cors = cors_with(
        OriginRules::new().allow(CLIENT, options().methods(["put", "patch"]).build()),
        OriginRules::new(),
    );

    let put = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::PUT)
            .check(&cors, HELLO),
    );
    let get = assert_denied(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::GET)
            .check(&cors, HELLO),
    );

    assert_eq!(
        header_value(&put, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("PUT, PATCH")
    );
    assert_eq!(
        get,
        RejectionReason::MethodNotAllowed {
            requested_method: method::GET.into()
        }
    );
}

#[test]
fn any_method_without_credentials_sends_wildcard() {
    let cors = cors_with(
        OriginRules::new().allow(CLIENT, options().any_method().build()),
        OriginRules::new(),
    );

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method("PURGE")
            .check(&cors, HELLO),
    );

    assert_eq!(
        header_value(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("*")
    );
}

#[test]
fn any_method_with_credentials_names_requested_method() {
    let cors = cors_with(
        OriginRules::new().allow(CLIENT, options().credentials(true).any_method().build()),
        OriginRules::new(),
    );

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method("PURGE")
            .check(&cors, HELLO),
    );

    assert_eq!(
        header_value(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("GET, PURGE")
    );
}

#[test]
fn max_age_is_omitted_when_unset() {
    let cors = cors_with(OriginRules::new().allow(CLIENT, options().build()), OriginRules::new());

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::GET)
            .check(&cors, HELLO),
    );

    assert!(!has_header(&headers, header::ACCESS_CONTROL_MAX_AGE));
    assert!(!has_header(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
}

#[test]
fn max_age_zero_is_sent() {
    let cors = cors_with(
        OriginRules::new().allow(CLIENT, options().max_age(0).build()),
        OriginRules::new(),
    );

    let headers = assert_allowed(
        preflight_request()
            .origin(CLIENT)
            .request_method(method::GET)
            .check(&cors, HELLO),
    );

    assert_eq!(header_value(&headers, header::ACCESS_CONTROL_MAX_AGE), Some("0"));
}

#[test]
fn unknown_origin_preflight_is_denied() {
    let cors = hello_cors();

    let reason = assert_denied(
        preflight_request()
            .origin(OTHER)
            .request_method(method::GET)
            .check(&cors, HELLO),
    );

    assert_eq!(reason, RejectionReason::OriginNotAllowed);
}

#[test]
fn blank_request_method_is_not_a_preflight() {
    let cors = hello_cors();

    assert_not_cors(
        preflight_request()
            .origin(CLIENT)
            .request_method("  ")
            .check(&cors, HELLO),
    );
}

#[test]
fn resource_without_routes_denies_every_inherited_method() {
    let cors = Cors::builder()
        .resource(HELLO, OriginRules::new().allow(CLIENT, options().build()))
        .build(cors_policy_rs::RouteTable::new())
        .expect("valid CORS configuration");

    let outcome = preflight_request()
        .origin(CLIENT)
        .request_method(method::GET)
        .check(&cors, HELLO);

    assert!(outcome.is_denied());
}
