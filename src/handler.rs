use crate::constants::header;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::headers::{HeaderCollection, Headers};
use crate::result::{CorsError, Outcome};
use crate::util::equals_ignore_case;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode};
use tracing::{error, warn};

/// What to do with a request before it reaches the real handler.
#[derive(Debug)]
pub enum Intercept {
    /// Answer immediately; the request never reaches the handler.
    Respond(Response<()>),
    /// Dispatch the request, then pass the token to [`Cors::annotate_response`].
    Forward(Forward),
}

/// State carried from [`Cors::intercept_request`] to [`Cors::annotate_response`].
#[derive(Clone, Debug, Default)]
pub struct Forward {
    pending: Option<PendingRequest>,
}

#[derive(Clone, Debug)]
struct PendingRequest {
    method: String,
    origin: String,
}

impl Forward {
    /// A token that leaves the response untouched.
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn is_passthrough(&self) -> bool {
        self.pending.is_none()
    }
}

/// Borrows the CORS-relevant headers of `request`.
///
/// Header values that are not visible ASCII are treated as absent.
pub fn request_context<B>(request: &Request<B>) -> RequestContext<'_> {
    let headers = request.headers();
    RequestContext {
        method: request.method().as_str(),
        origin: header_str(headers, header::ORIGIN),
        access_control_request_method: header_str(headers, header::ACCESS_CONTROL_REQUEST_METHOD),
        access_control_request_headers: header_str(
            headers,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

impl Cors {
    /// First interception point, run before dispatch.
    ///
    /// Allowed preflights are answered here. Everything else is forwarded,
    /// unless strict mode rejects a denied request with `403`.
    pub fn intercept_request<B>(
        &self,
        resource: &str,
        request: &Request<B>,
    ) -> Result<Intercept, CorsError> {
        let ctx = request_context(request);

        if ctx.is_preflight() {
            return match self.resolve_preflight(resource, &ctx)? {
                Outcome::Allowed(headers) => {
                    let mut response = Response::new(());
                    *response.status_mut() = self.preflight_status();
                    apply_headers(response.headers_mut(), headers);
                    Ok(Intercept::Respond(response))
                }
                Outcome::Denied(reason) if self.settings().strict => {
                    warn!(resource, %reason, "strict mode rejected preflight");
                    Ok(Intercept::Respond(forbidden()))
                }
                Outcome::Denied(_) | Outcome::NotCors => {
                    Ok(Intercept::Forward(Forward::passthrough()))
                }
            };
        }

        let Some(origin) = ctx.origin() else {
            self.store().get(resource)?;
            return Ok(Intercept::Forward(Forward::passthrough()));
        };

        // Response headers are unknown before dispatch, which only affects
        // exposed headers, not the allow/deny decision.
        if self.settings().strict
            && let Outcome::Denied(reason) = self.resolve_actual(resource, &ctx, &[])?
        {
            warn!(resource, origin, %reason, "strict mode rejected request");
            return Ok(Intercept::Respond(forbidden()));
        }

        Ok(Intercept::Forward(Forward {
            pending: Some(PendingRequest {
                method: ctx.method.to_string(),
                origin: origin.to_string(),
            }),
        }))
    }

    /// Second interception point: adds the actual-request headers to the
    /// handler's response. Denied requests leave the response unchanged.
    pub fn annotate_response<B>(
        &self,
        resource: &str,
        forward: &Forward,
        response: &mut Response<B>,
    ) -> Result<(), CorsError> {
        let Some(pending) = &forward.pending else {
            return Ok(());
        };
        let ctx = RequestContext {
            method: &pending.method,
            origin: Some(&pending.origin),
            access_control_request_method: None,
            access_control_request_headers: None,
        };

        let outcome = {
            let names: Vec<&str> = response.headers().keys().map(HeaderName::as_str).collect();
            self.resolve_actual(resource, &ctx, &names)?
        };
        if let Outcome::Allowed(headers) = outcome {
            apply_headers(response.headers_mut(), headers);
        }
        Ok(())
    }

    fn preflight_status(&self) -> StatusCode {
        StatusCode::from_u16(self.settings().preflight_status).unwrap_or(StatusCode::OK)
    }
}

fn forbidden() -> Response<()> {
    let mut response = Response::new(());
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

/// Writes resolved headers, replacing same-named ones except `Vary`, which is merged.
fn apply_headers(target: &mut HeaderMap, headers: Headers) {
    for (name, value) in headers {
        if equals_ignore_case(&name, header::VARY) {
            merge_vary(target, value);
            continue;
        }
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                target.insert(name, value);
            }
            _ => error!(header = %name, "skipping CORS header that is not valid on the wire"),
        }
    }
}

fn merge_vary(target: &mut HeaderMap, value: String) {
    let mut merged = HeaderCollection::new();
    for existing in target.get_all(http::header::VARY) {
        if let Ok(existing) = existing.to_str() {
            merged.add_vary(existing);
        }
    }
    merged.add_vary(value);

    if let Some(vary) = merged.into_headers().get(header::VARY)
        && let Ok(vary) = HeaderValue::from_str(vary)
    {
        target.insert(http::header::VARY, vary);
    }
}

#[cfg(test)]
#[path = "handler_test.rs"]
mod handler_test;
