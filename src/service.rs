use crate::adapter::ResourceId;
use crate::cors::Cors;
use crate::handler::{Forward, Intercept};
use http::{Request, Response, StatusCode};
use pin_project::pin_project;
use std::future::{Future, Ready};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{self, Poll, ready};
use tower::{Layer, Service};
use tracing::error;

/// Applies a shared [`Cors`] engine to every request of a tower stack.
///
/// The resource of a request is the [`ResourceId`] a router stored in the
/// request extensions, or else the request path when that path is a
/// registered resource. Requests matching no resource pass through untouched.
#[derive(Clone, Debug)]
pub struct CorsLayer {
    cors: Arc<Cors>,
}

impl CorsLayer {
    pub fn new(cors: impl Into<Arc<Cors>>) -> Self {
        Self { cors: cors.into() }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            cors: self.cors.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CorsService<S> {
    inner: S,
    cors: Arc<Cors>,
}

impl<S> CorsService<S> {
    fn resource_of<B>(&self, request: &Request<B>) -> Option<ResourceId> {
        if let Some(id) = request.extensions().get::<ResourceId>() {
            return Some(id.clone());
        }
        let path = request.uri().path();
        self.cors
            .store()
            .get(path)
            .ok()
            .map(|policy| policy.id().clone())
    }
}

#[pin_project(project = ResponseFutureProj)]
pub enum ResponseFuture<F, B> {
    Ready(#[pin] Ready<Response<B>>),
    Passthrough(#[pin] F),
    Inner {
        #[pin]
        future: F,
        cors: Arc<Cors>,
        resource: ResourceId,
        forward: Forward,
    },
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
    B: Default,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            ResponseFutureProj::Ready(f) => f.poll(cx).map(Ok),
            ResponseFutureProj::Passthrough(f) => f.poll(cx),
            ResponseFutureProj::Inner {
                future,
                cors,
                resource,
                forward,
            } => {
                let mut response = ready!(future.poll(cx))?;
                if let Err(err) = cors.annotate_response(resource.as_str(), forward, &mut response) {
                    error!(resource = %resource, error = %err, "cors annotation failed");
                    response = internal_error();
                }
                Poll::Ready(Ok(response))
            }
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let Some(resource) = self.resource_of(&req) else {
            return ResponseFuture::Passthrough(self.inner.call(req));
        };

        match self.cors.intercept_request(resource.as_str(), &req) {
            Ok(Intercept::Respond(response)) => {
                ResponseFuture::Ready(std::future::ready(response.map(|()| ResBody::default())))
            }
            Ok(Intercept::Forward(forward)) if forward.is_passthrough() => {
                ResponseFuture::Passthrough(self.inner.call(req))
            }
            Ok(Intercept::Forward(forward)) => ResponseFuture::Inner {
                future: self.inner.call(req),
                cors: self.cors.clone(),
                resource,
                forward,
            },
            Err(err) => {
                error!(resource = %resource, error = %err, "cors interception failed");
                ResponseFuture::Ready(std::future::ready(internal_error()))
            }
        }
    }
}

fn internal_error<B: Default>() -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
