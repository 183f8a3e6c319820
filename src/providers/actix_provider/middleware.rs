use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderValue, VARY};
use actix_web::http::{Method, StatusCode};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

use super::headers::X_INERTIA;
use crate::inertia::InertiaHttpRequest;

/// Adapts the responses of Inertia requests to the protocol:
/// * every response varies on the `Accept` header;
/// * every response but a `409 Conflict` carries the `X-Inertia` marker;
/// * `302 Found` redirects after PUT, PATCH or DELETE requests become `303 See Other`, so that
///   the browser follows them with a GET request.
#[derive(Default, Clone, Copy)]
pub struct InertiaMiddleware;

impl InertiaMiddleware {
    pub fn new() -> Self {
        Self
    }
}

// Middleware factory is `Transform` trait
// `S` - type of the next service
// `B` - type of response's body
impl<S, B> Transform<S, ServiceRequest> for InertiaMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = InertiaMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InertiaMiddlewareService { service }))
    }
}

pub struct InertiaMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for InertiaMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let is_inertia_request = req.request().is_inertia_request();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if !is_inertia_request {
                return Ok(res);
            }

            vary_on_accept(res.headers_mut());

            let redirects_a_mutation = [Method::PUT, Method::PATCH, Method::DELETE]
                .contains(res.request().method())
                && res.status() == StatusCode::FOUND;

            if redirects_a_mutation {
                *res.response_mut().status_mut() = StatusCode::SEE_OTHER;
            }

            // 409 replies hand the visit back to the browser: no marker
            if res.status() != StatusCode::CONFLICT {
                res.headers_mut()
                    .insert(X_INERTIA, HeaderValue::from_static("true"));
            }

            Ok(res)
        })
    }
}

fn vary_on_accept(headers: &mut HeaderMap) {
    let already_varies = headers.get_all(VARY).any(|value| {
        value.to_str().map_or(false, |value| {
            value
                .split(',')
                .any(|header| header.trim().eq_ignore_ascii_case("accept"))
        })
    });

    if !already_varies {
        headers.append(VARY, HeaderValue::from_static("Accept"));
    }
}
