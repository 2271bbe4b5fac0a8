//! Per-request correlation.
//!
//! [`Trace`] gives every request a fresh [`TraceId`], runs the downstream
//! service inside [`TraceId::scope`] and an `http_request` span, then stamps
//! the identifier onto the `trace-id` response header. Domain errors raised
//! while the scope is open carry the same identifier in their JSON body.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory attaching a [`TraceId`] to each request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use expense_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TracedService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(TracedService { inner }))
    }
}

/// Service produced by [`Trace`].
pub struct TracedService<S> {
    inner: S,
}

fn stamp_header<B>(response: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TracedService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, request: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        request.extensions_mut().insert(trace_id);
        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %request.method(),
            path = %request.path(),
        );
        let started = Instant::now();
        let pending = TraceId::scope(trace_id, self.inner.call(request));

        Box::pin(
            async move {
                let mut response = pending.await?;
                stamp_header(&mut response, trace_id);
                info!(
                    status = response.status().as_u16(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "request finished"
                );
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::BoxBody;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use rstest::rstest;

    use crate::domain::{ApiResult, Error as DomainError};

    async fn echo_scope() -> HttpResponse {
        let body = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
        HttpResponse::Ok().body(body)
    }

    async fn echo_extension(request: HttpRequest) -> HttpResponse {
        let body = request
            .extensions()
            .get::<TraceId>()
            .map(ToString::to_string)
            .unwrap_or_default();
        HttpResponse::Ok().body(body)
    }

    async fn refuse() -> ApiResult<HttpResponse> {
        Err(DomainError::forbidden("wallet belongs to another user"))
    }

    async fn get(path: &str) -> (ServiceResponse<BoxBody>, String) {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/scope", web::get().to(echo_scope))
                .route("/extension", web::get().to(echo_extension))
                .route("/refuse", web::get().to(refuse)),
        )
        .await;
        let response = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
            .expect("trace-id header");
        (response, header)
    }

    #[rstest]
    #[case("/scope")]
    #[case("/extension")]
    #[actix_web::test]
    async fn handlers_see_the_header_identifier(#[case] path: &str) {
        let (response, header) = get(path).await;
        assert!(header.parse::<TraceId>().is_ok(), "{header}");
        let body = test::read_body(response).await;
        assert_eq!(body, header.as_bytes());
    }

    #[actix_web::test]
    async fn error_bodies_repeat_the_header_identifier() {
        let (response, header) = get("/refuse").await;
        let error: DomainError = test::read_body_json(response).await;
        assert_eq!(error.trace_id(), Some(header.as_str()));
    }

    #[actix_web::test]
    async fn identifiers_differ_between_requests() {
        let (_, first) = get("/scope").await;
        let (_, second) = get("/scope").await;
        assert_ne!(first, second);
    }
}
