//! Per-request tracing span.
//!
//! Opens a span named "request" with `trace_id`, `method`, `path` and whether the
//! request asks for a websocket upgrade, instruments the handler with it, and
//! logs the response status and latency when the handler completes.
//!
//! Wire it inside `RequestTrace` so the trace id is already in the extensions:
//!
//! App::new()
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::Error;
use actix_web::HttpMessage;
use futures_util::future::LocalBoxFuture;
use tracing::{info, info_span, warn, Instrument};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "missing-trace-id".to_string());
        let websocket = req
            .headers()
            .get(header::UPGRADE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("websocket"));

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            websocket
        );

        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let res = fut.await;
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match &res {
                    Ok(res) if res.status().is_server_error() => {
                        warn!(status = res.status().as_u16(), elapsed_ms, "request failed")
                    }
                    Ok(res) => info!(status = res.status().as_u16(), elapsed_ms, "request done"),
                    Err(err) => warn!(error = %err, elapsed_ms, "request errored"),
                }
                res
            }
            .instrument(span),
        )
    }
}
