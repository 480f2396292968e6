use super::metrics::metrics_middleware;
use axum::{Router, body::Body, http::Request, middleware::from_fn};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Standard request instrumentation for service routers.
pub trait RouterExt {
    /// Assign (or keep) an `x-request-id`, echo it on the response, open an
    /// `http_request` span carrying it, and record request metrics.
    fn with_request_observability(self) -> Self;
}

impl<S> RouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_request_observability(self) -> Self {
        // Router layers wrap outward: the last one added sees the request first.
        self.layer(from_fn(metrics_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }
}
