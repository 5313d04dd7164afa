//! HTTP surface of the edge: probes, the redirect gate and the static portal.

use crate::cli::telemetry;
use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
};
use session_gate::PathPolicy;
use std::{path::Path, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug_span, info};
use ulid::Ulid;

pub mod handlers;
pub mod redirect;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the edge router.
///
/// Files under `dist` are served directly; any other path gets `index.html` so
/// client routes can be deep-linked. Every request passes the redirect gate first.
pub fn router(dist: &Path, policy: PathPolicy) -> Router {
    let portal = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/live", get(handlers::health::live))
        .fallback_service(portal)
        .layer(middleware::from_fn_with_state(
            Arc::new(policy),
            redirect::gate,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Binds `[::]:port` and serves until ctrl-c.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(port: u16, dist: impl AsRef<Path>) -> Result<()> {
    let app = router(dist.as_ref(), PathPolicy::default());

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                info!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    telemetry::shutdown_tracer();

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let method = request.method().as_str();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", method, path, request_id)
}
