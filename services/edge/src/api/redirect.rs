//! Pre-render redirect. Decides from the request path and the marker cookie
//! alone, before any page body is produced.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use session_gate::{AuthCheck, CookieCheck, GuardDecision, PathPolicy, paths};
use std::sync::Arc;
use tracing::debug;

/// Probe paths answered by the edge itself.
pub const PROBE_PATHS: &[&str] = &["/health", "/live"];

/// Middleware: `307` to the login page for protected paths without the marker
/// cookie, pass-through for everything else.
pub async fn gate(
    State(policy): State<Arc<PathPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    match decide(&policy, &request) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(location) => {
            debug!(path = request.uri().path(), %location, "Redirecting to login");
            Redirect::temporary(&location).into_response()
        }
    }
}

fn decide(policy: &PathPolicy, request: &Request) -> GuardDecision {
    let path = request.uri().path();
    if PROBE_PATHS.contains(&path) || paths::bypasses_edge(path) {
        return GuardDecision::Allow;
    }

    let original = request
        .uri()
        .path_and_query()
        .map_or(path, |pq| pq.as_str());
    let cookies = cookie_header(request.headers());

    CookieCheck::new(cookies.as_deref()).decide(policy, original)
}

/// All `Cookie` headers joined the way a single header would carry them.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join("; "))
}
