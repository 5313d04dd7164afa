//! The shared request function. All API traffic goes through `ApiClient`, which
//! applies one timeout policy, attaches the bearer token, and reports 401/403 to
//! the session-event sink it was constructed with. Pages receive
//! `AppError::Unauthorized` / `AppError::Forbidden` only so they can stop; the
//! user-facing reaction has already happened.

use super::{config::AppConfig, errors::AppError};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, to_string};
use session_gate::{CredentialStore, SessionEvents};
use std::rc::Rc;
use web_sys::AbortController;

/// Default request timeout (milliseconds) applied to all requests.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
/// JSON fields checked, in order, for a server-provided error message.
const MESSAGE_FIELDS: &[&str] = &["message", "error", "detail"];

/// Whether a failed response is reported to the session-event sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interception {
    Report,
    /// Credential endpoints: a 401 there means "wrong password", not "expired".
    Skip,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: CredentialStore,
    events: Rc<dyn SessionEvents>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, store: CredentialStore, events: Rc<dyn SessionEvents>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            store,
            events,
        }
    }

    /// GET with the stored bearer token.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let token = self.store.token();
        let response = send_with_timeout(|signal| {
            with_bearer(Request::get(&url), token.as_deref())
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        self.handle_json_response(response, Interception::Report)
            .await
    }

    /// POST JSON with the stored bearer token.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let token = self.store.token();
        let response = self.post(path, body, token.as_deref()).await?;
        self.handle_json_response(response, Interception::Report)
            .await
    }

    /// POST JSON without a token to a credential endpoint (login, MFA verify).
    /// Failures are returned to the caller and never end the session.
    pub async fn post_credentials<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.post(path, body, None).await?;
        self.handle_json_response(response, Interception::Skip)
            .await
    }

    /// POST an empty body with an explicit token, used for revocation. Not
    /// intercepted: a rejected revocation must not raise a second sign-out.
    pub async fn post_empty_with_token(&self, path: &str, token: &str) -> Result<(), AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let response = send_with_timeout(move |signal| {
            with_bearer(Request::post(&url), Some(token))
                .abort_signal(Some(signal))
                .body("")
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        if response.ok() {
            Ok(())
        } else {
            Err(self.reject(response, Interception::Skip).await)
        }
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        send_with_timeout(move |signal| {
            with_bearer(Request::post(&url), token)
                .header("Content-Type", "application/json")
                .abort_signal(Some(signal))
                .body(payload)
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await
    }

    async fn handle_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
        interception: Interception,
    ) -> Result<T, AppError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
        } else {
            Err(self.reject(response, interception).await)
        }
    }

    async fn reject(&self, response: Response, interception: Interception) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body, interception);
        report(self.events.as_ref(), &error);
        error
    }
}

fn with_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout so a hung API cannot freeze the UI.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

fn classify_failure(status: u16, body: &str, interception: Interception) -> AppError {
    match (status, interception) {
        (401, Interception::Report) => AppError::Unauthorized,
        (403, Interception::Report) => AppError::Forbidden(server_message(body)),
        _ => AppError::Http {
            status,
            message: server_message(body).unwrap_or_else(|| sanitize_body(body)),
        },
    }
}

/// Hands session errors to the sink. Other errors stay with the caller.
fn report(events: &dyn SessionEvents, error: &AppError) {
    match error {
        AppError::Unauthorized => events.notify_unauthorized(),
        AppError::Forbidden(message) => events.notify_forbidden(message.as_deref()),
        _ => {}
    }
}

/// The first non-empty string among `MESSAGE_FIELDS` of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    MESSAGE_FIELDS.iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(|message| message.chars().take(MAX_ERROR_CHARS).collect())
    })
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingEvents {
        unauthorized: RefCell<u32>,
        forbidden: RefCell<Vec<Option<String>>>,
    }

    impl SessionEvents for RecordingEvents {
        fn notify_unauthorized(&self) {
            *self.unauthorized.borrow_mut() += 1;
        }

        fn notify_forbidden(&self, message: Option<&str>) {
            self.forbidden
                .borrow_mut()
                .push(message.map(str::to_string));
        }
    }

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("https://api.ezrcm.dev/", "/api/Auth/login"),
            "https://api.ezrcm.dev/api/Auth/login"
        );
        assert_eq!(build_url_with_base("  ", "/api/profile/me"), "/api/profile/me");
    }

    #[test]
    fn unauthorized_and_forbidden_are_classified_when_reported() {
        assert_eq!(
            classify_failure(401, "", Interception::Report),
            AppError::Unauthorized
        );
        assert_eq!(
            classify_failure(403, r#"{"message":"Admins only"}"#, Interception::Report),
            AppError::Forbidden(Some("Admins only".to_string()))
        );
        assert_eq!(
            classify_failure(403, "<html>denied</html>", Interception::Report),
            AppError::Forbidden(None)
        );
    }

    #[test]
    fn credential_endpoints_surface_401_as_http_error() {
        assert_eq!(
            classify_failure(401, r#"{"message":"Invalid email or password"}"#, Interception::Skip),
            AppError::Http {
                status: 401,
                message: "Invalid email or password".to_string()
            }
        );
    }

    #[test]
    fn other_failures_keep_sanitized_body() {
        assert_eq!(
            classify_failure(500, "  upstream down  ", Interception::Report),
            AppError::Http {
                status: 500,
                message: "upstream down".to_string()
            }
        );
        assert_eq!(
            classify_failure(502, "", Interception::Report),
            AppError::Http {
                status: 502,
                message: "Request failed.".to_string()
            }
        );
    }

    #[test]
    fn report_routes_session_errors_to_sink() {
        let events = RecordingEvents::default();

        report(&events, &AppError::Unauthorized);
        report(&events, &AppError::Forbidden(Some("No".to_string())));
        report(&events, &AppError::Forbidden(None));
        report(
            &events,
            &AppError::Http {
                status: 500,
                message: "x".to_string(),
            },
        );

        assert_eq!(*events.unauthorized.borrow(), 1);
        assert_eq!(
            events.forbidden.borrow().as_slice(),
            [Some("No".to_string()), None]
        );
    }

    #[test]
    fn problem_details_title_falls_back_to_default_forbidden_text() {
        assert_eq!(
            classify_failure(
                403,
                r#"{"type":"https://tools.ietf.org/html/rfc9110#section-15.5.4","title":"Forbidden","status":403}"#,
                Interception::Report
            ),
            AppError::Forbidden(None)
        );
    }

    #[test]
    fn server_message_prefers_message_field() {
        assert_eq!(
            server_message(r#"{"title":"Forbidden","message":"Read only role"}"#),
            Some("Read only role".to_string())
        );
        assert_eq!(
            server_message(r#"{"title":"Forbidden","detail":"Payers are read only"}"#),
            Some("Payers are read only".to_string())
        );
        assert_eq!(server_message(r#"{"title":"Forbidden","status":403}"#), None);
        assert_eq!(server_message(r#"{"message":"  "}"#), None);
        assert_eq!(server_message("not json"), None);
    }

    #[test]
    fn sanitize_body_truncates() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }
}
