//! # Session gate
//!
//! Client-side session gating for the EZRCM settings portal, shared by the edge
//! redirector (`services/edge`) and the browser app (`apps/web`).
//!
//! ## Layers
//!
//! 1. **Edge:** before a page is delivered, `CookieCheck` looks only at the
//!    `ezrcm_signed_in` marker cookie and redirects to
//!    `/login?redirect=<original>` when it is missing.
//! 2. **Client:** once script storage is readable, `RouteGuard` runs the
//!    authoritative `TokenCheck` against the durable token and renders protected
//!    children only after it allows them.
//! 3. **Interceptor:** the request layer reports 401/403 through `SessionEvents`.
//!    A 401 ends the session and returns to login; a 403 only shows a toast.
//!
//! Both tiers classify paths with the same `PathPolicy`. None of this is a
//! security boundary: the backend validates the bearer token on every call.
//!
//! The browser model is single-threaded, so session types use `Rc` and `Cell`.
//! Only `PathPolicy`, the cookie codec and `CookieCheck` are used from the
//! multi-threaded edge server.

pub mod cookies;
pub mod error;
pub mod events;
pub mod guard;
pub mod login;
pub mod logout;
pub mod notifications;
pub mod paths;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::Error;
pub use events::{
    FORBIDDEN_FALLBACK_MESSAGE, SESSION_EXPIRED_MESSAGE, SessionEventHub, SessionEvents,
};
pub use guard::{AuthCheck, CookieCheck, GuardDecision, GuardState, RouteGuard, TokenCheck};
pub use login::{LoginOutcome, LoginRequest, LoginResponse, MfaVerifyRequest, establish_session};
pub use logout::{TokenRevoker, logout};
pub use notifications::{Notification, NotificationCenter, Severity};
pub use paths::PathPolicy;
pub use session::{Navigator, Notifier, Session};
pub use store::{CookieJar, CredentialStore, KeyValueStore, StorageKeys};
