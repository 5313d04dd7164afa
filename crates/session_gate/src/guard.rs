//! Two-tier access gate. A cheap `CookieCheck` runs at the edge before any page is
//! delivered; the authoritative `TokenCheck` runs in the browser once script
//! storage is readable. Both answer the same question for the same `PathPolicy`.
//!
//! UX-only: these checks decide what the portal renders. The API still enforces
//! access on every call.

use crate::{cookies, paths::PathPolicy, store::CredentialStore};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

pub trait AuthCheck {
    /// Classifies `target` (path with optional query) and decides whether the
    /// request may proceed.
    fn decide(&self, policy: &PathPolicy, target: &str) -> GuardDecision;
}

/// Edge tier: trusts the sign-in marker cookie and keeps the requested target as
/// the post-login return path.
#[derive(Clone, Copy, Debug)]
pub struct CookieCheck<'a> {
    cookie_header: Option<&'a str>,
}

impl<'a> CookieCheck<'a> {
    #[must_use]
    pub fn new(cookie_header: Option<&'a str>) -> Self {
        Self { cookie_header }
    }
}

impl AuthCheck for CookieCheck<'_> {
    fn decide(&self, policy: &PathPolicy, target: &str) -> GuardDecision {
        if policy.is_public(target) || self.cookie_header.is_some_and(cookies::is_signed_in) {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(policy.login_redirect(target))
        }
    }
}

/// Client tier: trusts only the durable token. Redirects to the bare login path.
#[derive(Clone, Copy)]
pub struct TokenCheck<'a> {
    store: &'a CredentialStore,
}

impl<'a> TokenCheck<'a> {
    #[must_use]
    pub fn new(store: &'a CredentialStore) -> Self {
        Self { store }
    }
}

impl AuthCheck for TokenCheck<'_> {
    fn decide(&self, policy: &PathPolicy, target: &str) -> GuardDecision {
        if policy.is_public(target) || self.store.has_session() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(policy.login_path().to_string())
        }
    }
}

/// Per-mount guard state: `Unknown -> Checking -> Allowed | Redirecting`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Unknown,
    Checking,
    Allowed,
    Redirecting { to: String },
}

impl GuardState {
    /// Protected children render only once the guard has allowed them.
    #[must_use]
    pub fn renders_children(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Client route guard. Re-evaluated on every path change and session revision.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    policy: PathPolicy,
    state: GuardState,
}

impl RouteGuard {
    #[must_use]
    pub fn new(policy: PathPolicy) -> Self {
        Self {
            policy,
            state: GuardState::Unknown,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// State to render before any check has run for `target`.
    #[must_use]
    pub fn initial_state(&self, target: &str) -> GuardState {
        if self.policy.is_public(target) {
            GuardState::Allowed
        } else {
            GuardState::Checking
        }
    }

    pub fn evaluate(&mut self, target: &str, check: &dyn AuthCheck) -> GuardState {
        if self.policy.is_public(target) {
            self.state = GuardState::Allowed;
            return self.state.clone();
        }

        self.state = GuardState::Checking;
        self.state = match check.decide(&self.policy, target) {
            GuardDecision::Allow => GuardState::Allowed,
            GuardDecision::Redirect(to) => {
                debug!(path = target, redirect = %to, "Route guard redirecting");
                GuardState::Redirecting { to }
            }
        };
        self.state.clone()
    }
}
