//! Turning a login (or MFA verification) response into client session state.
//! Setting the sign-in marker happens here, next to storing the token, so the edge
//! and client tiers start from the same state.

use crate::{
    error::Error,
    paths::{MFA_SETUP_PATH, MFA_VERIFY_PATH},
    session::Session,
    store::CredentialStore,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaVerifyRequest {
    pub user_id: String,
    pub code: String,
}

/// Body returned by `/api/Auth/login` and `/api/Auth/verify-mfa`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub mfa_required: bool,
    #[serde(default)]
    pub mfa_setup_required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn { return_to: String },
    MfaVerification { user_id: String },
    MfaSetup { user_id: String },
}

impl LoginOutcome {
    /// Where the login screen should navigate next.
    #[must_use]
    pub fn destination(&self) -> &str {
        match self {
            Self::SignedIn { return_to } => return_to,
            Self::MfaVerification { .. } => MFA_VERIFY_PATH,
            Self::MfaSetup { .. } => MFA_SETUP_PATH,
        }
    }
}

/// Applies a login response to the session.
///
/// A pending MFA challenge stores only the pending user id: no token and no
/// cookie until the second factor passes. Otherwise the token is stored, the
/// sign-in marker set, and any pending challenge promoted to "verified".
///
/// The response is validated before anything is written, and a failed write
/// clears the store again, so an error never leaves a partial session behind.
///
/// # Errors
/// Returns `Error::MissingUserId` or `Error::MissingAccessToken` for incomplete
/// responses and `Error::Storage` if the browser rejects a write.
pub fn establish_session(
    session: &Session,
    response: &LoginResponse,
    requested_return: Option<&str>,
) -> Result<LoginOutcome, Error> {
    let store = session.store();
    let user_id = response
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    if response.mfa_required {
        let user_id = user_id.ok_or(Error::MissingUserId)?;
        store.clear();
        store.set_mfa_pending(user_id).inspect_err(|_| store.clear())?;
        info!("Login requires MFA verification");
        return Ok(LoginOutcome::MfaVerification {
            user_id: user_id.to_string(),
        });
    }

    let access_token = response
        .access_token
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .ok_or(Error::MissingAccessToken)?;
    let setup_user = if response.mfa_setup_required {
        Some(user_id.ok_or(Error::MissingUserId)?)
    } else {
        None
    };

    if let Err(err) = persist(store, access_token, response.refresh_token.as_deref(), setup_user) {
        warn!("Unable to persist session, rolling back: {err}");
        store.clear();
        return Err(err);
    }
    session.started();
    session.navigator().refresh();

    if let Some(user_id) = setup_user {
        info!("Login requires MFA setup");
        return Ok(LoginOutcome::MfaSetup {
            user_id: user_id.to_string(),
        });
    }

    info!("Session established");
    Ok(LoginOutcome::SignedIn {
        return_to: session.policy().return_target(requested_return),
    })
}

fn persist(
    store: &CredentialStore,
    access_token: &str,
    refresh_token: Option<&str>,
    setup_user: Option<&str>,
) -> Result<(), Error> {
    store.store_tokens(access_token, refresh_token)?;
    store.set_cookie()?;
    if store.mfa_pending().is_some() {
        store.clear_mfa();
        store.mark_mfa_verified()?;
    }
    if let Some(user_id) = setup_user {
        store.set_mfa_setup(user_id)?;
    }
    Ok(())
}

/// Finishes the setup step once the user has enrolled a second factor.
///
/// # Errors
/// Returns `Error::Storage` if the tab store rejects the write.
pub fn complete_mfa_setup(session: &Session) -> Result<(), Error> {
    let store = session.store();
    store.clear_mfa();
    store.mark_mfa_verified()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::SessionEvents,
        test_support::{Harness, NavigationCall, RejectingCookieJar},
    };
    use std::rc::Rc;

    fn response(token: Option<&str>) -> LoginResponse {
        LoginResponse {
            access_token: token.map(str::to_string),
            refresh_token: Some("refresh-1".to_string()),
            user_id: Some("user-7".to_string()),
            ..LoginResponse::default()
        }
    }

    #[test]
    fn login_stores_token_and_sets_cookie() -> Result<(), Error> {
        let harness = Harness::signed_out();
        let outcome = establish_session(
            &harness.session,
            &response(Some("abc123")),
            Some("/settings/roles"),
        )?;

        let store = harness.session.store();
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert!(store.has_cookie());
        assert_eq!(outcome.destination(), "/settings/roles");
        assert_eq!(harness.navigator.calls(), vec![NavigationCall::Refresh]);
        Ok(())
    }

    #[test]
    fn login_ignores_unsafe_return_target() -> Result<(), Error> {
        let harness = Harness::signed_out();
        let outcome = establish_session(
            &harness.session,
            &response(Some("abc123")),
            Some("https://evil.example"),
        )?;
        assert_eq!(
            outcome,
            LoginOutcome::SignedIn {
                return_to: "/".to_string()
            }
        );
        Ok(())
    }

    #[test]
    fn login_without_token_is_rejected() {
        let harness = Harness::signed_out();
        let result = establish_session(&harness.session, &response(Some("  ")), None);
        assert_eq!(result, Err(Error::MissingAccessToken));
        assert!(!harness.session.store().has_cookie());
    }

    #[test]
    fn mfa_challenge_defers_token_and_cookie() -> Result<(), Error> {
        let harness = Harness::signed_out();
        let login = LoginResponse {
            mfa_required: true,
            ..response(Some("abc123"))
        };

        let outcome = establish_session(&harness.session, &login, None)?;

        let store = harness.session.store();
        assert_eq!(outcome.destination(), MFA_VERIFY_PATH);
        assert_eq!(store.mfa_pending().as_deref(), Some("user-7"));
        assert!(!store.has_session());
        assert!(!store.has_cookie());
        Ok(())
    }

    #[test]
    fn mfa_challenge_requires_user_id() {
        let harness = Harness::signed_out();
        let login = LoginResponse {
            mfa_required: true,
            user_id: None,
            ..LoginResponse::default()
        };
        assert_eq!(
            establish_session(&harness.session, &login, None),
            Err(Error::MissingUserId)
        );
    }

    #[test]
    fn verified_challenge_marks_session_verified() -> Result<(), Error> {
        let harness = Harness::signed_out();
        let challenge = LoginResponse {
            mfa_required: true,
            ..response(None)
        };
        establish_session(&harness.session, &challenge, None)?;

        let outcome = establish_session(&harness.session, &response(Some("abc123")), None)?;

        let store = harness.session.store();
        assert_eq!(outcome.destination(), "/");
        assert!(store.has_session());
        assert!(store.is_mfa_verified());
        assert_eq!(store.mfa_pending(), None);
        Ok(())
    }

    #[test]
    fn setup_required_records_pending_setup() -> Result<(), Error> {
        let harness = Harness::signed_out();
        let login = LoginResponse {
            mfa_setup_required: true,
            ..response(Some("abc123"))
        };

        let outcome = establish_session(&harness.session, &login, None)?;
        assert_eq!(outcome.destination(), MFA_SETUP_PATH);
        assert_eq!(
            harness.session.store().mfa_setup().as_deref(),
            Some("user-7")
        );
        assert!(harness.session.store().has_session());

        complete_mfa_setup(&harness.session)?;
        assert_eq!(harness.session.store().mfa_setup(), None);
        assert!(harness.session.store().is_mfa_verified());
        Ok(())
    }

    #[test]
    fn setup_required_without_user_id_writes_nothing() {
        let harness = Harness::signed_out();
        let login = LoginResponse {
            mfa_setup_required: true,
            user_id: None,
            ..response(Some("abc123"))
        };

        let result = establish_session(&harness.session, &login, None);

        assert_eq!(result, Err(Error::MissingUserId));
        let store = harness.session.store();
        assert!(!store.has_session());
        assert!(!store.has_cookie());
        assert!(harness.durable.is_empty());
        assert!(harness.navigator.calls().is_empty());
    }

    #[test]
    fn rejected_cookie_write_rolls_back_tokens() {
        let harness = Harness::with_cookie_jar(Rc::new(RejectingCookieJar));

        let result = establish_session(&harness.session, &response(Some("abc123")), None);

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(harness.session.store().token(), None);
        assert_eq!(harness.session.store().refresh_token(), None);
        assert!(harness.durable.is_empty());
        assert!(harness.navigator.calls().is_empty());
    }

    #[test]
    fn new_login_re_arms_unauthorized_reaction() -> Result<(), Error> {
        let harness = Harness::signed_in("abc123");
        harness.session.notify_unauthorized();
        assert!(harness.session.is_ended());

        establish_session(&harness.session, &response(Some("def456")), None)?;
        assert!(!harness.session.is_ended());

        harness.session.notify_unauthorized();
        assert_eq!(harness.notifier.errors().len(), 2);
        Ok(())
    }

    #[test]
    fn login_response_reads_camel_case() -> Result<(), serde_json::Error> {
        let body = r#"{"accessToken":"abc123","refreshToken":"r","userId":"u1","mfaRequired":false}"#;
        let parsed: LoginResponse = serde_json::from_str(body)?;
        assert_eq!(parsed.access_token.as_deref(), Some("abc123"));
        assert_eq!(parsed.user_id.as_deref(), Some("u1"));
        assert!(!parsed.mfa_setup_required);
        Ok(())
    }
}
