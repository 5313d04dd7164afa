//! User-initiated sign-out. Revocation is best effort; local state is cleared no
//! matter what the server says.

use crate::{error::Error, session::Session};
use std::future::Future;
use tracing::{debug, info};

/// Server-side token revocation (`POST /api/Auth/logout`).
pub trait TokenRevoker {
    fn revoke(&self, token: &str) -> impl Future<Output = Result<(), Error>>;
}

/// Revokes the token if one exists, then ends the session (which also makes
/// guards re-evaluate) and replaces the route with login.
pub async fn logout<R: TokenRevoker>(session: &Session, revoker: &R) {
    if let Some(token) = session.store().token() {
        if let Err(err) = revoker.revoke(&token).await {
            debug!("Token revocation failed, continuing logout: {err}");
        }
    } else {
        debug!("No token stored, skipping revocation");
    }

    session.end();
    session.go_to_login();
    info!("Signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::SessionEvents,
        test_support::{Harness, NavigationCall},
    };
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeRevoker {
        result: Result<(), Error>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeRevoker {
        fn new(result: Result<(), Error>) -> Self {
            Self {
                result,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TokenRevoker for FakeRevoker {
        async fn revoke(&self, token: &str) -> Result<(), Error> {
            self.seen.borrow_mut().push(token.to_string());
            self.result.clone()
        }
    }

    #[test]
    fn logout_revokes_then_clears_everything() {
        let harness = Harness::signed_in("abc123");
        let revoker = FakeRevoker::new(Ok(()));

        block_on(logout(&harness.session, &revoker));

        assert_eq!(revoker.seen.borrow().as_slice(), ["abc123"]);
        assert!(harness.durable.is_empty());
        assert!(harness.tab.is_empty());
        assert!(!harness.session.store().has_cookie());
        assert_eq!(
            harness.navigator.calls(),
            vec![
                NavigationCall::Refresh,
                NavigationCall::Replace("/login".to_string())
            ]
        );
    }

    #[test]
    fn logout_clears_even_when_revocation_fails() {
        for failure in [
            Error::Revocation { status: 500 },
            Error::Transport("connection reset".to_string()),
        ] {
            let harness = Harness::signed_in("abc123");
            let revoker = FakeRevoker::new(Err(failure));

            block_on(logout(&harness.session, &revoker));

            let store = harness.session.store();
            assert_eq!(store.token(), None);
            assert_eq!(store.refresh_token(), None);
            assert_eq!(store.mfa_pending(), None);
            assert_eq!(store.mfa_setup(), None);
            assert!(!store.is_mfa_verified());
            assert!(harness.notifier.errors().is_empty());
            assert_eq!(harness.navigator.current(), "/login");
        }
    }

    #[test]
    fn logout_without_token_skips_revocation() {
        let harness = Harness::signed_out();
        let revoker = FakeRevoker::new(Ok(()));

        block_on(logout(&harness.session, &revoker));

        assert!(revoker.seen.borrow().is_empty());
        assert_eq!(harness.navigator.current(), "/login");
    }

    #[test]
    fn late_unauthorized_after_logout_is_silent() {
        let harness = Harness::signed_in("abc123");
        block_on(logout(&harness.session, &FakeRevoker::new(Ok(()))));

        harness.session.notify_unauthorized();

        assert!(harness.notifier.errors().is_empty());
        assert_eq!(
            harness.navigator.calls(),
            vec![
                NavigationCall::Refresh,
                NavigationCall::Replace("/login".to_string())
            ]
        );
    }
}
