//! Credential storage shared by the guard, the interceptor and the login/logout
//! flows. Tokens live in a durable store, MFA progress flags in a tab-scoped store
//! and the sign-in marker in a cookie. Validity is never tracked here: the backend
//! rejects stale tokens with 401 and the interceptor clears this state.

use crate::{
    cookies::{self, MAX_COOKIE_AGE_SECONDS, SIGNED_IN_COOKIE},
    error::Error,
};
use std::rc::Rc;
use tracing::debug;

/// A string key/value surface such as `localStorage` or `sessionStorage`.
///
/// Implementations must treat a missing backing store as empty: reads return
/// `None` and removals are no-ops.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// # Errors
    /// Returns `Error::Storage` when the backing store is missing or rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&self, key: &str);
}

/// Read/write access to the cookies visible to the current document.
pub trait CookieJar {
    /// Raw `name=value; ...` string, `None` when cookies are not reachable.
    fn header(&self) -> Option<String>;
    /// Applies a `Set-Cookie`-style assignment.
    /// # Errors
    /// Returns `Error::Storage` when cookies are not reachable.
    fn write(&self, assignment: &str) -> Result<(), Error>;
}

/// Storage key names; overridable so several portals can share an origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub access_token: String,
    pub refresh_token: String,
    pub mfa_pending_user: String,
    pub mfa_setup_user: String,
    pub mfa_verified: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access_token: "accessToken".to_string(),
            refresh_token: "refreshToken".to_string(),
            mfa_pending_user: "mfaPendingUserId".to_string(),
            mfa_setup_user: "mfaSetupUserId".to_string(),
            mfa_verified: "mfaVerified".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct CredentialStore {
    durable: Rc<dyn KeyValueStore>,
    tab: Rc<dyn KeyValueStore>,
    cookies: Rc<dyn CookieJar>,
    keys: StorageKeys,
    cookie_max_age: u64,
}

impl CredentialStore {
    pub fn new(
        durable: Rc<dyn KeyValueStore>,
        tab: Rc<dyn KeyValueStore>,
        cookies: Rc<dyn CookieJar>,
    ) -> Self {
        Self {
            durable,
            tab,
            cookies,
            keys: StorageKeys::default(),
            cookie_max_age: MAX_COOKIE_AGE_SECONDS,
        }
    }

    #[must_use]
    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Sets the sign-in marker lifetime, capped at `MAX_COOKIE_AGE_SECONDS`.
    #[must_use]
    pub fn with_cookie_max_age(mut self, seconds: u64) -> Self {
        self.cookie_max_age = seconds.min(MAX_COOKIE_AGE_SECONDS);
        self
    }

    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.token().is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        non_empty(self.durable.get(&self.keys.access_token))
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        non_empty(self.durable.get(&self.keys.refresh_token))
    }

    /// # Errors
    /// Returns `Error::Storage` when the durable store rejects the write.
    pub fn store_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), Error> {
        self.durable.set(&self.keys.access_token, access_token)?;
        match refresh_token.filter(|value| !value.trim().is_empty()) {
            Some(refresh) => self.durable.set(&self.keys.refresh_token, refresh)?,
            None => self.durable.remove(&self.keys.refresh_token),
        }
        Ok(())
    }

    #[must_use]
    pub fn has_cookie(&self) -> bool {
        self.cookies
            .header()
            .is_some_and(|header| cookies::is_signed_in(&header))
    }

    /// # Errors
    /// Returns `Error::Storage` when cookies are not reachable.
    pub fn set_cookie(&self) -> Result<(), Error> {
        self.cookies
            .write(&cookies::signed_in_cookie(self.cookie_max_age))
    }

    /// Best effort: a failure is logged and otherwise ignored.
    pub fn clear_cookie(&self) {
        if let Err(err) = self.cookies.write(&cookies::cleared_signed_in_cookie()) {
            debug!("Unable to clear {SIGNED_IN_COOKIE}: {err}");
        }
    }

    /// # Errors
    /// Returns `Error::Storage` when the tab store rejects the write.
    pub fn set_mfa_pending(&self, user_id: &str) -> Result<(), Error> {
        self.tab.set(&self.keys.mfa_pending_user, user_id)
    }

    #[must_use]
    pub fn mfa_pending(&self) -> Option<String> {
        non_empty(self.tab.get(&self.keys.mfa_pending_user))
    }

    /// # Errors
    /// Returns `Error::Storage` when the tab store rejects the write.
    pub fn set_mfa_setup(&self, user_id: &str) -> Result<(), Error> {
        self.tab.set(&self.keys.mfa_setup_user, user_id)
    }

    #[must_use]
    pub fn mfa_setup(&self) -> Option<String> {
        non_empty(self.tab.get(&self.keys.mfa_setup_user))
    }

    /// # Errors
    /// Returns `Error::Storage` when the tab store rejects the write.
    pub fn mark_mfa_verified(&self) -> Result<(), Error> {
        self.tab.set(&self.keys.mfa_verified, "true")
    }

    #[must_use]
    pub fn is_mfa_verified(&self) -> bool {
        self.tab.get(&self.keys.mfa_verified).as_deref() == Some("true")
    }

    pub fn clear_mfa(&self) {
        self.tab.remove(&self.keys.mfa_pending_user);
        self.tab.remove(&self.keys.mfa_setup_user);
        self.tab.remove(&self.keys.mfa_verified);
    }

    /// Removes tokens, MFA flags and the sign-in marker. Safe to call repeatedly.
    pub fn clear(&self) {
        let had_session = self.has_session();
        self.durable.remove(&self.keys.access_token);
        self.durable.remove(&self.keys.refresh_token);
        self.clear_mfa();
        self.clear_cookie();
        debug!(had_session, "Cleared credential store");
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryCookieJar, MemoryStore};

    struct Unavailable;

    impl KeyValueStore for Unavailable {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Storage("no window".to_string()))
        }

        fn remove(&self, _key: &str) {}
    }

    impl CookieJar for Unavailable {
        fn header(&self) -> Option<String> {
            None
        }

        fn write(&self, _assignment: &str) -> Result<(), Error> {
            Err(Error::Storage("no document".to_string()))
        }
    }

    fn memory_store() -> (CredentialStore, MemoryStore, MemoryStore, MemoryCookieJar) {
        let durable = MemoryStore::new();
        let tab = MemoryStore::new();
        let jar = MemoryCookieJar::new();
        let store = CredentialStore::new(
            Rc::new(durable.clone()),
            Rc::new(tab.clone()),
            Rc::new(jar.clone()),
        );
        (store, durable, tab, jar)
    }

    #[test]
    fn token_presence_defines_session() -> Result<(), Error> {
        let (store, _, _, _) = memory_store();
        assert!(!store.has_session());

        store.store_tokens("abc123", Some("refresh-1"))?;
        assert!(store.has_session());
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        Ok(())
    }

    #[test]
    fn blank_token_is_not_a_session() -> Result<(), Error> {
        let (store, durable, _, _) = memory_store();
        durable.set("accessToken", "   ")?;
        assert!(!store.has_session());
        Ok(())
    }

    #[test]
    fn clear_removes_tokens_flags_and_cookie() -> Result<(), Error> {
        let (store, durable, tab, _) = memory_store();
        store.store_tokens("abc123", Some("refresh-1"))?;
        store.set_cookie()?;
        store.set_mfa_pending("user-1")?;
        store.set_mfa_setup("user-1")?;
        store.mark_mfa_verified()?;
        assert!(store.has_cookie());

        store.clear();

        assert!(durable.is_empty());
        assert!(tab.is_empty());
        assert!(!store.has_cookie());
        assert!(!store.has_session());

        // Second clear on empty storage is a no-op.
        store.clear();
        assert!(!store.has_session());
        Ok(())
    }

    #[test]
    fn cookie_marker_round_trips_through_jar() -> Result<(), Error> {
        let (store, _, _, jar) = memory_store();
        store.set_cookie()?;
        assert_eq!(jar.header().as_deref(), Some("ezrcm_signed_in=1"));
        store.clear_cookie();
        assert_eq!(jar.header().as_deref(), Some(""));
        Ok(())
    }

    #[test]
    fn custom_keys_are_respected() -> Result<(), Error> {
        let durable = MemoryStore::new();
        let keys = StorageKeys {
            access_token: "ezrcm.token".to_string(),
            ..StorageKeys::default()
        };
        let store = CredentialStore::new(
            Rc::new(durable.clone()),
            Rc::new(MemoryStore::new()),
            Rc::new(MemoryCookieJar::new()),
        )
        .with_keys(keys);

        store.store_tokens("abc123", None)?;
        assert_eq!(durable.get("ezrcm.token").as_deref(), Some("abc123"));
        assert_eq!(durable.get("accessToken"), None);
        Ok(())
    }

    #[test]
    fn unavailable_storage_reads_as_no_session() {
        let store = CredentialStore::new(
            Rc::new(Unavailable),
            Rc::new(Unavailable),
            Rc::new(Unavailable),
        );
        assert!(!store.has_session());
        assert!(!store.has_cookie());
        assert!(store.store_tokens("abc123", None).is_err());
        assert!(store.set_cookie().is_err());
        store.clear();
    }

    #[test]
    fn memory_jar_rejects_malformed_assignment() {
        let jar = MemoryCookieJar::new();
        assert!(jar.write("garbage").is_err());
    }
}
