//! The session controller: the one place that ends a session. The 401 reaction
//! and the logout action both go through `Session::end`, so they cannot drift on
//! what "signed out" means.

use crate::{paths::PathPolicy, store::CredentialStore};
use std::{cell::Cell, rc::Rc};
use tracing::info;

/// Router-level navigation, independent of any mounted component.
pub trait Navigator {
    /// Replaces the current history entry so back-navigation cannot return to it.
    fn replace(&self, path: &str);
    /// Forces mounted guards to re-evaluate against current storage.
    fn refresh(&self) {}
}

/// Transient user-facing error messages.
pub trait Notifier {
    fn error(&self, message: &str);
}

pub struct Session {
    store: CredentialStore,
    policy: PathPolicy,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    ended: Cell<bool>,
}

impl Session {
    pub fn new(
        store: CredentialStore,
        policy: PathPolicy,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            policy,
            navigator,
            notifier,
            ended: Cell::new(false),
        }
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    #[must_use]
    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// True once a session has been ended and no new token has been stored since.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended.get() && !self.store.has_session()
    }

    /// Marks a freshly established session so later 401s react again.
    pub fn started(&self) {
        self.ended.set(false);
    }

    /// Clears every credential surface, records that the session is over and
    /// makes mounted guards re-check storage.
    pub fn end(&self) {
        self.store.clear();
        self.ended.set(true);
        self.navigator.refresh();
        info!("Session ended");
    }

    /// Sends the user to the login screen, replacing the current entry.
    pub fn go_to_login(&self) {
        self.navigator.replace(self.policy.login_path());
    }
}
