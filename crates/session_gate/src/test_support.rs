use crate::{
    error::Error,
    paths::PathPolicy,
    session::{Navigator, Notifier, Session},
    store::{CookieJar, CredentialStore, KeyValueStore},
};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};
use tracing::warn;

/// In-memory `KeyValueStore`. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// In-memory `CookieJar` honoring `Max-Age=0` and empty values as deletion.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryCookieJar {
    cookies: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryCookieJar {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn header(&self) -> Option<String> {
        let cookies = self.cookies.borrow();
        Some(
            cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn write(&self, assignment: &str) -> Result<(), Error> {
        let mut parts = assignment.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            warn!("Ignoring malformed cookie assignment");
            return Err(Error::Storage("malformed cookie assignment".to_string()));
        };
        let expired = parts.any(|attr| {
            attr.trim()
                .split_once('=')
                .is_some_and(|(key, val)| key.eq_ignore_ascii_case("max-age") && val.trim() == "0")
        });

        let mut cookies = self.cookies.borrow_mut();
        if expired || value.trim().is_empty() {
            cookies.remove(name.trim());
        } else {
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
        Ok(())
    }
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavigationCall {
    Replace(String),
    Refresh,
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    current: RefCell<String>,
    calls: RefCell<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    pub(crate) fn visit(&self, path: &str) {
        *self.current.borrow_mut() = path.to_string();
    }

    pub(crate) fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub(crate) fn calls(&self) -> Vec<NavigationCall> {
        self.calls.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.visit(path);
        self.calls
            .borrow_mut()
            .push(NavigationCall::Replace(path.to_string()));
    }

    fn refresh(&self) {
        self.calls.borrow_mut().push(NavigationCall::Refresh);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    errors: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

/// Cookie jar of a document that refuses every cookie write.
pub(crate) struct RejectingCookieJar;

impl CookieJar for RejectingCookieJar {
    fn header(&self) -> Option<String> {
        None
    }

    fn write(&self, _assignment: &str) -> Result<(), Error> {
        Err(Error::Storage("cookies are disabled".to_string()))
    }
}

pub(crate) struct Harness {
    pub(crate) session: Rc<Session>,
    pub(crate) durable: MemoryStore,
    pub(crate) tab: MemoryStore,
    pub(crate) navigator: Rc<RecordingNavigator>,
    pub(crate) notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub(crate) fn signed_out() -> Self {
        Self::with_cookie_jar(Rc::new(MemoryCookieJar::new()))
    }

    pub(crate) fn with_cookie_jar(cookies: Rc<dyn CookieJar>) -> Self {
        let durable = MemoryStore::new();
        let tab = MemoryStore::new();
        let store = CredentialStore::new(Rc::new(durable.clone()), Rc::new(tab.clone()), cookies);
        let navigator = Rc::new(RecordingNavigator::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let session = Rc::new(Session::new(
            store,
            PathPolicy::default(),
            navigator.clone(),
            notifier.clone(),
        ));
        Self {
            session,
            durable,
            tab,
            navigator,
            notifier,
        }
    }

    /// Token, refresh token, cookie and all three MFA flags populated.
    pub(crate) fn signed_in(token: &str) -> Self {
        let harness = Self::signed_out();
        let store = harness.session.store();
        store.store_tokens(token, Some("refresh-1")).ok();
        store.set_cookie().ok();
        store.set_mfa_pending("user-1").ok();
        store.set_mfa_setup("user-1").ok();
        store.mark_mfa_verified().ok();
        harness
    }
}
